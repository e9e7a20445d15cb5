//! # Drive Selection
//!
//! Fifth pipeline stage. The drive turns a crank that lifts the whole moving
//! frame, so the required torque follows from the moving mass alone.

use tracing::{debug, warn};

use crate::catalog::{drive_catalog, DriveUnit, WidthClass};
use crate::mathutils::{is_more_eq, GRAV_ACC};

/// Crank radius
pub const LEVER_ARM_M: f64 = 0.055;

/// Allowance for friction and loads not covered by the moving mass
pub const UNACCOUNTED_LOAD_FACTOR: f64 = 2.3;

/// Minimum drive torque (N·m) for a moving mass in kg.
pub fn required_torque(moving_kg: f64) -> f64 {
    moving_kg * UNACCOUNTED_LOAD_FACTOR * GRAV_ACC * LEVER_ARM_M
}

/// First drive, in ascending torque order, that delivers the required torque.
///
/// `None` means the screen needs a custom drive; that is a valid outcome.
pub fn select_drive(width: WidthClass, required_nm: f64) -> Option<&'static DriveUnit> {
    let selected = drive_catalog(width)
        .iter()
        .find(|unit| is_more_eq(unit.torque.0, required_nm));

    match selected {
        Some(unit) => debug!(designation = %unit.designation, required_nm, "drive selected"),
        None => warn!(width_class = width.code(), required_nm, "no catalog drive delivers the required torque"),
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ws(code: u8) -> WidthClass {
        WidthClass::new(code).unwrap()
    }

    #[test]
    fn test_required_torque() {
        assert!((required_torque(795.116_046_1) - 986.374_233_846_050_3).abs() < 1e-6);
        assert_eq!(required_torque(0.0), 0.0);
    }

    #[test]
    fn test_select_first_adequate() {
        assert_eq!(select_drive(ws(10), 986.37).unwrap().designation, "SK9032.1-90LP");
        assert_eq!(select_drive(ws(10), 641.71).unwrap().designation, "SK9032.1-90SP");
        assert_eq!(select_drive(ws(22), 1365.05).unwrap().designation, "SK9032.1-100LP");
        assert_eq!(select_drive(ws(5), 319.6).unwrap().designation, "SK9022.1-80LP");
    }

    #[test]
    fn test_exact_rating_qualifies() {
        assert_eq!(select_drive(ws(10), 1123.0).unwrap().designation, "SK9032.1-90LP");
        assert_eq!(select_drive(ws(10), 1123.000_000_1).unwrap().designation, "SK9032.1-90LP");
    }

    #[test]
    fn test_no_drive() {
        assert!(select_drive(ws(22), 2707.73).is_none());
        assert!(select_drive(ws(5), 851.0).is_none());
    }

    #[test]
    fn test_monotonic_in_torque() {
        let mut last_rating = 0.0;
        for step in 0..400 {
            let required = f64::from(step) * 5.0;
            match select_drive(ws(12), required) {
                Some(unit) => {
                    assert!(unit.torque.0 >= last_rating);
                    last_rating = unit.torque.0;
                }
                None => last_rating = f64::INFINITY,
            }
        }
    }
}
