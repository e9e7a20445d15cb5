//! Gear-motor catalog.
//!
//! Both tables are ordered by ascending rated torque; selection walks them in
//! order and takes the first unit that is strong enough.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::classes::WidthClass;
use crate::units::{Kilograms, Kilowatts, NewtonMeters, Rpm};

/// A catalogued drive unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveUnit {
    pub designation: Cow<'static, str>,
    pub mass: Kilograms,
    pub power: Kilowatts,
    /// Rated output torque
    pub torque: NewtonMeters,
    pub speed: Rpm,
}

const fn drive(designation: &'static str, mass: f64, power: f64, torque: f64, speed: f64) -> DriveUnit {
    DriveUnit {
        designation: Cow::Borrowed(designation),
        mass: Kilograms(mass),
        power: Kilowatts(power),
        torque: NewtonMeters(torque),
        speed: Rpm(speed),
    }
}

/// Drives for the narrowest screens
pub static SMALL_DRIVE_UNITS: [DriveUnit; 2] = [
    drive("SK9022.1-80LP", 49.0, 0.75, 586.0, 12.0),
    drive("SK9022.1-90SP", 54.0, 1.1, 850.0, 12.0),
];

pub static DRIVE_UNITS: [DriveUnit; 4] = [
    drive("SK9032.1-80LP", 69.0, 0.75, 562.0, 13.0),
    drive("SK9032.1-90SP", 73.0, 1.1, 815.0, 13.0),
    drive("SK9032.1-90LP", 75.0, 1.5, 1123.0, 13.0),
    drive("SK9032.1-100LP", 86.0, 2.2, 1591.0, 13.0),
];

/// Largest width class served by the small drive table
const SMALL_DRIVE_MAX_WIDTH: u8 = 5;

/// Drive table applicable to a width class.
pub fn drive_catalog(width: WidthClass) -> &'static [DriveUnit] {
    if width.code() <= SMALL_DRIVE_MAX_WIDTH {
        &SMALL_DRIVE_UNITS
    } else {
        &DRIVE_UNITS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_by_width() {
        let small = drive_catalog(WidthClass::new(5).unwrap());
        assert_eq!(small.len(), 2);
        assert_eq!(small[0].designation, "SK9022.1-80LP");

        let standard = drive_catalog(WidthClass::new(6).unwrap());
        assert_eq!(standard.len(), 4);
        assert_eq!(standard[3].torque, NewtonMeters(1591.0));
    }

    #[test]
    fn test_tables_ascending_by_torque() {
        for table in [&SMALL_DRIVE_UNITS[..], &DRIVE_UNITS[..]] {
            assert!(table.windows(2).all(|w| w[0].torque.0 < w[1].torque.0));
        }
    }

    #[test]
    fn test_drive_serialization() {
        let json = serde_json::to_string(&DRIVE_UNITS[2]).unwrap();
        assert!(json.contains("\"designation\":\"SK9032.1-90LP\""));
        let back: DriveUnit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DRIVE_UNITS[2]);
    }
}
