//! # Height and Shape
//!
//! Third pipeline stage: overall dimensions of the inclined screen and the
//! number of frame beams. Every dimension grows linearly with the tooth delta
//! of the height class, along the 50° incline.
//!
//! This is also where a channel that is too deep for the height class gets
//! rejected: the discharge must stay at least 630 mm above the channel top.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::ResolvedConfig;
use super::geometry::PlateGeometry;
use crate::errors::{CalcError, CalcResult};
use crate::mathutils::is_less;
use crate::units::to_mm;

/// Tooth pitch along the incline
pub const TEETH_STEP_M: f64 = 0.105;

/// Screen tilt angle, degrees
pub const TILT_ANGLE_DEG: f64 = 50.0;

/// Minimum discharge height above the channel top
pub const MIN_DISCHARGE_HEIGHT_M: f64 = 0.63;

const START_FULL_DROP_HEIGHT_M: f64 = 3.05;
const START_HORIZ_LENGTH_M: f64 = 3.097_74;
const START_SCREEN_LENGTH_M: f64 = 4.731_98;
const START_AXIS_HEIGHT_M: f64 = 3.13;

/// Discharge edge to the top of the screen
const DISCHARGE_TO_TOP_M: f64 = 0.646_68;
/// Discharge edge to the support axis, horizontally
const DISCHARGE_TO_AXIS_X_M: f64 = 0.314_94;

const EXTREME_FIXED_BEAMS_M: f64 = 3.795;
const EXTREME_MOVING_BEAMS_M: f64 = 3.24;
const FIXED_BEAM_STEP_M: f64 = 0.8;
const MOVING_BEAM_STEP_M: f64 = 0.65;

/// Vertical rise per tooth
pub fn teeth_step_y() -> f64 {
    TEETH_STEP_M * TILT_ANGLE_DEG.to_radians().sin()
}

/// Horizontal run per tooth
pub fn teeth_step_x() -> f64 {
    TEETH_STEP_M * TILT_ANGLE_DEG.to_radians().cos()
}

/// Overall screen dimensions (metres).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeMetrics {
    /// Discharge height from the channel bottom (H1)
    pub full_drop_height_m: f64,
    /// Discharge height from the channel top (H4)
    pub drop_height_m: f64,
    /// Screen height (H2)
    pub height_m: f64,
    /// Length along the incline (L)
    pub length_m: f64,
    /// Horizontal length (D)
    pub horizontal_length_m: f64,
    /// Horizontal distance to the support axis (F)
    pub axis_x_m: f64,
    pub axis_y_m: f64,
    /// Turning radius about the support axis (R)
    pub turning_radius_m: f64,
    /// Discharge width (G)
    pub drop_width_m: f64,
    pub fixed_beam_span_m: f64,
    pub moving_beam_span_m: f64,
    pub fixed_beam_count: u32,
    pub moving_beam_count: u32,
}

/// Discharge height above the channel bottom for a tooth delta.
pub fn full_drop_height_m(tooth_delta: i32) -> f64 {
    START_FULL_DROP_HEIGHT_M + f64::from(tooth_delta) * teeth_step_y()
}

/// Deepest channel (mm, floored) the height class can serve.
pub fn max_depth_mm(full_drop_height_m: f64) -> f64 {
    to_mm(full_drop_height_m - MIN_DISCHARGE_HEIGHT_M).floor()
}

/// Compute screen dimensions and beam counts, rejecting a too-deep channel.
pub fn resolve(config: &ResolvedConfig, geometry: &PlateGeometry) -> CalcResult<ShapeMetrics> {
    let delta = f64::from(config.tooth_delta);
    let step_y = teeth_step_y();

    let full_drop_height_m = full_drop_height_m(config.tooth_delta);
    let drop_height_m = full_drop_height_m - config.depth_m;
    if is_less(drop_height_m, MIN_DISCHARGE_HEIGHT_M) {
        let max_depth_mm = max_depth_mm(full_drop_height_m);
        debug!(
            depth_m = config.depth_m,
            max_depth_mm, "channel too deep for height class"
        );
        return Err(CalcError::TooDeep {
            depth_mm: to_mm(config.depth_m),
            max_depth_mm,
        });
    }

    let horizontal_length_m = START_HORIZ_LENGTH_M + delta * teeth_step_x();
    let axis_x_m = horizontal_length_m - DISCHARGE_TO_AXIS_X_M;
    let axis_y_m = START_AXIS_HEIGHT_M + delta * step_y;

    let fixed_beam_span_m = EXTREME_FIXED_BEAMS_M + TEETH_STEP_M * delta;
    let moving_beam_span_m = EXTREME_MOVING_BEAMS_M + TEETH_STEP_M * delta;

    let shape = ShapeMetrics {
        full_drop_height_m,
        drop_height_m,
        height_m: full_drop_height_m + DISCHARGE_TO_TOP_M,
        length_m: START_SCREEN_LENGTH_M + delta * TEETH_STEP_M,
        horizontal_length_m,
        axis_x_m,
        axis_y_m,
        turning_radius_m: axis_x_m.hypot(axis_y_m),
        drop_width_m: 0.1 * config.width_class.value() - 0.062,
        fixed_beam_span_m,
        moving_beam_span_m,
        fixed_beam_count: beam_count(fixed_beam_span_m, FIXED_BEAM_STEP_M, geometry.fixed.has_plastic()),
        moving_beam_count: beam_count(moving_beam_span_m, MOVING_BEAM_STEP_M, geometry.moving.has_plastic()),
    };

    debug!(
        drop_height_m = shape.drop_height_m,
        fixed_beams = shape.fixed_beam_count,
        moving_beams = shape.moving_beam_count,
        "shape resolved"
    );
    Ok(shape)
}

/// Plates with a plastic part need half the beam spacing plus end beams.
fn beam_count(span_m: f64, beam_step_m: f64, with_plastic: bool) -> u32 {
    if with_plastic {
        (span_m / beam_step_m / 2.0).round() as u32 + 3
    } else {
        (span_m / beam_step_m).round() as u32 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::config::{self, ScreenInput};
    use crate::calculations::geometry;
    use crate::catalog::{HeightClass, PlateSpacerPair, WidthClass};

    fn shape(hs: HeightClass, depth_mm: f64, steel_only: bool) -> CalcResult<ShapeMetrics> {
        let input = ScreenInput::new(
            WidthClass::new(10).unwrap(),
            hs,
            6.0,
            depth_mm,
            PlateSpacerPair::Fixed3Moving3Steel,
        )
        .with_steel_only(steel_only);
        let config = config::resolve(&input)?;
        let geometry = geometry::resolve(&config)?;
        resolve(&config, &geometry)
    }

    #[test]
    fn test_reference_dimensions() {
        let s = shape(HeightClass::H21, 1000.0, true).unwrap();
        assert_eq!(to_mm(s.full_drop_height_m).round(), 3050.0);
        assert_eq!(to_mm(s.drop_height_m).round(), 2050.0);
        assert_eq!(to_mm(s.height_m).round(), 3697.0);
        assert_eq!(to_mm(s.length_m).round(), 4732.0);
        assert_eq!(to_mm(s.horizontal_length_m).round(), 3098.0);
        assert_eq!(to_mm(s.axis_x_m).round(), 2783.0);
        assert_eq!(to_mm(s.turning_radius_m).round(), 4188.0);
        assert_eq!(to_mm(s.drop_width_m).round(), 938.0);
        assert_eq!(s.fixed_beam_count, 6);
        assert_eq!(s.moving_beam_count, 6);
    }

    #[test]
    fn test_plastic_beam_counts() {
        let s = shape(HeightClass::H21, 1000.0, false).unwrap();
        assert_eq!(s.fixed_beam_count, 5);
        assert_eq!(s.moving_beam_count, 5);
    }

    #[test]
    fn test_too_deep() {
        let err = shape(HeightClass::H06, 1000.0, true).unwrap_err();
        assert_eq!(
            err,
            CalcError::TooDeep {
                depth_mm: 1000.0,
                max_depth_mm: 891.0
            }
        );
        assert!(shape(HeightClass::H06, 891.0, true).is_ok());
        assert_eq!(max_depth_mm(full_drop_height_m(HeightClass::H06.tooth_delta())), 891.0);
    }

    #[test]
    fn test_huge_depth_with_plastic_is_too_deep() {
        let err = shape(HeightClass::H21, 1e12, false).unwrap_err();
        assert!(matches!(err, CalcError::TooDeep { depth_mm, .. } if depth_mm == 1e12));
    }

    #[test]
    fn test_tooth_pitch_components() {
        let y = teeth_step_y();
        let x = teeth_step_x();
        assert!((x.hypot(y) - TEETH_STEP_M).abs() < 1e-15);
        assert!((y - 0.080_434_6).abs() < 1e-6);
    }
}
