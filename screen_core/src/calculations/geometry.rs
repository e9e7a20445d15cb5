//! # Plate Geometry
//!
//! Second pipeline stage. Decides how each plate is split between steel and
//! plastic, then fits the plate pitch so a whole number of plates spans the
//! inner width exactly.
//!
//! ## Plate policies
//!
//! | Policy         | When                                  | Plastic on     |
//! |----------------|---------------------------------------|----------------|
//! | Steel only     | `steel_only` requested                | nothing        |
//! | Single plastic | height class below 9                  | fixed plates   |
//! | Double plastic | height class 9 and up                 | both plates    |
//!
//! The lower teeth of a plate (those that stay in the water) are steel; the
//! rest of the plate is plastic. Plastic plates are thicker than steel ones,
//! so the pitch is fitted around the thickest fixed part.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::{ResolvedConfig, STEEL_GAP_MIN};
use crate::catalog::{double_plastic_thickness, single_plastic_thickness};
use crate::errors::{CalcError, CalcResult};
use crate::mathutils::{floor_mm_key, floor_to_mm, is_less_eq};
use crate::units::mm;

/// Minimum gap between neighbouring plastic parts (0.36 mm)
pub const PLASTIC_GAP_MIN: f64 = STEEL_GAP_MIN;

/// Maximum gap a plastic part may leave to its neighbour (1.5 mm)
pub const PLASTIC_GAP_MAX: f64 = 0.0015;

/// Plastic sheet is 1.5 m wide, a plate is 234 mm high
pub const PLATES_PER_SHEET: u32 = 6;

pub const PLASTIC_SHEET_WIDTH_M: f64 = 1.5;
pub const PLASTIC_SHEET_LENGTH_M: f64 = 3.0;

/// Height class from which both plates carry plastic
const DOUBLE_PLASTIC_MIN_HEIGHT: u8 = 9;

/// Steel teeth on the fixed plate never drop below this
const MIN_STEEL_TEETH: i32 = 11;

/// One material section of a plate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatePart {
    pub thickness_m: f64,
    pub teeth: i32,
}

/// A plate: steel at the bottom, optionally plastic above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plate {
    pub steel: PlatePart,
    pub plastic: Option<PlatePart>,
}

impl Plate {
    fn steel_only(thickness_m: f64, teeth: i32) -> Self {
        Plate {
            steel: PlatePart { thickness_m, teeth },
            plastic: None,
        }
    }

    pub fn has_plastic(&self) -> bool {
        self.plastic.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatePolicy {
    SteelOnly,
    SinglePlastic,
    DoublePlastic,
}

/// Plastic sheets needed for one thickness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlasticSheetUsage {
    pub thickness_m: f64,
    pub sheets: u32,
}

/// Fitted plate layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateGeometry {
    pub policy: PlatePolicy,
    pub fixed: Plate,
    pub moving: Plate,
    /// Pitch for the optimal gap, before fitting
    pub optimal_step_m: f64,
    /// Fitted pitch between plates of the same kind
    pub step_m: f64,
    pub moving_count: u32,
    pub fixed_count: u32,
    /// Actual gap between neighbouring steel parts
    pub gap_m: f64,
    pub bottom_spacer_thickness_m: f64,
    pub bottom_spacer_count: u32,
    /// Gap between sidewall and outermost steel plate
    pub side_gap_m: f64,
    pub min_side_gap_m: f64,
    /// Sidewall to the middle of the first fixed plate
    pub fixed_start_m: f64,
    /// Sidewall to the middle of the first moving plate
    pub moving_start_m: f64,
    pub spacer_count: u32,
    pub plastic_sheets: Vec<PlasticSheetUsage>,
}

/// Split the plates, fit the pitch and derive gaps and spacer counts.
pub fn resolve(config: &ResolvedConfig) -> CalcResult<PlateGeometry> {
    let fixed_steel_m = config.plates.fixed_m();
    let moving_steel_m = config.plates.moving_m();
    let optimal_step_m = 2.0 * config.optimal_gap_m + fixed_steel_m + moving_steel_m;

    let (policy, fixed, moving, fit_thickness_m) = if config.steel_only {
        (
            PlatePolicy::SteelOnly,
            Plate::steel_only(fixed_steel_m, config.all_teeth),
            Plate::steel_only(moving_steel_m, config.all_teeth),
            fixed_steel_m,
        )
    } else {
        let fixed_steel_teeth = steel_teeth_for_depth(config.depth_m).min(config.all_teeth);
        if config.height_class.code() < DOUBLE_PLASTIC_MIN_HEIGHT {
            let plastic_m = single_plastic(optimal_step_m, moving_steel_m)?;
            let fixed = Plate {
                steel: PlatePart {
                    thickness_m: fixed_steel_m,
                    teeth: fixed_steel_teeth,
                },
                plastic: Some(PlatePart {
                    thickness_m: plastic_m,
                    teeth: config.all_teeth - fixed_steel_teeth,
                }),
            };
            let moving = Plate::steel_only(moving_steel_m, config.all_teeth);
            (PlatePolicy::SinglePlastic, fixed, moving, fixed_steel_m)
        } else {
            let moving_steel_teeth = fixed_steel_teeth.saturating_add(2);
            let (fixed_plastic_m, moving_plastic_m) = double_plastic(optimal_step_m)?;
            let fixed = Plate {
                steel: PlatePart {
                    thickness_m: fixed_steel_m,
                    teeth: fixed_steel_teeth,
                },
                plastic: Some(PlatePart {
                    thickness_m: fixed_plastic_m,
                    teeth: config.all_teeth - fixed_steel_teeth,
                }),
            };
            let moving = Plate {
                steel: PlatePart {
                    thickness_m: moving_steel_m,
                    teeth: moving_steel_teeth,
                },
                plastic: Some(PlatePart {
                    thickness_m: moving_plastic_m,
                    teeth: config.all_teeth - moving_steel_teeth,
                }),
            };
            (PlatePolicy::DoublePlastic, fixed, moving, fixed_plastic_m)
        }
    };

    let (moving_count, step_m) = fit_pitch(config.inner_width_m, fit_thickness_m, optimal_step_m)?;
    let fixed_count = moving_count - 1;
    let gap_m = (step_m - fixed_steel_m - moving_steel_m) / 2.0;

    let side_gap = |thickness_m: f64| (config.inner_width_m - thickness_m - step_m * f64::from(fixed_count)) / 2.0;
    let side_gap_m = side_gap(moving_steel_m);
    let min_side_gap_m = match moving.plastic {
        Some(plastic) => side_gap(plastic.thickness_m).min(side_gap_m),
        None => side_gap_m,
    };

    let bottom_spacer_thickness_m = floor_to_mm(gap_m - STEEL_GAP_MIN);

    // One spacer pair every third steel tooth, counted from the second tooth
    let spacer_count = ((fixed.steel.teeth - 1).max(0) / 3) as u32;
    let spacer_count = spacer_count.saturating_mul(2).saturating_mul(fixed_count);

    let geometry = PlateGeometry {
        policy,
        fixed,
        moving,
        optimal_step_m,
        step_m,
        moving_count,
        fixed_count,
        gap_m,
        bottom_spacer_thickness_m,
        bottom_spacer_count: 2 * fixed_count,
        side_gap_m,
        min_side_gap_m,
        fixed_start_m: side_gap_m + moving_steel_m + gap_m + fixed_steel_m / 2.0,
        moving_start_m: side_gap_m + moving_steel_m / 2.0,
        spacer_count,
        plastic_sheets: plastic_sheets(&fixed, fixed_count, &moving, moving_count),
    };

    debug!(
        policy = ?geometry.policy,
        moving_count = geometry.moving_count,
        step_m = geometry.step_m,
        gap_m = geometry.gap_m,
        "plate geometry fitted"
    );
    Ok(geometry)
}

/// Steel teeth on the fixed plate: enough to stay below the waterline.
pub fn steel_teeth_for_depth(depth_m: f64) -> i32 {
    ((12.53 * depth_m - 3.1415).round() as i32).max(MIN_STEEL_TEETH)
}

/// Fit a whole number of moving plates into the inner width.
///
/// The fitted step spreads the remainder evenly, so it is never smaller than
/// the optimal step.
pub fn fit_pitch(inner_width_m: f64, fit_thickness_m: f64, optimal_step_m: f64) -> CalcResult<(u32, f64)> {
    let span_m = inner_width_m + fit_thickness_m;
    let count = (span_m / optimal_step_m).floor();
    if count < 2.0 {
        return Err(CalcError::invalid_input(
            "nominal_gap_mm",
            format!("{:.3}", optimal_step_m * 1e3),
            "Plate step leaves room for fewer than two moving plates",
        ));
    }
    Ok((count as u32, span_m / count))
}

fn single_plastic(optimal_step_m: f64, moving_steel_m: f64) -> CalcResult<f64> {
    let space_mm = floor_mm_key(optimal_step_m - moving_steel_m - 2.0 * PLASTIC_GAP_MIN).unwrap_or(0);
    let plastic_m = single_plastic_thickness(space_mm)
        .map(|t| mm(f64::from(t)))
        .ok_or(CalcError::NoPlasticPlate { space_mm })?;

    let residual_m = (optimal_step_m - plastic_m - moving_steel_m) / 2.0;
    assert!(
        is_less_eq(residual_m, PLASTIC_GAP_MAX),
        "plastic gap {residual_m} m exceeds {PLASTIC_GAP_MAX} m for a {space_mm} mm space"
    );
    Ok(plastic_m)
}

fn double_plastic(optimal_step_m: f64) -> CalcResult<(f64, f64)> {
    let space_mm = floor_mm_key(optimal_step_m - 2.0 * PLASTIC_GAP_MIN).unwrap_or(0);
    let pair = double_plastic_thickness(space_mm).ok_or(CalcError::NoPlasticPlate { space_mm })?;
    let fixed_m = mm(f64::from(pair.fixed_mm));
    let moving_m = mm(f64::from(pair.moving_mm));

    let residual_m = (optimal_step_m - fixed_m - moving_m) / 2.0;
    assert!(
        is_less_eq(residual_m, PLASTIC_GAP_MAX),
        "plastic gap {residual_m} m exceeds {PLASTIC_GAP_MAX} m for a {space_mm} mm space"
    );
    Ok((fixed_m, moving_m))
}

/// Sheets per plastic thickness, fixed plates first. Plates of equal
/// thickness share sheets only within the same kind.
fn plastic_sheets(fixed: &Plate, fixed_count: u32, moving: &Plate, moving_count: u32) -> Vec<PlasticSheetUsage> {
    let mut usage: Vec<PlasticSheetUsage> = Vec::new();
    for (plate, count) in [(fixed, fixed_count), (moving, moving_count)] {
        let Some(plastic) = plate.plastic else {
            continue;
        };
        let sheets = count.div_ceil(PLATES_PER_SHEET);
        match usage
            .iter_mut()
            .find(|u| (u.thickness_m - plastic.thickness_m).abs() < 1e-9)
        {
            Some(existing) => existing.sheets += sheets,
            None => usage.push(PlasticSheetUsage {
                thickness_m: plastic.thickness_m,
                sheets,
            }),
        }
    }
    usage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::config::{self, ScreenInput};
    use crate::catalog::{HeightClass, PlateSpacerPair, WidthClass};

    fn geometry(ws: u8, hs: HeightClass, gap_mm: f64, depth_mm: f64, plates: PlateSpacerPair, steel_only: bool) -> PlateGeometry {
        let input = ScreenInput::new(WidthClass::new(ws).unwrap(), hs, gap_mm, depth_mm, plates).with_steel_only(steel_only);
        resolve(&config::resolve(&input).unwrap()).unwrap()
    }

    #[test]
    fn test_steel_only() {
        let g = geometry(10, HeightClass::H21, 6.0, 1000.0, PlateSpacerPair::Fixed3Moving3Steel, true);
        assert_eq!(g.policy, PlatePolicy::SteelOnly);
        assert_eq!(g.moving_count, 49);
        assert_eq!(g.fixed_count, 48);
        assert!((g.step_m - 0.019_040_816_326_530_61).abs() < 1e-12);
        assert!((g.gap_m - 0.006_520_408_163_265_306).abs() < 1e-12);
        assert_eq!(g.fixed.steel.teeth, 41);
        assert_eq!(g.moving.steel.teeth, 41);
        assert!(!g.fixed.has_plastic() && !g.moving.has_plastic());
        assert_eq!(g.spacer_count, 1248);
        assert!((g.bottom_spacer_thickness_m - 0.006).abs() < 1e-12);
        assert_eq!(g.bottom_spacer_count, 96);
        assert!((g.side_gap_m - g.gap_m).abs() < 1e-9);
        assert!((g.fixed_start_m - 0.017_541).abs() < 1e-6);
        assert!((g.moving_start_m - 0.008_020).abs() < 1e-6);
        assert!(g.plastic_sheets.is_empty());
    }

    #[test]
    fn test_double_plastic() {
        let g = geometry(10, HeightClass::H21, 6.0, 1000.0, PlateSpacerPair::Fixed3Moving3Steel, false);
        assert_eq!(g.policy, PlatePolicy::DoublePlastic);
        assert_eq!(g.moving_count, 50);
        assert!((g.step_m - 0.0188).abs() < 1e-12);
        assert!((g.gap_m - 0.0064).abs() < 1e-12);
        assert_eq!(g.fixed.steel.teeth, 11);
        assert_eq!(g.moving.steel.teeth, 13);

        let fixed_plastic = g.fixed.plastic.unwrap();
        let moving_plastic = g.moving.plastic.unwrap();
        assert!((fixed_plastic.thickness_m - 0.010).abs() < 1e-12);
        assert_eq!(fixed_plastic.teeth, 30);
        assert!((moving_plastic.thickness_m - 0.008).abs() < 1e-12);
        assert_eq!(moving_plastic.teeth, 28);

        assert_eq!(g.spacer_count, 294);
        assert!((g.side_gap_m - 0.0029).abs() < 1e-9);
        assert!((g.min_side_gap_m - 0.0004).abs() < 1e-9);
        assert_eq!(g.plastic_sheets.len(), 2);
        assert_eq!(g.plastic_sheets[0].sheets, 9);
        assert!((g.plastic_sheets[0].thickness_m - 0.010).abs() < 1e-12);
        assert_eq!(g.plastic_sheets[1].sheets, 9);
    }

    #[test]
    fn test_single_plastic() {
        let g = geometry(10, HeightClass::H06, 3.0, 500.0, PlateSpacerPair::Fixed2Moving3Plastic, false);
        assert_eq!(g.policy, PlatePolicy::SinglePlastic);
        assert_eq!(g.moving_count, 84);
        assert_eq!(g.fixed_count, 83);
        assert!((g.step_m - 0.011_095_238_095_238_094).abs() < 1e-12);
        assert_eq!(g.fixed.steel.teeth, 11);
        assert_eq!(g.moving.steel.teeth, 22);
        assert!(g.moving.plastic.is_none());

        let plastic = g.fixed.plastic.unwrap();
        assert!((plastic.thickness_m - 0.006).abs() < 1e-12);
        assert_eq!(plastic.teeth, 11);
        assert_eq!(g.spacer_count, 498);
        assert!((g.bottom_spacer_thickness_m - 0.002).abs() < 1e-12);
        assert_eq!(g.plastic_sheets[0].sheets, 14);
        assert_eq!(g.min_side_gap_m, g.side_gap_m);
    }

    #[test]
    fn test_plastic_key_floors_values_just_below_a_millimetre() {
        // Space computes to 13.999999999999998 mm, so the 13 mm row applies
        let g = geometry(10, HeightClass::H06, 6.0, 500.0, PlateSpacerPair::Fixed2Moving2Steel, false);
        assert_eq!(g.policy, PlatePolicy::SinglePlastic);
        assert_eq!(g.moving_count, 55);
        assert!((g.fixed.plastic.unwrap().thickness_m - 0.012).abs() < 1e-12);
        assert!((g.bottom_spacer_thickness_m - 0.006).abs() < 1e-12);

        // 11.999999999999998 mm keys the 11 mm pair
        let g = geometry(10, HeightClass::H21, 3.0, 1000.0, PlateSpacerPair::Fixed3Moving3Steel, false);
        assert_eq!(g.policy, PlatePolicy::DoublePlastic);
        assert_eq!(g.moving_count, 73);
        assert!((g.fixed.plastic.unwrap().thickness_m - 0.006).abs() < 1e-12);
        assert!((g.moving.plastic.unwrap().thickness_m - 0.005).abs() < 1e-12);
        assert!((g.min_side_gap_m - 0.000_910_958_904_109_582).abs() < 1e-9);
    }

    #[test]
    fn test_fit_pitch_floors_ratio_just_below_an_integer() {
        // Span over optimal step is 113.99999999999999
        let g = geometry(20, HeightClass::H09, 6.0, 500.0, PlateSpacerPair::Fixed2Moving3Plastic, false);
        assert_eq!(g.moving_count, 113);
        assert!((g.step_m - 0.017_150_442_477_876_105).abs() < 1e-12);
        assert!((g.bottom_spacer_thickness_m - 0.005).abs() < 1e-12);
    }

    #[test]
    fn test_huge_depth_saturates_steel_teeth() {
        let g = geometry(10, HeightClass::H21, 6.0, 1e12, PlateSpacerPair::Fixed3Moving3Steel, false);
        assert_eq!(g.fixed.steel.teeth, 41);
        assert_eq!(g.fixed.plastic.unwrap().teeth, 0);
        assert_eq!(g.moving.steel.teeth, 43);
        assert_eq!(g.spacer_count, 13 * 2 * 49);
    }

    #[test]
    fn test_pitch_invariant() {
        for plates in PlateSpacerPair::ALL {
            let g = geometry(14, HeightClass::H15, 6.0, 800.0, plates, false);
            assert_eq!(g.fixed_count, g.moving_count - 1);
            let sum = 2.0 * g.gap_m + plates.fixed_m() + plates.moving_m();
            assert!((sum - g.step_m).abs() < 1e-9);
            assert!(g.step_m > g.optimal_step_m - 1e-12);
        }
    }

    #[test]
    fn test_missing_plastic_thickness() {
        // 8 mm steel gap: 2·8.36 + 5 leaves no catalogued plastic pair
        let input = ScreenInput::new(
            WidthClass::new(10).unwrap(),
            HeightClass::H21,
            8.0,
            1000.0,
            PlateSpacerPair::Fixed3Moving2Steel,
        );
        let err = resolve(&config::resolve(&input).unwrap()).unwrap_err();
        assert!(matches!(err, CalcError::NoPlasticPlate { space_mm: 21 }));
    }

    #[test]
    fn test_steel_teeth_for_depth() {
        assert_eq!(steel_teeth_for_depth(0.5), 11);
        assert_eq!(steel_teeth_for_depth(2.0), 22);
        assert_eq!(steel_teeth_for_depth(3.0), 34);
    }

    #[test]
    fn test_fit_pitch_rejects_huge_gap() {
        assert!(fit_pitch(0.43, 0.002, 0.3).is_err());
        let (count, step) = fit_pitch(0.93, 0.003, 0.01872).unwrap();
        assert_eq!(count, 49);
        assert!((step - 0.933 / 49.0).abs() < 1e-15);
    }
}
