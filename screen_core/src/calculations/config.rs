//! # Configuration Resolution
//!
//! First pipeline stage. Validates the raw selection, picks the spacer and
//! the gap the plates are fitted for, and works out how many teeth the
//! plates carry for the chosen height class.
//!
//! ## Example
//!
//! ```rust
//! use screen_core::calculations::config::{resolve, ScreenInput, SpacerChoice};
//! use screen_core::catalog::{HeightClass, PlateSpacerPair, WidthClass};
//!
//! let input = ScreenInput::new(
//!     WidthClass::new(10).unwrap(),
//!     HeightClass::H21,
//!     6.0,
//!     1000.0,
//!     PlateSpacerPair::Fixed2Moving3Plastic,
//! );
//! let config = resolve(&input).unwrap();
//! assert_eq!(config.all_teeth, 41);
//! assert!(matches!(config.spacer, SpacerChoice::Plastic { .. }));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{
    plastic_spacer_for_gap, plastic_spacer_gaps_mm, steel_spacer_mass, HeightClass,
    PlateSpacerPair, SpacerMaterial, WidthClass, BASE_TEETH,
};
use crate::errors::{CalcError, CalcResult};
use crate::mathutils::is_less_eq;
use crate::units::{mm, Kilograms};

/// Minimum clearance between a welded steel spacer and a steel plate (0.36 mm)
pub const STEEL_GAP_MIN: f64 = 0.000_36;

/// Input record for one screen.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Pumping station 2",
///   "width_class": 10,
///   "height_class": 21,
///   "nominal_gap_mm": 6.0,
///   "depth_mm": 1000.0,
///   "plates": "3/3 steel",
///   "steel_only": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenInput {
    /// User label (e.g. project or channel name)
    #[serde(default)]
    pub label: String,

    pub width_class: WidthClass,

    pub height_class: HeightClass,

    /// Nominal gap between plates in mm
    pub nominal_gap_mm: f64,

    /// Channel or tank depth in mm
    pub depth_mm: f64,

    /// Fixed/moving steel thickness and spacer material
    pub plates: PlateSpacerPair,

    /// Build the plates entirely from steel
    #[serde(default)]
    pub steel_only: bool,
}

impl ScreenInput {
    pub fn new(
        width_class: WidthClass,
        height_class: HeightClass,
        nominal_gap_mm: f64,
        depth_mm: f64,
        plates: PlateSpacerPair,
    ) -> Self {
        ScreenInput {
            label: String::new(),
            width_class,
            height_class,
            nominal_gap_mm,
            depth_mm,
            plates,
            steel_only: false,
        }
    }

    pub fn with_steel_only(mut self, steel_only: bool) -> Self {
        self.steel_only = steel_only;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Catalog designation, e.g. "RSK 1021"
    pub fn designation(&self) -> String {
        format!("RSK {}{}", self.width_class, self.height_class)
    }
}

/// Gap limiter chosen for the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "material", rename_all = "lowercase")]
pub enum SpacerChoice {
    /// Welded steel spacer cut to the nominal gap
    Steel { thickness_m: f64, mass_kg: f64 },
    /// Catalogued plastic spacer
    Plastic {
        designation: String,
        thickness_m: f64,
        mass_kg: f64,
    },
}

impl SpacerChoice {
    pub fn material(&self) -> SpacerMaterial {
        match self {
            SpacerChoice::Steel { .. } => SpacerMaterial::Steel,
            SpacerChoice::Plastic { .. } => SpacerMaterial::Plastic,
        }
    }

    pub fn mass_kg(&self) -> f64 {
        match self {
            SpacerChoice::Steel { mass_kg, .. } | SpacerChoice::Plastic { mass_kg, .. } => *mass_kg,
        }
    }

    pub fn thickness_m(&self) -> f64 {
        match self {
            SpacerChoice::Steel { thickness_m, .. } | SpacerChoice::Plastic { thickness_m, .. } => {
                *thickness_m
            }
        }
    }

    /// Part designation; welded steel spacers have none.
    pub fn designation(&self) -> Option<&str> {
        match self {
            SpacerChoice::Steel { .. } => None,
            SpacerChoice::Plastic { designation, .. } => Some(designation.as_str()),
        }
    }
}

/// Validated configuration in SI units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    pub width_class: WidthClass,
    pub height_class: HeightClass,
    pub plates: PlateSpacerPair,
    pub steel_only: bool,
    pub nominal_gap_m: f64,
    pub depth_m: f64,
    pub outer_width_m: f64,
    pub inner_width_m: f64,
    /// Gap the plate pitch is fitted for
    pub optimal_gap_m: f64,
    pub spacer: SpacerChoice,
    /// Teeth relative to the reference height class
    pub tooth_delta: i32,
    pub all_teeth: i32,
}

/// Resolve and validate a screen configuration.
pub fn resolve(input: &ScreenInput) -> CalcResult<ResolvedConfig> {
    if !input.depth_mm.is_finite() || is_less_eq(mm(input.depth_mm), 0.0) {
        return Err(CalcError::InvalidDepth {
            depth_mm: input.depth_mm,
        });
    }
    if !input.nominal_gap_mm.is_finite() || is_less_eq(mm(input.nominal_gap_mm), 0.0) {
        return Err(CalcError::invalid_input(
            "nominal_gap_mm",
            input.nominal_gap_mm.to_string(),
            "Gap must be positive",
        ));
    }

    let ws = input.width_class.value();
    let nominal_gap_m = mm(input.nominal_gap_mm);

    let (optimal_gap_m, spacer) = match input.plates.spacer() {
        SpacerMaterial::Plastic => {
            let spacer = plastic_spacer_for_gap(input.nominal_gap_mm).ok_or_else(|| {
                CalcError::NonStandardGap {
                    gap_mm: input.nominal_gap_mm,
                    valid_gaps_mm: plastic_spacer_gaps_mm(),
                }
            })?;
            let choice = SpacerChoice::Plastic {
                designation: spacer.designation.to_string(),
                thickness_m: mm(spacer.thickness.0),
                mass_kg: Kilograms::from(spacer.mass).0,
            };
            (nominal_gap_m, choice)
        }
        SpacerMaterial::Steel => {
            let choice = SpacerChoice::Steel {
                thickness_m: nominal_gap_m,
                mass_kg: steel_spacer_mass(nominal_gap_m).0,
            };
            (nominal_gap_m + STEEL_GAP_MIN, choice)
        }
    };

    let tooth_delta = input.height_class.tooth_delta();
    let config = ResolvedConfig {
        width_class: input.width_class,
        height_class: input.height_class,
        plates: input.plates,
        steel_only: input.steel_only,
        nominal_gap_m,
        depth_m: mm(input.depth_mm),
        outer_width_m: ws * 0.1 + 0.05,
        inner_width_m: ws * 0.1 - 0.07,
        optimal_gap_m,
        spacer,
        tooth_delta,
        all_teeth: BASE_TEETH + tooth_delta,
    };

    debug!(
        inner_width_m = config.inner_width_m,
        optimal_gap_m = config.optimal_gap_m,
        spacer = config.spacer.material().display_name(),
        all_teeth = config.all_teeth,
        "configuration resolved"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(gap_mm: f64, depth_mm: f64, plates: PlateSpacerPair) -> ScreenInput {
        ScreenInput::new(WidthClass::new(10).unwrap(), HeightClass::H21, gap_mm, depth_mm, plates)
    }

    #[test]
    fn test_steel_spacer_widens_gap() {
        let config = resolve(&input(6.0, 1000.0, PlateSpacerPair::Fixed3Moving3Steel)).unwrap();
        assert!((config.optimal_gap_m - 0.006_36).abs() < 1e-12);
        assert!((config.inner_width_m - 0.93).abs() < 1e-12);
        assert!((config.outer_width_m - 1.05).abs() < 1e-12);
        assert_eq!(config.spacer.designation(), None);
        assert!((config.spacer.thickness_m() - 0.006).abs() < 1e-12);
    }

    #[test]
    fn test_plastic_spacer_keeps_gap() {
        let config = resolve(&input(3.0, 500.0, PlateSpacerPair::Fixed2Moving3Plastic)).unwrap();
        assert!((config.optimal_gap_m - 0.003).abs() < 1e-12);
        assert_eq!(config.spacer.designation(), Some("RSK130921.001-01"));
        assert!((config.spacer.mass_kg() - 0.002_56).abs() < 1e-12);
    }

    #[test]
    fn test_non_standard_plastic_gap() {
        let err = resolve(&input(5.0, 1000.0, PlateSpacerPair::Fixed2Moving2Plastic)).unwrap_err();
        match err {
            CalcError::NonStandardGap { valid_gaps_mm, .. } => assert_eq!(valid_gaps_mm, vec![3.0, 6.0]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_depth_checked_first() {
        // Non-standard gap as well, but depth wins
        let err = resolve(&input(5.0, 0.0, PlateSpacerPair::Fixed2Moving3Plastic)).unwrap_err();
        assert_eq!(err, CalcError::InvalidDepth { depth_mm: 0.0 });
        assert!(matches!(
            resolve(&input(6.0, -10.0, PlateSpacerPair::Fixed3Moving3Steel)),
            Err(CalcError::InvalidDepth { .. })
        ));
    }

    #[test]
    fn test_gap_must_be_positive() {
        let err = resolve(&input(0.0, 1000.0, PlateSpacerPair::Fixed3Moving3Steel)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_tooth_count() {
        let mut raw = input(6.0, 1000.0, PlateSpacerPair::Fixed3Moving3Steel);
        raw.height_class = HeightClass::H06;
        let config = resolve(&raw).unwrap();
        assert_eq!(config.tooth_delta, -19);
        assert_eq!(config.all_teeth, 22);
    }

    #[test]
    fn test_input_json_defaults() {
        let json = r#"{
            "width_class": 13,
            "height_class": 12,
            "nominal_gap_mm": 6,
            "depth_mm": 1000,
            "plates": "2/2 plastic"
        }"#;
        let parsed: ScreenInput = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.label, "");
        assert!(!parsed.steel_only);
        assert_eq!(parsed.designation(), "RSK 1312");
    }
}
