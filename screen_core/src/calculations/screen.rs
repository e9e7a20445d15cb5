//! # Step Screen Calculation
//!
//! Runs the stages in order and bundles their outputs:
//!
//! 1. [`config::resolve`] validates the selection and picks the spacer
//! 2. [`geometry::resolve`] splits and fits the plates
//! 3. [`shape::resolve`] computes dimensions and rejects too-deep channels
//! 4. [`weights::aggregate`] sums component masses
//! 5. [`drive::select_drive`] picks the drive unit
//!
//! The first failing stage ends the calculation; nothing partial is
//! returned.
//!
//! ## Example
//!
//! ```rust
//! use screen_core::calculations::{calculate, ScreenInput};
//! use screen_core::catalog::{HeightClass, PlateSpacerPair, WidthClass};
//!
//! let input = ScreenInput::new(
//!     WidthClass::new(10).unwrap(),
//!     HeightClass::H21,
//!     6.0,
//!     1000.0,
//!     PlateSpacerPair::Fixed3Moving3Steel,
//! )
//! .with_steel_only(true);
//!
//! let screen = calculate(&input).unwrap();
//! assert_eq!(screen.geometry.moving_count, 49);
//! assert_eq!(screen.drive.as_ref().map(|d| &*d.designation), Some("SK9032.1-90LP"));
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::config::{self, ResolvedConfig, ScreenInput};
use super::drive;
use super::geometry::{self, PlateGeometry};
use super::shape::{self, ShapeMetrics};
use super::weights::{self, WeightBreakdown};
use crate::catalog::DriveUnit;
use crate::equations::{emit, EquationVariable};
use crate::errors::{CalcResult, FailureMessage};

/// Complete result for one screen configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepScreen {
    pub input: ScreenInput,
    pub config: ResolvedConfig,
    pub geometry: PlateGeometry,
    pub shape: ShapeMetrics,
    pub weights: WeightBreakdown,
    /// Minimum drive torque in N·m
    pub required_torque_nm: f64,
    /// Selected catalog drive, `None` when a custom drive is needed
    pub drive: Option<DriveUnit>,
}

/// Flat record for tabular reporting. Lengths in mm, masses in kg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub width_class: u8,
    pub height_class: u8,
    pub gap_mm: f64,
    pub fixed_thickness_mm: f64,
    pub moving_thickness_mm: f64,
    pub depth_mm: f64,
    pub full_kg: f64,
    pub plateless_kg: f64,
    pub moving_kg: f64,
    pub required_torque_nm: f64,
    pub drive: Option<String>,
    pub drive_power_kw: Option<f64>,
}

impl StepScreen {
    pub fn summary(&self) -> SummaryRow {
        SummaryRow {
            width_class: self.config.width_class.code(),
            height_class: self.config.height_class.code(),
            gap_mm: self.geometry.gap_m * 1e3,
            fixed_thickness_mm: self.config.plates.fixed_mm(),
            moving_thickness_mm: self.config.plates.moving_mm(),
            depth_mm: self.input.depth_mm,
            full_kg: self.weights.full,
            plateless_kg: self.weights.plateless,
            moving_kg: self.weights.moving,
            required_torque_nm: self.required_torque_nm,
            drive: self.drive.as_ref().map(|d| d.designation.to_string()),
            drive_power_kw: self.drive.as_ref().map(|d| d.power.0),
        }
    }

    /// Ordered equation variables for CAD parametrization
    pub fn equations(&self) -> Vec<EquationVariable> {
        emit(self)
    }
}

/// Calculate a step screen.
#[instrument(
    level = "debug",
    skip(input),
    fields(ws = input.width_class.code(), hs = input.height_class.code())
)]
pub fn calculate(input: &ScreenInput) -> CalcResult<StepScreen> {
    let result = run_stages(input);
    if let Err(err) = &result {
        debug!(code = err.error_code(), "calculation rejected");
    }
    result
}

fn run_stages(input: &ScreenInput) -> CalcResult<StepScreen> {
    let config = config::resolve(input)?;
    let geometry = geometry::resolve(&config)?;
    let shape = shape::resolve(&config, &geometry)?;
    let weights = weights::aggregate(&config, &geometry, &shape);

    let required_torque_nm = drive::required_torque(weights.moving);
    let drive = drive::select_drive(config.width_class, required_torque_nm).cloned();
    let weights = weights.with_drive(drive.as_ref().map_or(0.0, |d| d.mass.0));

    Ok(StepScreen {
        input: input.clone(),
        config,
        geometry,
        shape,
        weights,
        required_torque_nm,
        drive,
    })
}

/// Outcome handed to front ends: either the result with its equation
/// variables, or the failure messages to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RunOutcome {
    Completed {
        screen: Box<StepScreen>,
        equations: Vec<EquationVariable>,
    },
    Failed {
        failures: Vec<FailureMessage>,
    },
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. })
    }
}

/// Calculate and emit equations, collecting failures as messages.
pub fn run(input: &ScreenInput) -> RunOutcome {
    match calculate(input) {
        Ok(screen) => {
            let equations = emit(&screen);
            RunOutcome::Completed {
                screen: Box::new(screen),
                equations,
            }
        }
        Err(err) => RunOutcome::Failed {
            failures: vec![FailureMessage::from(&err)],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{HeightClass, PlateSpacerPair, WidthClass};
    use crate::errors::CalcError;

    fn input(ws: u8, hs: HeightClass, gap_mm: f64, depth_mm: f64, plates: PlateSpacerPair) -> ScreenInput {
        ScreenInput::new(WidthClass::new(ws).unwrap(), hs, gap_mm, depth_mm, plates)
    }

    #[test]
    fn test_steel_only_reference() {
        let screen = calculate(&input(10, HeightClass::H21, 6.0, 1000.0, PlateSpacerPair::Fixed3Moving3Steel).with_steel_only(true)).unwrap();
        assert!((screen.required_torque_nm - 986.374_233_846_050_3).abs() < 1e-6);
        let drive = screen.drive.as_ref().unwrap();
        assert_eq!(drive.designation, "SK9032.1-90LP");
        assert_eq!(screen.weights.drive, 75.0);
        assert!((screen.weights.full - 2187.723_993_950_4).abs() < 1e-6);
    }

    #[test]
    fn test_custom_drive_needed() {
        let screen = calculate(&input(22, HeightClass::H30, 3.0, 1200.0, PlateSpacerPair::Fixed2Moving2Steel).with_steel_only(true)).unwrap();
        assert!(screen.drive.is_none());
        assert!((screen.required_torque_nm - 2707.730_787_706_681_4).abs() < 1e-6);
        assert!((screen.weights.full - 5342.052_946_601_05).abs() < 1e-6);
        assert_eq!(screen.weights.drive, 0.0);
        assert_eq!(screen.summary().drive, None);
    }

    #[test]
    fn test_summary_row() {
        let screen = calculate(&input(13, HeightClass::H12, 6.0, 1000.0, PlateSpacerPair::Fixed2Moving2Plastic).with_steel_only(true)).unwrap();
        let row = screen.summary();
        assert_eq!(row.width_class, 13);
        assert_eq!(row.height_class, 12);
        assert!((row.gap_mm - 6.0).abs() < 1e-9);
        assert_eq!(row.fixed_thickness_mm, 2.0);
        assert_eq!(row.depth_mm, 1000.0);
        assert!((row.full_kg - 1787.668_640_580_289_3).abs() < 1e-6);
        assert!((row.plateless_kg - 832.254_168_580_289_3).abs() < 1e-6);
        assert_eq!(row.drive.as_deref(), Some("SK9032.1-90SP"));
        assert_eq!(row.drive_power_kw, Some(1.1));
    }

    #[test]
    fn test_run_failure_messages() {
        match run(&input(10, HeightClass::H06, 6.0, 2000.0, PlateSpacerPair::Fixed3Moving3Steel)) {
            RunOutcome::Failed { failures } => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].key, "too_deep");
                assert_eq!(failures[0].args, vec!["891".to_string()]);
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_run_completed() {
        let outcome = run(&input(10, HeightClass::H21, 6.0, 1000.0, PlateSpacerPair::Fixed3Moving3Steel));
        assert!(outcome.is_completed());
        if let RunOutcome::Completed { screen, equations } = outcome {
            assert_eq!(equations, screen.equations());
            assert_eq!(equations[0].name, "inner_width");
        }
    }

    #[test]
    fn test_idempotent() {
        let raw = input(5, HeightClass::H09, 5.0, 800.0, PlateSpacerPair::Fixed2Moving2Steel);
        assert_eq!(calculate(&raw).unwrap(), calculate(&raw).unwrap());
    }

    #[test]
    fn test_invalid_depth_beats_everything() {
        let err = calculate(&input(10, HeightClass::H21, 6.0, 0.0, PlateSpacerPair::Fixed3Moving3Steel)).unwrap_err();
        assert_eq!(err, CalcError::InvalidDepth { depth_mm: 0.0 });
    }
}
