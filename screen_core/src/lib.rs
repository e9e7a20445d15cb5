//! # screen_core - Step Screen Calculation Engine
//!
//! `screen_core` sizes a step screen (a mechanically raked bar screen for
//! wastewater channels) from a handful of catalog choices: width class,
//! height class, nominal gap, channel depth and the plate/spacer pairing.
//! It produces plate geometry, overall dimensions, masses, the drive unit and
//! the variable set for the CAD model.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every evaluation is a pure function of its input
//! - **JSON-First**: inputs and outputs implement Serialize/Deserialize
//! - **Rich Errors**: failures carry a stable message key and arguments
//!
//! ## Quick Start
//!
//! ```rust
//! use screen_core::calculations::{run, ScreenInput};
//! use screen_core::catalog::{HeightClass, PlateSpacerPair, WidthClass};
//!
//! let input = ScreenInput::new(
//!     WidthClass::new(10).unwrap(),
//!     HeightClass::H21,
//!     6.0,
//!     1000.0,
//!     PlateSpacerPair::Fixed3Moving3Steel,
//! );
//! let outcome = run(&input);
//! assert!(outcome.is_completed());
//!
//! let json = serde_json::to_string_pretty(&outcome).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - the pipeline stages and the `calculate`/`run` entry points
//! - [`catalog`] - size classes, spacers, plastic plates and drive units
//! - [`equations`] - the CAD equation file
//! - [`report`] - the human-readable result listing
//! - [`units`] - type-safe unit wrappers
//! - [`mathutils`] - tolerant comparisons and rounding helpers
//! - [`errors`] - structured error types
//! - [`file_io`] - JSON input and atomic output files

pub mod calculations;
pub mod catalog;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod mathutils;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, run, RunOutcome, ScreenInput, StepScreen, SummaryRow};
pub use errors::{CalcError, CalcResult, FailureMessage};
pub use file_io::{load_input, load_result, save_equation_file, save_result};
pub use report::{render_report, report_lines, ReportLine};
