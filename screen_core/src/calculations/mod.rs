//! # Screen Calculations
//!
//! The calculation pipeline, one module per stage. Each stage follows the
//! pattern:
//!
//! - a JSON-serializable output record
//! - `resolve(...) -> CalcResult<Record>` (or a plain function when the stage
//!   cannot fail), pure and free of I/O
//!
//! [`screen::calculate`] chains them; [`screen::run`] adds the equation
//! variables and turns errors into failure messages.
//!
//! ## Stages
//!
//! - [`config`] - input validation, spacer choice, tooth count
//! - [`geometry`] - plate split and pitch fitting
//! - [`shape`] - heights, lengths, beams, depth check
//! - [`weights`] - component and aggregate masses
//! - [`drive`] - required torque and drive unit

pub mod config;
pub mod drive;
pub mod geometry;
pub mod screen;
pub mod shape;
pub mod weights;

// Re-export commonly used types
pub use config::{ResolvedConfig, ScreenInput, SpacerChoice};
pub use geometry::{PlasticSheetUsage, Plate, PlateGeometry, PlatePart, PlatePolicy};
pub use screen::{calculate, run, RunOutcome, StepScreen, SummaryRow};
pub use shape::ShapeMetrics;
pub use weights::{ComponentMasses, PlateMass, WeightBreakdown};
