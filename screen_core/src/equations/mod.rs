//! # Equation File
//!
//! Derived variables for CAD parametrization. The CAD assembly reads an
//! "equation file" of `"name" = value` lines and drives its dimensions from
//! them, so this module is a stable contract: variable names, unit suffixes,
//! number formats and order never change.
//!
//! ## Modules
//!
//! - [`registry`] - the variable set with names, descriptions and formats
//! - [`bolts`] - bolt row and discharge window layouts
//! - [`emitter`] - building and rendering the ordered variable list
//!
//! ## Number formats
//!
//! - **General**: shortest form with 6 significant digits (`930`, `413.5`)
//! - **Fixed3**: three decimals (`6.520`)
//! - **Count**: integer without unit

pub mod bolts;
pub mod emitter;
pub mod registry;

pub use bolts::{fit_bolts, BoltLayout, BoltPattern, DischargeWindows};
pub use emitter::{emit, render_equation_file, EquationValue, EquationVariable};
pub use registry::{ValueFormat, Variable, VariableMetadata};
