//! # Variable Registry
//!
//! The fixed set of named variables written to the equation file. CAD models
//! bind to these names, so names, units and order must not change.
//!
//! ## Usage
//!
//! ```rust
//! use screen_core::equations::registry::{Variable, ValueFormat};
//!
//! let meta = Variable::MainGap.metadata();
//! assert_eq!(meta.name, "main_gap");
//! assert_eq!(meta.format, ValueFormat::Fixed3);
//! ```

use serde::{Deserialize, Serialize};

/// How a value is printed in the equation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    /// Length in mm, shortest form with 6 significant digits
    General,
    /// Length in mm, three decimals
    Fixed3,
    /// Plain integer, no unit
    Count,
}

impl ValueFormat {
    /// Unit suffix written right after the value
    pub fn unit(&self) -> &'static str {
        match self {
            ValueFormat::General | ValueFormat::Fixed3 => "mm",
            ValueFormat::Count => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableMetadata {
    /// Name as written in the file (without quotes)
    pub name: &'static str,
    pub description: &'static str,
    pub format: ValueFormat,
}

/// Every equation file variable, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variable {
    InnerWidth,
    ThicknessFixed,
    ThicknessMoving,
    MainGap,
    TeethNumber,
    /// Only with plastic on the fixed plates
    PlasticFixed,
    /// Only with plastic on the moving plates
    PlasticMoving,
    Step,
    NumberFixed,
    NumberMoving,
    SideGap,
    StartFixed,
    StartMoving,
    /// Only with welded steel spacers
    GapLimiterThickness,
    BottomSpacerThickness,
    PmbNumber,
    PmbStep,
    PmbStart,
    DpbMaxSize,
    DpbCount,
    DpbStep,
    DpcStep,
    DpcCount,
    DpwWidth,
    DpwStep,
    DpwCount,
}

impl Variable {
    pub const ALL: [Variable; 26] = [
        Variable::InnerWidth,
        Variable::ThicknessFixed,
        Variable::ThicknessMoving,
        Variable::MainGap,
        Variable::TeethNumber,
        Variable::PlasticFixed,
        Variable::PlasticMoving,
        Variable::Step,
        Variable::NumberFixed,
        Variable::NumberMoving,
        Variable::SideGap,
        Variable::StartFixed,
        Variable::StartMoving,
        Variable::GapLimiterThickness,
        Variable::BottomSpacerThickness,
        Variable::PmbNumber,
        Variable::PmbStep,
        Variable::PmbStart,
        Variable::DpbMaxSize,
        Variable::DpbCount,
        Variable::DpbStep,
        Variable::DpcStep,
        Variable::DpcCount,
        Variable::DpwWidth,
        Variable::DpwStep,
        Variable::DpwCount,
    ];

    pub fn metadata(&self) -> VariableMetadata {
        use ValueFormat::*;

        let (name, description, format) = match self {
            Variable::InnerWidth => ("inner_width", "Internal screen width", General),
            Variable::ThicknessFixed => ("thickness_fixed", "Fixed steel plate thickness", General),
            Variable::ThicknessMoving => ("thickness_moving", "Moving steel plate thickness", General),
            Variable::MainGap => ("main_gap", "Gap between plates", Fixed3),
            Variable::TeethNumber => ("teeth_number", "Number of plate teeth (for the pattern)", Count),
            Variable::PlasticFixed => ("plastic_fixed", "Fixed plastic plate thickness", General),
            Variable::PlasticMoving => ("plastic_moving", "Moving plastic plate thickness", General),
            Variable::Step => ("step", "Step between plates of one kind", Fixed3),
            Variable::NumberFixed => ("number_fixed", "Number of fixed plates", Count),
            Variable::NumberMoving => ("number_moving", "Number of moving plates", Count),
            Variable::SideGap => ("side_gap", "Gap between sidewall and outermost plate", Fixed3),
            Variable::StartFixed => ("start_fixed", "Distance from sidewall to the middle of the fixed plate", Fixed3),
            Variable::StartMoving => (
                "start_moving",
                "Distance from sidewall to the middle of the moving plate",
                Fixed3,
            ),
            Variable::GapLimiterThickness => ("gap_limiter_thickness", "Plate spacer thickness", General),
            Variable::BottomSpacerThickness => ("bottom_spacer_thickness", "Bottom spacer thickness", General),
            Variable::PmbNumber => ("pmb_number", "Plate mounting bolts: number of bolts", Count),
            Variable::PmbStep => ("pmb_step", "Plate mounting bolts: step between bolts", General),
            Variable::PmbStart => (
                "pmb_start",
                "Plate mounting bolts: distance from sidewall to the outermost bolt",
                General,
            ),
            Variable::DpbMaxSize => ("dpb_max_size", "Discharge bolts: distance between outermost bolts", General),
            Variable::DpbCount => ("dpb_count", "Discharge bolts: number of bolts", Count),
            Variable::DpbStep => ("dpb_step", "Discharge bolts: step between bolts", General),
            Variable::DpcStep => ("dpc_step", "Discharge cover: step between bolts (lengthwise)", General),
            Variable::DpcCount => ("dpc_count", "Discharge cover: number of bolts (lengthwise)", Count),
            Variable::DpwWidth => ("dpw_width", "Discharge window: window width", General),
            Variable::DpwStep => ("dpw_step", "Discharge window: window step", General),
            Variable::DpwCount => ("dpw_count", "Discharge window: number of windows", Count),
        };

        VariableMetadata {
            name,
            description,
            format,
        }
    }

    pub fn name(&self) -> &'static str {
        self.metadata().name
    }

}
