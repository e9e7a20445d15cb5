//! # Equation File Emitter
//!
//! Turns a finished [`StepScreen`] into the ordered variable list and renders
//! it in the equation file syntax understood by the CAD tooling:
//!
//! ```text
//! "main_gap" = 6.520mm  ''Gap between plates
//! "teeth_number" = 41  ''Number of plate teeth (for the pattern)
//! ```

use serde::{Deserialize, Serialize};

use super::bolts::BoltLayout;
use super::registry::{ValueFormat, Variable};
use crate::calculations::config::SpacerChoice;
use crate::calculations::StepScreen;
use crate::mathutils::format_general;
use crate::units::to_mm;

/// Value of one variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquationValue {
    /// Length in millimetres
    Length(f64),
    Count(i64),
}

/// One line of the equation file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationVariable {
    pub name: String,
    pub value: EquationValue,
    pub format: ValueFormat,
    pub description: String,
}

impl EquationVariable {
    fn new(variable: Variable, value: EquationValue) -> Self {
        let meta = variable.metadata();
        EquationVariable {
            name: meta.name.to_string(),
            value,
            format: meta.format,
            description: meta.description.to_string(),
        }
    }

    /// Value with its unit suffix, e.g. `6.520mm`
    pub fn formatted_value(&self) -> String {
        let number = match (self.value, self.format) {
            (EquationValue::Count(n), _) => n.to_string(),
            (EquationValue::Length(mm), ValueFormat::Fixed3) => format!("{:.3}", mm),
            (EquationValue::Length(mm), _) => format_general(mm),
        };
        format!("{}{}", number, self.format.unit())
    }

    /// Full equation file line
    pub fn render(&self) -> String {
        format!("\"{}\" = {}  ''{}", self.name, self.formatted_value(), self.description)
    }
}

fn length(variable: Variable, meters: f64) -> EquationVariable {
    EquationVariable::new(variable, EquationValue::Length(to_mm(meters)))
}

fn count(variable: Variable, n: impl Into<i64>) -> EquationVariable {
    EquationVariable::new(variable, EquationValue::Count(n.into()))
}

/// Derive the ordered equation variables for a screen.
pub fn emit(screen: &StepScreen) -> Vec<EquationVariable> {
    let config = &screen.config;
    let g = &screen.geometry;
    let bolts = BoltLayout::compute(config.inner_width_m, config.width_class.code());

    let mut out = vec![
        length(Variable::InnerWidth, config.inner_width_m),
        length(Variable::ThicknessFixed, g.fixed.steel.thickness_m),
        length(Variable::ThicknessMoving, g.moving.steel.thickness_m),
        length(Variable::MainGap, g.gap_m),
        count(Variable::TeethNumber, config.all_teeth),
    ];
    if let Some(plastic) = g.fixed.plastic {
        out.push(length(Variable::PlasticFixed, plastic.thickness_m));
    }
    if let Some(plastic) = g.moving.plastic {
        out.push(length(Variable::PlasticMoving, plastic.thickness_m));
    }
    out.extend([
        length(Variable::Step, g.step_m),
        count(Variable::NumberFixed, g.fixed_count),
        count(Variable::NumberMoving, g.moving_count),
        length(Variable::SideGap, g.side_gap_m),
        length(Variable::StartFixed, g.fixed_start_m),
        length(Variable::StartMoving, g.moving_start_m),
    ]);
    if let SpacerChoice::Steel { thickness_m, .. } = config.spacer {
        out.push(length(Variable::GapLimiterThickness, thickness_m));
    }
    out.extend([
        length(Variable::BottomSpacerThickness, g.bottom_spacer_thickness_m),
        count(Variable::PmbNumber, bolts.plate_mounting.count),
        length(Variable::PmbStep, bolts.plate_mounting.pitch_m),
        length(Variable::PmbStart, bolts.plate_mounting_start_m),
        length(Variable::DpbMaxSize, bolts.discharge.extent_m()),
        count(Variable::DpbCount, bolts.discharge.count),
        length(Variable::DpbStep, bolts.discharge.pitch_m),
        length(Variable::DpcStep, bolts.discharge_cover.pitch_m),
        count(Variable::DpcCount, bolts.discharge_cover.count),
        length(Variable::DpwWidth, bolts.windows.width_m),
        length(Variable::DpwStep, bolts.windows.step_m),
        count(Variable::DpwCount, bolts.windows.count),
    ]);
    out
}

/// Render the equation file, one variable per line.
pub fn render_equation_file(variables: &[EquationVariable]) -> String {
    let mut text = String::new();
    for variable in variables {
        text.push_str(&variable.render());
        text.push('\n');
    }
    text
}
