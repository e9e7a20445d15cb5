//! # Result Report
//!
//! The human-readable result listing as an ordered list of message keys with
//! arguments. Front ends look the keys up in their own message catalog; an
//! English rendering is built in for the command line.
//!
//! Arguments carry raw values in display units (mm, kg, kW, rpm, N·m). The
//! precision a line is printed with belongs to the renderer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calculations::config::SpacerChoice;
use crate::calculations::geometry::{PLASTIC_SHEET_LENGTH_M, PLASTIC_SHEET_WIDTH_M};
use crate::calculations::StepScreen;
use crate::mathutils::format_general;
use crate::units::to_mm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKey {
    Blank,
    Header,
    Weight,
    DrivelessWeight,
    Drive,
    DriveUndefined,
    ExternalWidth,
    InternalWidth,
    DropWidth,
    FullDropHeight,
    DropHeight,
    ScreenHeight,
    ScreenLength,
    HorizontalLength,
    AxisDistance,
    TurningRadius,
    ForDesigner,
    MinSideGap,
    PlasticSpacers,
    SteelSpacers,
    MovingCount,
    FixedCount,
    SteelThickness,
    PlasticThickness,
    PlasticSheet,
    MovingWeight,
    PlasticWeight,
    MinTorque,
    EquationFile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportArg {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl fmt::Display for ReportArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportArg::Integer(n) => write!(f, "{}", n),
            ReportArg::Number(x) => write!(f, "{}", format_general(*x)),
            ReportArg::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLine {
    pub key: ReportKey,
    pub args: Vec<ReportArg>,
}

impl ReportLine {
    fn new(key: ReportKey, args: Vec<ReportArg>) -> Self {
        ReportLine { key, args }
    }

    fn bare(key: ReportKey) -> Self {
        ReportLine { key, args: Vec::new() }
    }

    /// Catalog key as used by message lookups
    pub fn key_name(&self) -> String {
        serde_json::to_value(self.key)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    }
}

fn mm_arg(meters: f64) -> ReportArg {
    ReportArg::Number(to_mm(meters))
}

fn int_arg(n: impl Into<i64>) -> ReportArg {
    ReportArg::Integer(n.into())
}

/// Build the ordered result listing for a screen.
pub fn report_lines(screen: &StepScreen) -> Vec<ReportLine> {
    use ReportKey::*;

    let config = &screen.config;
    let g = &screen.geometry;
    let s = &screen.shape;
    let w = &screen.weights;

    let mut lines = vec![ReportLine::new(
        Header,
        vec![
            int_arg(config.width_class.code()),
            int_arg(config.height_class.code()),
            mm_arg(g.gap_m),
            mm_arg(g.fixed.steel.thickness_m),
            mm_arg(g.moving.steel.thickness_m),
            mm_arg(config.depth_m),
        ],
    )];

    match &screen.drive {
        Some(drive) => {
            lines.push(ReportLine::new(Weight, vec![ReportArg::Number(w.full)]));
            lines.push(ReportLine::new(
                Drive,
                vec![
                    ReportArg::Text(drive.designation.to_string()),
                    ReportArg::Number(drive.power.0),
                    ReportArg::Number(drive.speed.0),
                    ReportArg::Number(drive.torque.0),
                ],
            ));
        }
        None => {
            lines.push(ReportLine::new(DrivelessWeight, vec![ReportArg::Number(w.full)]));
            lines.push(ReportLine::bare(DriveUndefined));
        }
    }

    lines.push(ReportLine::bare(Blank));
    for (key, meters) in [
        (ExternalWidth, config.outer_width_m),
        (InternalWidth, config.inner_width_m),
        (DropWidth, s.drop_width_m),
        (FullDropHeight, s.full_drop_height_m),
        (DropHeight, s.drop_height_m),
        (ScreenHeight, s.height_m),
        (ScreenLength, s.length_m),
        (HorizontalLength, s.horizontal_length_m),
        (AxisDistance, s.axis_x_m),
        (TurningRadius, s.turning_radius_m),
    ] {
        lines.push(ReportLine::new(key, vec![mm_arg(meters)]));
    }

    lines.push(ReportLine::bare(Blank));
    lines.push(ReportLine::bare(ForDesigner));
    lines.push(ReportLine::bare(Blank));
    lines.push(ReportLine::new(MinSideGap, vec![mm_arg(g.min_side_gap_m)]));
    match &config.spacer {
        SpacerChoice::Plastic { designation, .. } => lines.push(ReportLine::new(
            PlasticSpacers,
            vec![int_arg(g.spacer_count), ReportArg::Text(designation.clone())],
        )),
        SpacerChoice::Steel { .. } => lines.push(ReportLine::new(SteelSpacers, vec![int_arg(g.spacer_count)])),
    }

    for (count_key, count, plate) in [(MovingCount, g.moving_count, &g.moving), (FixedCount, g.fixed_count, &g.fixed)] {
        lines.push(ReportLine::new(count_key, vec![int_arg(count)]));
        lines.push(ReportLine::new(SteelThickness, vec![mm_arg(plate.steel.thickness_m)]));
        if let Some(plastic) = plate.plastic {
            lines.push(ReportLine::new(PlasticThickness, vec![mm_arg(plastic.thickness_m)]));
        }
    }

    for usage in &g.plastic_sheets {
        lines.push(ReportLine::new(
            PlasticSheet,
            vec![
                mm_arg(usage.thickness_m),
                int_arg(usage.sheets),
                ReportArg::Number(PLASTIC_SHEET_WIDTH_M),
                ReportArg::Number(PLASTIC_SHEET_LENGTH_M),
            ],
        ));
    }

    lines.push(ReportLine::new(MovingWeight, vec![ReportArg::Number(w.moving)]));
    lines.push(ReportLine::new(PlasticWeight, vec![ReportArg::Number(w.plastic)]));
    lines.push(ReportLine::new(MinTorque, vec![ReportArg::Number(screen.required_torque_nm)]));
    lines.push(ReportLine::bare(Blank));
    lines.push(ReportLine::bare(EquationFile));
    lines.push(ReportLine::bare(Blank));
    lines
}

fn heading(text: &str) -> String {
    format!("====== {} ======", text)
}

/// Render one line in English.
pub fn render_english(line: &ReportLine) -> String {
    use ReportArg::{Integer as I, Number as N, Text as T};
    use ReportKey::*;

    match (line.key, line.args.as_slice()) {
        (Blank, _) => String::new(),
        (Header, [I(ws), I(hs), N(gap), N(fixed), N(moving), N(depth)]) => format!(
            "RSK {:02}{:02}, actual gap {:.2} ({}/{}), depth {} mm",
            ws,
            hs,
            gap,
            format_general(*fixed),
            format_general(*moving),
            format_general(*depth)
        ),
        (Weight, [N(kg)]) => format!("Screen weight {:.0} kg", kg),
        (DrivelessWeight, [N(kg)]) => format!("Screen weight {:.0} kg (without drive)", kg),
        (Drive, [T(name), N(kw), N(rpm), N(nm)]) => format!(
            "Drive unit «{}»  {} kW; {} rpm; {} Nm",
            name,
            format_general(*kw),
            format_general(*rpm),
            format_general(*nm)
        ),
        (DriveUndefined, _) => "Undefined drive unit".to_string(),
        (ExternalWidth, [N(v)]) => format!("External width, B = {:.0} mm", v),
        (InternalWidth, [N(v)]) => format!("Internal width, A = {:.0} mm", v),
        (DropWidth, [N(v)]) => format!("Drop width, G = {:.0} mm", v),
        (FullDropHeight, [N(v)]) => format!("Drop height from the channel bottom, H1 = {:.0} mm", v),
        (DropHeight, [N(v)]) => format!("Drop height from the channel top, H4 = {:.0} mm", v),
        (ScreenHeight, [N(v)]) => format!("Screen height, H2 = {:.0} mm", v),
        (ScreenLength, [N(v)]) => format!("Screen length, L = {:.0} mm", v),
        (HorizontalLength, [N(v)]) => format!("Horizontal length, D = {:.0} mm", v),
        (AxisDistance, [N(v)]) => format!("Distance to axis, F = {:.0} mm", v),
        (TurningRadius, [N(v)]) => format!("Turning radius, R = {:.0} mm", v),
        (ForDesigner, _) => heading("For designer"),
        (MinSideGap, [N(v)]) => format!("Minimal side gap {:.2} mm", v),
        (PlasticSpacers, [I(count), T(designation)]) => format!("Spacers ≈{} pcs. «{}»", count, designation),
        (SteelSpacers, [I(count)]) => format!("Spacers ≈{} pcs. (welded)", count),
        (MovingCount, [I(count)]) => format!("Moving plates {} pcs.", count),
        (FixedCount, [I(count)]) => format!("Fixed plates {} pcs.", count),
        (SteelThickness, [N(v)]) => format!("- steel {} mm", format_general(*v)),
        (PlasticThickness, [N(v)]) => format!("- plastic {} mm", format_general(*v)),
        (PlasticSheet, [N(s), I(count), N(width), N(length)]) => format!(
            "Polypropylene PP-C {} mm - {} sheets {:.1}x{:.1}",
            format_general(*s),
            count,
            width,
            length
        ),
        (MovingWeight, [N(kg)]) => format!("Moving part weight {:.0} kg", kg),
        (PlasticWeight, [N(kg)]) => format!("Plastic weight {:.0} kg", kg),
        (MinTorque, [N(nm)]) => format!("Minimal torque {:.0} Nm", nm),
        (EquationFile, _) => heading("Equation file"),
        (_, args) => {
            let rendered: Vec<String> = args.iter().map(ToString::to_string).collect();
            format!("{} {}", line.key_name(), rendered.join(" "))
        }
    }
}

/// Render a whole listing in English, one line per entry.
pub fn render_report(lines: &[ReportLine]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(&render_english(line));
        text.push('\n');
    }
    text
}
