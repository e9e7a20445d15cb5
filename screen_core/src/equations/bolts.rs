//! # Bolt Patterns
//!
//! Evenly spaced bolt rows across the inner width. Every row follows the same
//! rule: use as few bolts as possible without exceeding a maximum pitch, then
//! spread them evenly over the span.

use serde::{Deserialize, Serialize};

use crate::mathutils::{is_more, round_to};

/// Plate mounting bolts: sidewall to outermost bolt, approximately
const PMB_APPROX_START_M: f64 = 0.040;
const PMB_MAX_STEP_M: f64 = 0.284;

/// Discharge bolts: inner width minus this is the bolt span
const DPB_INSET_M: f64 = 0.045;
const DPB_MAX_STEP_M: f64 = 0.25;

/// Discharge cover bolts (lengthwise)
const DPC_INSET_M: f64 = 0.103;
const DPC_MAX_STEP_M: f64 = 0.55;

/// Discharge windows: edge margin, bridge between windows
const DPW_MARGIN_M: f64 = 0.055;
const DPW_BRIDGE_M: f64 = 0.1;
/// Widest screen with a single discharge window
const DPW_SINGLE_MAX_WIDTH: u8 = 12;

/// A row of evenly spaced bolts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoltPattern {
    pub count: u32,
    pub pitch_m: f64,
}

impl BoltPattern {
    /// Distance between the outermost bolts
    pub fn extent_m(&self) -> f64 {
        f64::from(self.count - 1) * self.pitch_m
    }
}

/// Fit a bolt row over `span_m` with pitch at most `max_pitch_m`.
///
/// The pitch is rounded to `decimals` places (in metres) when given, so the
/// extent may differ slightly from the span.
pub fn fit_bolts(span_m: f64, max_pitch_m: f64, decimals: Option<u32>) -> BoltPattern {
    let ratio = span_m / max_pitch_m;
    let mut steps = ratio.floor().max(0.0);
    if is_more(ratio, steps) {
        steps += 1.0;
    }
    let steps = steps.max(1.0) as u32;
    let pitch_m = span_m / f64::from(steps);
    BoltPattern {
        count: steps + 1,
        pitch_m: decimals.map_or(pitch_m, |d| round_to(pitch_m, d)),
    }
}

/// Discharge hopper windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DischargeWindows {
    pub count: u32,
    pub width_m: f64,
    pub step_m: f64,
}

/// All bolt and window layouts for one screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoltLayout {
    pub plate_mounting: BoltPattern,
    /// Sidewall to the outermost plate mounting bolt
    pub plate_mounting_start_m: f64,
    pub discharge: BoltPattern,
    pub discharge_cover: BoltPattern,
    pub windows: DischargeWindows,
}

impl BoltLayout {
    pub fn compute(inner_width_m: f64, width_class: u8) -> Self {
        let plate_mounting = fit_bolts(inner_width_m - 2.0 * PMB_APPROX_START_M, PMB_MAX_STEP_M, Some(2));
        let plate_mounting_start_m = (inner_width_m - plate_mounting.extent_m()) / 2.0;

        let discharge = fit_bolts(inner_width_m - DPB_INSET_M, DPB_MAX_STEP_M, Some(3));
        let discharge_cover = fit_bolts(inner_width_m - DPC_INSET_M, DPC_MAX_STEP_M, None);

        let count: u32 = if width_class <= DPW_SINGLE_MAX_WIDTH { 1 } else { 2 };
        let width_m = (inner_width_m - 2.0 * DPW_MARGIN_M - DPW_BRIDGE_M * f64::from(count - 1)) / f64::from(count);

        BoltLayout {
            plate_mounting,
            plate_mounting_start_m,
            discharge,
            discharge_cover,
            windows: DischargeWindows {
                count,
                width_m,
                step_m: width_m + DPW_BRIDGE_M,
            },
        }
    }
}
