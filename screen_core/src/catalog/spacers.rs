//! Gap limiters between adjacent plates.
//!
//! Plastic spacers are bought parts and only exist for a couple of nominal
//! gaps. Steel spacers are cut to the gap and welded, their mass follows a
//! linear fit over the gap.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::mathutils::exact_mm_key;
use crate::units::{Grams, Kilograms, Millimeters};

/// Nominal gaps (mm) offered in the catalog for any spacer material.
pub const STANDARD_NOMINAL_GAPS_MM: [f64; 3] = [3.0, 5.0, 6.0];

/// A catalogued plastic spacer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlasticSpacer {
    pub designation: Cow<'static, str>,
    pub mass: Grams,
    pub thickness: Millimeters,
}

static PLASTIC_SPACERS: [(u32, PlasticSpacer); 2] = [
    (
        3,
        PlasticSpacer {
            designation: Cow::Borrowed("RSK130921.001-01"),
            mass: Grams(2.56),
            thickness: Millimeters(2.7),
        },
    ),
    (
        6,
        PlasticSpacer {
            designation: Cow::Borrowed("RSK130921.001"),
            mass: Grams(4.66),
            thickness: Millimeters(5.7),
        },
    ),
];

/// Plastic spacer for an exact nominal gap in mm, if one is catalogued.
pub fn plastic_spacer_for_gap(gap_mm: f64) -> Option<&'static PlasticSpacer> {
    let key = exact_mm_key(gap_mm)?;
    PLASTIC_SPACERS
        .iter()
        .find(|(gap, _)| *gap == key)
        .map(|(_, spacer)| spacer)
}

/// Nominal gaps (mm) that have a plastic spacer, ascending.
pub fn plastic_spacer_gaps_mm() -> Vec<f64> {
    PLASTIC_SPACERS.iter().map(|(gap, _)| f64::from(*gap)).collect()
}

/// Mass of one welded steel spacer for a gap given in metres.
pub fn steel_spacer_mass(gap_m: f64) -> Kilograms {
    Grams(13583.3333 * gap_m + 0.01).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plastic_spacer_lookup() {
        let spacer = plastic_spacer_for_gap(3.0).unwrap();
        assert_eq!(spacer.designation, "RSK130921.001-01");
        assert_eq!(spacer.mass, Grams(2.56));
        assert_eq!(plastic_spacer_for_gap(6.0).unwrap().designation, "RSK130921.001");
    }

    #[test]
    fn test_plastic_spacer_miss() {
        assert!(plastic_spacer_for_gap(5.0).is_none());
        assert!(plastic_spacer_for_gap(3.2).is_none());
        assert_eq!(plastic_spacer_gaps_mm(), vec![3.0, 6.0]);
    }

    #[test]
    fn test_steel_spacer_mass() {
        // 6 mm gap: 81.51 g
        let mass = steel_spacer_mass(0.006);
        assert!((mass.0 - 0.081_509_999_8).abs() < 1e-9);
    }
}
