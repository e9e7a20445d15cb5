//! Plastic plate thickness tables.
//!
//! Keys are the free space (whole mm, floor-rounded) left for plastic between
//! the steel parts of neighbouring plates. Values are sheet thicknesses that
//! are actually stocked, so several keys share a value.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Plastic thicknesses (mm) for a double-plastic plate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlasticPair {
    pub fixed_mm: u32,
    pub moving_mm: u32,
}

/// Space (mm) → fixed plate plastic thickness (mm), moving plate all steel.
static SINGLE_PLASTIC_PLATES: Lazy<BTreeMap<u32, u32>> = Lazy::new(|| {
    BTreeMap::from([(7, 6), (8, 8), (9, 9), (12, 12), (13, 12), (14, 14), (15, 14)])
});

/// Space (mm) → plastic thicknesses for both plates.
static DOUBLE_PLASTIC_PLATES: Lazy<BTreeMap<u32, PlasticPair>> = Lazy::new(|| {
    [
        (9, 5, 4),
        (10, 5, 5),
        (11, 6, 5),
        (12, 6, 6),
        (13, 8, 5),
        (14, 8, 6),
        (15, 8, 6),
        (16, 8, 8),
        (17, 8, 8),
        (18, 10, 8),
    ]
    .into_iter()
    .map(|(space, fixed_mm, moving_mm)| (space, PlasticPair { fixed_mm, moving_mm }))
    .collect()
});

pub fn single_plastic_thickness(space_mm: u32) -> Option<u32> {
    SINGLE_PLASTIC_PLATES.get(&space_mm).copied()
}

pub fn double_plastic_thickness(space_mm: u32) -> Option<PlasticPair> {
    DOUBLE_PLASTIC_PLATES.get(&space_mm).copied()
}

/// Table rows for listing: (space, single, double).
pub fn table_rows() -> Vec<(u32, Option<u32>, Option<PlasticPair>)> {
    let mut keys: Vec<u32> = SINGLE_PLASTIC_PLATES
        .keys()
        .chain(DOUBLE_PLASTIC_PLATES.keys())
        .copied()
        .collect();
    keys.sort_unstable();
    keys.dedup();
    keys.into_iter()
        .map(|k| (k, single_plastic_thickness(k), double_plastic_thickness(k)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_table() {
        assert_eq!(single_plastic_thickness(7), Some(6));
        assert_eq!(single_plastic_thickness(13), Some(12));
        assert_eq!(single_plastic_thickness(10), None);
    }

    #[test]
    fn test_double_table() {
        assert_eq!(
            double_plastic_thickness(18),
            Some(PlasticPair { fixed_mm: 10, moving_mm: 8 })
        );
        assert_eq!(double_plastic_thickness(8), None);
        assert_eq!(double_plastic_thickness(19), None);
    }

    #[test]
    fn test_table_listing() {
        let rows = table_rows();
        assert_eq!(rows.first().map(|r| r.0), Some(7));
        assert_eq!(rows.last().map(|r| r.0), Some(18));
        assert_eq!(rows.len(), 12);
    }
}
