//! Catalog selections: width class, height class and plate/spacer pairing.
//!
//! A screen designation such as "RSK 1021" is the width class (10) followed
//! by the height class (21). Height class 21 is the reference design with
//! 41 teeth per plate; every other height class adds or removes whole teeth.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CalcError;
use crate::units::mm;

/// Screen width class (5..=22), roughly the channel width in decimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WidthClass(u8);

impl WidthClass {
    pub const MIN: u8 = 5;
    pub const MAX: u8 = 22;

    /// All width classes in ascending order
    pub const ALL: [WidthClass; 18] = [
        WidthClass(5),
        WidthClass(6),
        WidthClass(7),
        WidthClass(8),
        WidthClass(9),
        WidthClass(10),
        WidthClass(11),
        WidthClass(12),
        WidthClass(13),
        WidthClass(14),
        WidthClass(15),
        WidthClass(16),
        WidthClass(17),
        WidthClass(18),
        WidthClass(19),
        WidthClass(20),
        WidthClass(21),
        WidthClass(22),
    ];

    /// Create a width class, rejecting codes outside the catalog.
    pub fn new(code: u8) -> Result<Self, CalcError> {
        if (Self::MIN..=Self::MAX).contains(&code) {
            Ok(WidthClass(code))
        } else {
            Err(CalcError::invalid_input(
                "width_class",
                code.to_string(),
                format!("Width class must be between {} and {}", Self::MIN, Self::MAX),
            ))
        }
    }

    pub fn code(self) -> u8 {
        self.0
    }

    /// Numeric value used by the regression formulas
    pub fn value(self) -> f64 {
        f64::from(self.0)
    }
}

impl TryFrom<u8> for WidthClass {
    type Error = CalcError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        WidthClass::new(code)
    }
}

impl From<WidthClass> for u8 {
    fn from(ws: WidthClass) -> Self {
        ws.0
    }
}

impl fmt::Display for WidthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Screen height class. The code is the nominal discharge height family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HeightClass {
    H06,
    H09,
    H12,
    H15,
    H18,
    H21,
    H24,
    H27,
    H30,
}

impl HeightClass {
    /// All height classes in ascending order
    pub const ALL: [HeightClass; 9] = [
        HeightClass::H06,
        HeightClass::H09,
        HeightClass::H12,
        HeightClass::H15,
        HeightClass::H18,
        HeightClass::H21,
        HeightClass::H24,
        HeightClass::H27,
        HeightClass::H30,
    ];

    pub fn code(self) -> u8 {
        match self {
            HeightClass::H06 => 6,
            HeightClass::H09 => 9,
            HeightClass::H12 => 12,
            HeightClass::H15 => 15,
            HeightClass::H18 => 18,
            HeightClass::H21 => 21,
            HeightClass::H24 => 24,
            HeightClass::H27 => 27,
            HeightClass::H30 => 30,
        }
    }

    /// Teeth added to (or removed from) the 41-tooth reference plate.
    pub fn tooth_delta(self) -> i32 {
        match self {
            HeightClass::H06 => -19,
            HeightClass::H09 => -15,
            HeightClass::H12 => -11,
            HeightClass::H15 => -7,
            HeightClass::H18 => -4,
            HeightClass::H21 => 0,
            HeightClass::H24 => 4,
            HeightClass::H27 => 8,
            HeightClass::H30 => 11,
        }
    }

    /// Numeric value used by the regression formulas
    pub fn value(self) -> f64 {
        f64::from(self.code())
    }
}

impl TryFrom<u8> for HeightClass {
    type Error = CalcError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        HeightClass::ALL
            .into_iter()
            .find(|hs| hs.code() == code)
            .ok_or_else(|| {
                let valid: Vec<String> = HeightClass::ALL.iter().map(|hs| hs.code().to_string()).collect();
                CalcError::invalid_input(
                    "height_class",
                    code.to_string(),
                    format!("Height class must be one of {}", valid.join(", ")),
                )
            })
    }
}

impl From<HeightClass> for u8 {
    fn from(hs: HeightClass) -> Self {
        hs.code()
    }
}

impl fmt::Display for HeightClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.code())
    }
}

/// Material of the gap limiters welded or clipped between plates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpacerMaterial {
    Steel,
    Plastic,
}

impl SpacerMaterial {
    pub fn display_name(&self) -> &'static str {
        match self {
            SpacerMaterial::Steel => "steel",
            SpacerMaterial::Plastic => "plastic",
        }
    }
}

/// The five canonical fixed/moving steel thickness combinations.
///
/// Serialized as `"fixed/moving material"`, e.g. `"2/3 plastic"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlateSpacerPair {
    #[serde(rename = "2/3 plastic")]
    Fixed2Moving3Plastic,
    #[serde(rename = "2/2 plastic")]
    Fixed2Moving2Plastic,
    #[serde(rename = "3/3 steel")]
    Fixed3Moving3Steel,
    #[serde(rename = "3/2 steel")]
    Fixed3Moving2Steel,
    #[serde(rename = "2/2 steel")]
    Fixed2Moving2Steel,
}

impl PlateSpacerPair {
    pub const ALL: [PlateSpacerPair; 5] = [
        PlateSpacerPair::Fixed2Moving3Plastic,
        PlateSpacerPair::Fixed2Moving2Plastic,
        PlateSpacerPair::Fixed3Moving3Steel,
        PlateSpacerPair::Fixed3Moving2Steel,
        PlateSpacerPair::Fixed2Moving2Steel,
    ];

    /// Fixed steel plate thickness in mm
    pub fn fixed_mm(self) -> f64 {
        match self {
            PlateSpacerPair::Fixed2Moving3Plastic
            | PlateSpacerPair::Fixed2Moving2Plastic
            | PlateSpacerPair::Fixed2Moving2Steel => 2.0,
            PlateSpacerPair::Fixed3Moving3Steel | PlateSpacerPair::Fixed3Moving2Steel => 3.0,
        }
    }

    /// Moving steel plate thickness in mm
    pub fn moving_mm(self) -> f64 {
        match self {
            PlateSpacerPair::Fixed2Moving3Plastic | PlateSpacerPair::Fixed3Moving3Steel => 3.0,
            PlateSpacerPair::Fixed2Moving2Plastic
            | PlateSpacerPair::Fixed3Moving2Steel
            | PlateSpacerPair::Fixed2Moving2Steel => 2.0,
        }
    }

    /// Fixed steel plate thickness in metres
    pub fn fixed_m(self) -> f64 {
        mm(self.fixed_mm())
    }

    /// Moving steel plate thickness in metres
    pub fn moving_m(self) -> f64 {
        mm(self.moving_mm())
    }

    pub fn spacer(self) -> SpacerMaterial {
        match self {
            PlateSpacerPair::Fixed2Moving3Plastic | PlateSpacerPair::Fixed2Moving2Plastic => {
                SpacerMaterial::Plastic
            }
            _ => SpacerMaterial::Steel,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PlateSpacerPair::Fixed2Moving3Plastic => "2/3 plastic",
            PlateSpacerPair::Fixed2Moving2Plastic => "2/2 plastic",
            PlateSpacerPair::Fixed3Moving3Steel => "3/3 steel",
            PlateSpacerPair::Fixed3Moving2Steel => "3/2 steel",
            PlateSpacerPair::Fixed2Moving2Steel => "2/2 steel",
        }
    }
}

impl fmt::Display for PlateSpacerPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PlateSpacerPair {
    type Err = CalcError;

    /// Accepts `"2/3 plastic"` as well as `"2/3-plastic"` (handy on a shell).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', " ");
        PlateSpacerPair::ALL
            .into_iter()
            .find(|pair| pair.display_name() == normalized)
            .ok_or_else(|| {
                CalcError::invalid_input(
                    "plates",
                    s,
                    "Expected one of: 2/3 plastic, 2/2 plastic, 3/3 steel, 3/2 steel, 2/2 steel",
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_class_range() {
        assert!(WidthClass::new(4).is_err());
        assert!(WidthClass::new(23).is_err());
        assert_eq!(WidthClass::new(10).unwrap().code(), 10);
        assert_eq!(WidthClass::ALL.len(), 18);
        assert_eq!(WidthClass::ALL[0].code(), WidthClass::MIN);
        assert_eq!(WidthClass::ALL[17].code(), WidthClass::MAX);
    }

    #[test]
    fn test_height_class_deltas() {
        assert_eq!(HeightClass::H21.tooth_delta(), 0);
        assert_eq!(HeightClass::H06.tooth_delta(), -19);
        assert_eq!(HeightClass::H30.tooth_delta(), 11);
        assert!(HeightClass::try_from(33).is_err());
        assert_eq!(HeightClass::try_from(27).unwrap(), HeightClass::H27);
    }

    #[test]
    fn test_class_serialization() {
        let json = serde_json::to_string(&(WidthClass::new(12).unwrap(), HeightClass::H09)).unwrap();
        assert_eq!(json, "[12,9]");
        let err = serde_json::from_str::<WidthClass>("30");
        assert!(err.is_err());
    }

    #[test]
    fn test_plate_pairs() {
        let pair = PlateSpacerPair::Fixed3Moving2Steel;
        assert_eq!(pair.fixed_mm(), 3.0);
        assert_eq!(pair.moving_mm(), 2.0);
        assert_eq!(pair.spacer(), SpacerMaterial::Steel);
        assert_eq!(PlateSpacerPair::Fixed2Moving2Plastic.spacer(), SpacerMaterial::Plastic);
        assert_eq!(
            serde_json::to_string(&PlateSpacerPair::Fixed2Moving3Plastic).unwrap(),
            "\"2/3 plastic\""
        );
    }

    #[test]
    fn test_plate_pair_from_str() {
        assert_eq!(
            "3/3-steel".parse::<PlateSpacerPair>().unwrap(),
            PlateSpacerPair::Fixed3Moving3Steel
        );
        assert_eq!(
            " 2/2 Plastic ".parse::<PlateSpacerPair>().unwrap(),
            PlateSpacerPair::Fixed2Moving2Plastic
        );
        assert!("4/4 steel".parse::<PlateSpacerPair>().is_err());
    }
}
