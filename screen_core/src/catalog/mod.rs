//! # Catalog Data
//!
//! Static tables the calculation draws from: size classes, plate/spacer
//! pairings, spacers, plastic plate thicknesses and drive units. All tables
//! are immutable and safe to share between threads.

pub mod classes;
pub mod drive_units;
pub mod plastic_plates;
pub mod spacers;

pub use classes::{HeightClass, PlateSpacerPair, SpacerMaterial, WidthClass};
pub use drive_units::{drive_catalog, DriveUnit, DRIVE_UNITS, SMALL_DRIVE_UNITS};
pub use plastic_plates::{double_plastic_thickness, single_plastic_thickness, PlasticPair};
pub use spacers::{
    plastic_spacer_for_gap, plastic_spacer_gaps_mm, steel_spacer_mass, PlasticSpacer,
    STANDARD_NOMINAL_GAPS_MM,
};

/// Teeth on a plate of the reference height class
pub const BASE_TEETH: i32 = 41;
