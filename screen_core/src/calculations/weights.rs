//! # Weight Aggregation
//!
//! Fourth pipeline stage. Component masses come from linear fits over the
//! width class (most sheet-metal parts), the height class (sidewalls and
//! lengthwise beams) or the discharge height. Plate masses are per plate and
//! depend on thickness and tooth count of each material part.
//!
//! All masses are in kilograms.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::ResolvedConfig;
use super::geometry::{Plate, PlateGeometry};
use super::shape::ShapeMetrics;

/// Small parts on the moving frame not itemised below
const MOVING_UNLISTED_KG: f64 = 5.78;
/// Small parts on the fixed frame not itemised below
const FIXED_UNLISTED_KG: f64 = 2.73;

/// Mass of every itemised component, one unit each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentMasses {
    pub button_post: f64,
    pub support: f64,
    pub pin_sensor: f64,
    pub anchors: f64,
    pub drive_support: f64,
    pub chute: f64,
    pub air_supply: f64,
    pub stirring_up: f64,
    pub pitman_arm: f64,
    pub front_cover_00: f64,
    pub front_cover_01: f64,
    pub top_cover: f64,
    pub back_cover: f64,
    pub top_cover_fixed_beam: f64,
    pub front_cover_00_fixed_beam: f64,
    pub front_cover_01_fixed_beam: f64,
    pub fixing_strip: f64,
    pub terminal_box: f64,
    pub connecting_rod: f64,
    pub crank: f64,
    pub bottom_flap: f64,
    pub fixed_plate_clip: f64,
    pub moving_plate_clip: f64,
    pub bottom_rake: f64,
    pub bottom_frame_beam: f64,
    pub middle_frame_beam: f64,
    pub top_frame_beam: f64,
    pub fixed_plate_beam: f64,
    pub moving_plate_beam: f64,
    pub sidewall: f64,
    pub parallelogram_beam: f64,
    pub moving_lengthwise_beam: f64,
    pub side_cover: f64,
    pub bottom_spacer: f64,
    pub back_bottom_cover: f64,
    pub hose: f64,
    pub rubber_screen: f64,
}

impl ComponentMasses {
    pub fn compute(config: &ResolvedConfig, geometry: &PlateGeometry, shape: &ShapeMetrics) -> Self {
        let ws = config.width_class.value();
        let hs = config.height_class.value();
        let drop = shape.drop_height_m;
        let depth = config.depth_m;

        ComponentMasses {
            button_post: 3.9,
            support: 16.961 * drop + 7.396,
            pin_sensor: 0.3 * depth + 0.805,
            anchors: 2.54,
            drive_support: 3.63429 * ws + 56.3043,
            chute: 1.02857 * ws + 1.67857,
            air_supply: 0.0471429 * ws + 2.37714,
            stirring_up: 0.115714 * ws + 0.155714,
            pitman_arm: 24.7,
            front_cover_00: 0.72 * ws - 1.54,
            front_cover_01: 1.12 * ws + 0.78,
            top_cover: 0.572857 * ws + 0.802857,
            back_cover: 0.618571 * ws + 0.788571,
            top_cover_fixed_beam: 0.167143 * ws + 0.167143,
            front_cover_00_fixed_beam: 0.191429 * ws + 0.211429,
            front_cover_01_fixed_beam: 0.265714 * ws + 0.155714,
            fixing_strip: 0.35,
            terminal_box: 5.95,
            connecting_rod: 2.5,
            crank: 4.82,
            bottom_flap: 0.105714 * ws - 0.0842857,
            fixed_plate_clip: 0.428571 * ws - 0.371429,
            moving_plate_clip: 0.435714 * ws - 0.334286,
            bottom_rake: 0.175714 * ws - 0.164286,
            bottom_frame_beam: 0.405714 * ws - 0.064286,
            middle_frame_beam: 0.534286 * ws - 0.365714,
            top_frame_beam: 0.662857 * ws + 0.0728571,
            fixed_plate_beam: 0.644286 * ws - 0.505714,
            moving_plate_beam: 0.648571 * ws + 3.34857,
            sidewall: 2.56889 * hs + 37.32,
            parallelogram_beam: 0.785556 * hs + 6.39,
            moving_lengthwise_beam: 1.15667 * hs + 4.45,
            side_cover: 8.67532 * drop + 12.498,
            bottom_spacer: 110.0 * geometry.bottom_spacer_thickness_m - 0.01,
            back_bottom_cover: 1.53726 * ws * drop + 0.0213454 * ws + 4.82597 * drop - 2.0444,
            hose: 0.06 * hs + 0.27,
            rubber_screen: 2.94 * depth - 0.361,
        }
    }
}

/// Mass of one plate, split by material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlateMass {
    pub steel: f64,
    pub plastic: Option<f64>,
}

impl PlateMass {
    pub fn total(&self) -> f64 {
        self.steel + self.plastic.unwrap_or(0.0)
    }

    /// Fixed plate. A plastic top changes the steel profile as well.
    pub fn fixed(plate: &Plate) -> Self {
        let s = plate.steel.thickness_m;
        let teeth = f64::from(plate.steel.teeth);
        match plate.plastic {
            Some(plastic) => PlateMass {
                steel: 75.0 * s * teeth + 215.0 * s,
                plastic: Some(
                    8.88889 * plastic.thickness_m * f64::from(plastic.teeth) + 14.4444 * plastic.thickness_m,
                ),
            },
            None => PlateMass {
                steel: 73.3333 * s * teeth + 653.333 * s,
                plastic: None,
            },
        }
    }

    pub fn moving(plate: &Plate) -> Self {
        let s = plate.steel.thickness_m;
        let teeth = f64::from(plate.steel.teeth);
        match plate.plastic {
            Some(plastic) => PlateMass {
                steel: 73.3333 * s * teeth + 230.0 * s,
                plastic: Some(6.66667 * plastic.thickness_m * f64::from(plastic.teeth) + 40.0 * plastic.thickness_m),
            },
            None => PlateMass {
                steel: 73.3333 * s * teeth + 613.333 * s,
                plastic: None,
            },
        }
    }
}

/// Component masses plus the aggregates shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightBreakdown {
    pub components: ComponentMasses,
    pub fixed_plate: PlateMass,
    pub moving_plate: PlateMass,
    /// All fixed plates with their spacers and bottom spacers
    pub fixed_plates: f64,
    pub moving_plates: f64,
    /// Plastic in all plates
    pub plastic: f64,
    /// Everything the drive has to lift
    pub moving: f64,
    /// Drive unit, zero when none was selected
    pub drive: f64,
    pub full: f64,
    /// Full mass without any plates
    pub plateless: f64,
}

impl WeightBreakdown {
    /// Add the selected drive unit to the full and plateless masses.
    pub fn with_drive(mut self, drive_kg: f64) -> Self {
        self.drive += drive_kg;
        self.full += drive_kg;
        self.plateless += drive_kg;
        self
    }

    /// Full mass without the drive unit
    pub fn driveless(&self) -> f64 {
        self.full - self.drive
    }
}

/// Aggregate all masses. The result does not include a drive unit yet.
pub fn aggregate(config: &ResolvedConfig, geometry: &PlateGeometry, shape: &ShapeMetrics) -> WeightBreakdown {
    let c = ComponentMasses::compute(config, geometry, shape);
    let fixed_plate = PlateMass::fixed(&geometry.fixed);
    let moving_plate = PlateMass::moving(&geometry.moving);

    let fixed_count = f64::from(geometry.fixed_count);
    let moving_count = f64::from(geometry.moving_count);
    let fixed_beams = f64::from(shape.fixed_beam_count);
    let moving_beams = f64::from(shape.moving_beam_count);

    let fixed_plates = fixed_count * fixed_plate.total()
        + f64::from(geometry.spacer_count) * config.spacer.mass_kg()
        + f64::from(geometry.bottom_spacer_count) * c.bottom_spacer;
    let moving_plates = moving_count * moving_plate.total();
    let plastic = fixed_plate.plastic.unwrap_or(0.0) * fixed_count + moving_plate.plastic.unwrap_or(0.0) * moving_count;

    let moving = moving_plates
        + MOVING_UNLISTED_KG
        + 4.0 * c.fixing_strip
        + 2.0 * c.pitman_arm
        + moving_beams * (c.moving_plate_beam + c.moving_plate_clip)
        + 2.0 * c.moving_lengthwise_beam
        + 2.0 * c.parallelogram_beam
        + 8.0 * c.connecting_rod;

    let full = moving
        + fixed_plates
        + FIXED_UNLISTED_KG
        + c.button_post
        + 2.0 * c.support
        + c.pin_sensor
        + c.anchors
        + c.drive_support
        + c.chute
        + c.air_supply
        + 2.0 * c.stirring_up
        + c.front_cover_00
        + c.front_cover_01
        + c.top_cover
        + c.back_cover
        + c.top_cover_fixed_beam
        + c.front_cover_00_fixed_beam
        + c.front_cover_01_fixed_beam
        + 2.0 * c.side_cover
        + c.back_bottom_cover
        + c.terminal_box
        + 2.0 * c.crank
        + c.bottom_flap
        + c.bottom_rake
        + fixed_beams * (c.fixed_plate_clip + c.fixed_plate_beam)
        + c.bottom_frame_beam
        + c.middle_frame_beam
        + c.top_frame_beam
        + 2.0 * c.sidewall
        + 2.0 * c.hose
        + 2.0 * c.rubber_screen;

    debug!(moving, fixed_plates, full, "weights aggregated");

    WeightBreakdown {
        components: c,
        fixed_plate,
        moving_plate,
        fixed_plates,
        moving_plates,
        plastic,
        moving,
        drive: 0.0,
        full,
        plateless: full - fixed_plates - moving_plates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::config::{self, ScreenInput};
    use crate::calculations::{geometry, shape};
    use crate::catalog::{HeightClass, PlateSpacerPair, WidthClass};

    fn weights(hs: HeightClass, gap_mm: f64, depth_mm: f64, plates: PlateSpacerPair, steel_only: bool) -> WeightBreakdown {
        let input = ScreenInput::new(WidthClass::new(10).unwrap(), hs, gap_mm, depth_mm, plates).with_steel_only(steel_only);
        let config = config::resolve(&input).unwrap();
        let geometry = geometry::resolve(&config).unwrap();
        let shape = shape::resolve(&config, &geometry).unwrap();
        aggregate(&config, &geometry, &shape)
    }

    #[test]
    fn test_steel_only_weights() {
        let w = weights(HeightClass::H21, 6.0, 1000.0, PlateSpacerPair::Fixed3Moving3Steel, true);
        assert!((w.moving - 795.116_046_1).abs() < 1e-6);
        assert!((w.fixed_plates - 691.164_234_950_4).abs() < 1e-6);
        assert_eq!(w.plastic, 0.0);
        assert_eq!(w.drive, 0.0);
        assert!(w.fixed_plate.plastic.is_none());

        let w = w.with_drive(75.0);
        assert!((w.full - 2187.723_993_950_4).abs() < 1e-6);
        assert!((w.plateless - 964.420_008_9).abs() < 1e-6);
        assert!((w.driveless() - 2112.723_993_950_4).abs() < 1e-6);
    }

    #[test]
    fn test_double_plastic_weights() {
        let w = weights(HeightClass::H21, 6.0, 1000.0, PlateSpacerPair::Fixed3Moving3Steel, false).with_drive(73.0);
        assert!((w.moving - 517.285_801).abs() < 1e-6);
        assert!((w.fixed_plates - 378.288_378_941_2).abs() < 1e-6);
        assert!((w.plastic - 228.411_143).abs() < 1e-6);
        assert!((w.full - 1585.166_465_841_2).abs() < 1e-6);
        assert!((w.plateless - 938.711_447_9).abs() < 1e-6);
    }

    #[test]
    fn test_single_plastic_weights() {
        let w = weights(HeightClass::H06, 3.0, 500.0, PlateSpacerPair::Fixed2Moving3Plastic, false).with_drive(75.0);
        assert!((w.moving - 724.257_845_2).abs() < 1e-6);
        assert!((w.fixed_plates - 264.661_530_62).abs() < 1e-6);
        assert!((w.plastic - 55.886_650_62).abs() < 1e-6);
        assert!((w.full - 1515.212_643_809_338_7).abs() < 1e-6);
        assert!((w.plateless - 689.431_381_989_338_7).abs() < 1e-6);
        assert!(w.moving_plate.plastic.is_none());
    }

    #[test]
    fn test_plate_mass_total() {
        let mass = PlateMass {
            steel: 2.5,
            plastic: Some(1.25),
        };
        assert_eq!(mass.total(), 3.75);
        assert_eq!(PlateMass { steel: 2.5, plastic: None }.total(), 2.5);
    }
}
