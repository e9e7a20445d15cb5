//! CLI definition using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use screen_core::catalog::PlateSpacerPair;

#[derive(Parser)]
#[command(name = "stepscreen")]
#[command(version)]
#[command(about = "Step screen sizing: plate geometry, dimensions, weights and drive unit")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate one screen
    Calc(CalcArgs),

    /// List catalog tables
    Catalog {
        #[arg(value_enum)]
        table: CatalogTable,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
pub struct CalcArgs {
    /// JSON file with the screen configuration
    #[arg(long, short = 'i', conflicts_with_all = ["width_class", "height_class", "gap", "depth", "plates"])]
    pub input: Option<PathBuf>,

    /// Width class (5..22)
    #[arg(long, short = 'w', required_unless_present = "input")]
    pub width_class: Option<u8>,

    /// Height class (6, 9, ... 30)
    #[arg(long, short = 'H', required_unless_present = "input")]
    pub height_class: Option<u8>,

    /// Nominal gap between plates, mm
    #[arg(long, short = 'g', required_unless_present = "input")]
    pub gap: Option<f64>,

    /// Channel depth, mm
    #[arg(long, short = 'd', required_unless_present = "input")]
    pub depth: Option<f64>,

    /// Fixed/moving steel thickness and spacer, e.g. "3/3-steel"
    #[arg(long, short = 'p', required_unless_present = "input", value_parser = parse_plates)]
    pub plates: Option<PlateSpacerPair>,

    /// Build the plates entirely from steel
    #[arg(long)]
    pub steel_only: bool,

    /// Label stored with the result
    #[arg(long)]
    pub label: Option<String>,

    /// Write the equation file here
    #[arg(long, short = 'e')]
    pub equations: Option<PathBuf>,

    /// Save the full result as JSON here
    #[arg(long, short = 's')]
    pub save: Option<PathBuf>,

    /// Print the outcome as JSON instead of the report
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CatalogTable {
    /// Gear-motor drive units
    Drives,
    /// Plastic plate thicknesses per available space
    Plates,
    /// Height classes with teeth and maximum depth
    Heights,
}

fn parse_plates(s: &str) -> Result<PlateSpacerPair, String> {
    s.parse().map_err(|e: screen_core::CalcError| e.to_string())
}
