//! Command implementations

use serde::Serialize;
use std::process::ExitCode;
use tracing::info;

use screen_core::calculations::shape::{full_drop_height_m, max_depth_mm};
use screen_core::calculations::{calculate, RunOutcome, ScreenInput};
use screen_core::catalog::plastic_plates::table_rows;
use screen_core::catalog::{DriveUnit, HeightClass, PlasticPair, WidthClass, BASE_TEETH, DRIVE_UNITS, SMALL_DRIVE_UNITS};
use screen_core::equations::render_equation_file;
use screen_core::errors::{CalcError, CalcResult, FailureMessage};
use screen_core::file_io::{load_input, save_equation_file, save_result};
use screen_core::mathutils::format_general;
use screen_core::report::{render_report, report_lines};
use screen_core::units::to_mm;

use crate::cli::{CalcArgs, CatalogTable, Cli, Commands};

pub fn execute(cli: Cli) -> CalcResult<ExitCode> {
    match cli.command {
        Commands::Calc(args) => Ok(if calc(&args)? { ExitCode::SUCCESS } else { ExitCode::FAILURE }),
        Commands::Catalog { table, json } => {
            catalog(table, json)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;
    println!("{}", json);
    Ok(())
}

fn missing(field: &str) -> CalcError {
    CalcError::invalid_input(field, "", "required unless --input is given")
}

/// Screen configuration from the input file or the individual flags.
fn screen_input(args: &CalcArgs) -> CalcResult<ScreenInput> {
    let mut input = match &args.input {
        Some(path) => load_input(path)?,
        None => ScreenInput::new(
            WidthClass::new(args.width_class.ok_or_else(|| missing("width_class"))?)?,
            HeightClass::try_from(args.height_class.ok_or_else(|| missing("height_class"))?)?,
            args.gap.ok_or_else(|| missing("gap"))?,
            args.depth.ok_or_else(|| missing("depth"))?,
            args.plates.ok_or_else(|| missing("plates"))?,
        ),
    };
    if args.steel_only {
        input.steel_only = true;
    }
    if let Some(label) = &args.label {
        input.label = label.clone();
    }
    Ok(input)
}

/// Run one calculation. `Ok(false)` when the screen was rejected.
fn calc(args: &CalcArgs) -> CalcResult<bool> {
    let input = screen_input(args)?;

    let screen = match calculate(&input) {
        Ok(screen) => screen,
        Err(err) => {
            if args.json {
                print_json(&RunOutcome::Failed {
                    failures: vec![FailureMessage::from(&err)],
                })?;
            } else {
                eprintln!("{}", err);
            }
            return Ok(false);
        }
    };
    let equations = screen.equations();

    if let Some(path) = &args.equations {
        save_equation_file(path, &equations)?;
        info!(path = %path.display(), "equation file written");
    }
    if let Some(path) = &args.save {
        save_result(path, &screen)?;
        info!(path = %path.display(), "result saved");
    }

    if args.json {
        print_json(&RunOutcome::Completed {
            screen: Box::new(screen),
            equations,
        })?;
    } else {
        print!("{}", render_report(&report_lines(&screen)));
        print!("{}", render_equation_file(&equations));
    }
    Ok(true)
}

#[derive(Serialize)]
struct DriveTables<'a> {
    /// Width class 5
    small: &'a [DriveUnit],
    standard: &'a [DriveUnit],
}

#[derive(Serialize)]
struct PlateRow {
    space_mm: u32,
    single_mm: Option<u32>,
    double: Option<PlasticPair>,
}

#[derive(Serialize)]
struct HeightRow {
    height_class: HeightClass,
    tooth_delta: i32,
    teeth: i32,
    drop_height_mm: f64,
    max_depth_mm: f64,
}

fn height_rows() -> Vec<HeightRow> {
    HeightClass::ALL
        .into_iter()
        .map(|hs| {
            let full = full_drop_height_m(hs.tooth_delta());
            HeightRow {
                height_class: hs,
                tooth_delta: hs.tooth_delta(),
                teeth: BASE_TEETH + hs.tooth_delta(),
                drop_height_mm: to_mm(full),
                max_depth_mm: max_depth_mm(full),
            }
        })
        .collect()
}

fn print_drives(title: &str, drives: &[DriveUnit]) {
    println!("{}", title);
    println!("{:<16} {:>8} {:>8} {:>10} {:>8}", "Designation", "kg", "kW", "Nm", "rpm");
    for d in drives {
        println!(
            "{:<16} {:>8} {:>8} {:>10} {:>8}",
            d.designation,
            format_general(d.mass.0),
            format_general(d.power.0),
            format_general(d.torque.0),
            format_general(d.speed.0)
        );
    }
}

fn catalog(table: CatalogTable, json: bool) -> CalcResult<()> {
    match table {
        CatalogTable::Drives => {
            if json {
                return print_json(&DriveTables {
                    small: &SMALL_DRIVE_UNITS,
                    standard: &DRIVE_UNITS,
                });
            }
            print_drives(&format!("Width class {}", WidthClass::MIN), &SMALL_DRIVE_UNITS);
            println!();
            print_drives(
                &format!("Width classes {}..{}", WidthClass::MIN + 1, WidthClass::MAX),
                &DRIVE_UNITS,
            );
        }
        CatalogTable::Plates => {
            let rows: Vec<PlateRow> = table_rows()
                .into_iter()
                .map(|(space_mm, single_mm, double)| PlateRow {
                    space_mm,
                    single_mm,
                    double,
                })
                .collect();
            if json {
                return print_json(&rows);
            }
            let cell = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());
            println!("{:>9} {:>8} {:>10}", "Space mm", "Single", "Double");
            for row in rows {
                println!(
                    "{:>9} {:>8} {:>10}",
                    row.space_mm,
                    cell(row.single_mm.map(|t| t.to_string())),
                    cell(row.double.map(|p| format!("{}/{}", p.fixed_mm, p.moving_mm)))
                );
            }
        }
        CatalogTable::Heights => {
            let rows = height_rows();
            if json {
                return print_json(&rows);
            }
            println!("{:>6} {:>6} {:>6} {:>10} {:>10}", "Class", "Delta", "Teeth", "H1 mm", "Max depth");
            for row in rows {
                println!(
                    "{:>6} {:>6} {:>6} {:>10.0} {:>10}",
                    format!("{:02}", row.height_class.code()),
                    row.tooth_delta,
                    row.teeth,
                    row.drop_height_mm,
                    format_general(row.max_depth_mm)
                );
            }
        }
    }
    Ok(())
}
