//! # File I/O Module
//!
//! Reading screen configurations and writing calculation outputs:
//! - **Input files**: a [`ScreenInput`] as JSON
//! - **Equation files**: the rendered `"name" = value` lines for CAD
//! - **Result files**: a [`StepScreen`] as JSON behind a metadata header
//!
//! Every write is atomic: the data goes to a `.tmp` sibling first, is synced
//! to disk and then renamed over the target, so an interrupted run never
//! leaves a half-written file behind.
//!
//! ## Example
//!
//! ```rust,no_run
//! use screen_core::calculations::calculate;
//! use screen_core::file_io::{load_input, save_equation_file, save_result};
//! use std::path::Path;
//!
//! let input = load_input(Path::new("rsk1021.json"))?;
//! let screen = calculate(&input)?;
//! save_equation_file(Path::new("rsk1021.txt"), &screen.equations())?;
//! save_result(Path::new("rsk1021.result.json"), &screen)?;
//! # Ok::<(), screen_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::{ScreenInput, StepScreen};
use crate::equations::{render_equation_file, EquationVariable};
use crate::errors::{CalcError, CalcResult};

/// Version written into result files
pub const RESULT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header of a result file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMeta {
    pub version: String,
    pub created: DateTime<Utc>,
}

impl ResultMeta {
    fn now() -> Self {
        ResultMeta {
            version: RESULT_VERSION.to_string(),
            created: Utc::now(),
        }
    }
}

/// On-disk layout of a result file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultFile {
    pub meta: ResultMeta,
    pub screen: StepScreen,
}

fn read_to_string(path: &Path) -> CalcResult<String> {
    let mut file = File::open(path).map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Write `contents` to `path` through a synced temp file and a rename.
fn write_atomic(path: &Path, contents: &[u8]) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = contents.len(), "file written");
    Ok(())
}

/// Load a screen configuration from a JSON file.
pub fn load_input(path: &Path) -> CalcResult<ScreenInput> {
    let contents = read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// Write the equation file for CAD.
pub fn save_equation_file(path: &Path, variables: &[EquationVariable]) -> CalcResult<()> {
    write_atomic(path, render_equation_file(variables).as_bytes())
}

/// Save a calculated screen with a version header.
pub fn save_result(path: &Path, screen: &StepScreen) -> CalcResult<()> {
    let file = ResultFile {
        meta: ResultMeta::now(),
        screen: screen.clone(),
    };
    let json = serde_json::to_string_pretty(&file).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;
    write_atomic(path, json.as_bytes())
}

/// Load a result file written by [`save_result`].
///
/// # Returns
///
/// * `Err(CalcError::VersionMismatch)` - written by an incompatible version
/// * `Err(CalcError::SerializationError)` - invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_result(path: &Path) -> CalcResult<ResultFile> {
    let contents = read_to_string(path)?;
    let file: ResultFile = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    validate_version(&file.meta.version)?;
    Ok(file)
}

/// Major versions must match; on 0.x a newer minor is rejected too.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: RESULT_VERSION.to_string(),
    };

    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(RESULT_VERSION);

    let (Some(&file_major), Some(&current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };
    if file_major != current_major {
        return Err(mismatch());
    }

    if current_major == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}
