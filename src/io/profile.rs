//! Diagnostic output of settling velocity profiles.
//!
//! Profiles are written as plain text tables in display units, one node per
//! line from the base upward:
//!
//! ```text
//! # Settling velocity v(z)
//! # nodes: 3
//! # columns: height(cm) velocity(cm/d)
//! 0.000000e0 0.000000e0
//! 5.000000e-3 -3.240000e-2
//! 1.000000e-2 -6.480000e-2
//! ```
//!
//! Units follow the convention of the snowpack model output: height is
//! `z / 100` and velocity is `v · 86400 / 100`.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::error::{Result, SettlingError};

/// Default file name for profile output.
pub const DEFAULT_PROFILE_FILE: &str = "v(z).dat";

const SECONDS_PER_DAY: f64 = 3600.0 * 24.0;

/// Receiver for velocity profiles produced during a settling computation.
pub trait ProfileSink {
    /// Accept one velocity profile at the given node heights.
    fn record(&mut self, coord: &[f64], v: &[f64]) -> Result<()>;
}

/// Writes each recorded profile to a text file, replacing the previous one.
#[derive(Clone, Debug)]
pub struct ProfileWriter {
    path: PathBuf,
}

impl Default for ProfileWriter {
    fn default() -> Self {
        Self::new(DEFAULT_PROFILE_FILE)
    }
}

impl ProfileWriter {
    /// Create a writer targeting `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Output file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileSink for ProfileWriter {
    fn record(&mut self, coord: &[f64], v: &[f64]) -> Result<()> {
        let file = File::create(&self.path)?;
        write_velocity_profile(file, coord, v)?;
        tracing::debug!(path = %self.path.display(), nodes = v.len(), "wrote velocity profile");
        Ok(())
    }
}

/// Keeps every recorded profile in memory, in SI units.
#[derive(Clone, Debug, Default)]
pub struct ProfileRecorder {
    /// Recorded (coord, v) pairs in call order
    pub profiles: Vec<(Vec<f64>, Vec<f64>)>,
}

impl ProfileRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent profile, if any.
    pub fn last(&self) -> Option<&(Vec<f64>, Vec<f64>)> {
        self.profiles.last()
    }
}

impl ProfileSink for ProfileRecorder {
    fn record(&mut self, coord: &[f64], v: &[f64]) -> Result<()> {
        self.profiles.push((coord.to_vec(), v.to_vec()));
        Ok(())
    }
}

/// Write a velocity profile table in display units.
///
/// # Errors
/// - `DimensionMismatch` if `coord` and `v` differ in length
/// - `Io` on write failure
pub fn write_velocity_profile<W: Write>(writer: W, coord: &[f64], v: &[f64]) -> Result<()> {
    if v.len() != coord.len() {
        return Err(SettlingError::dimension_mismatch("v", coord.len(), v.len()));
    }

    let mut writer = BufWriter::new(writer);
    writeln!(writer, "# Settling velocity v(z)")?;
    writeln!(writer, "# nodes: {}", coord.len())?;
    writeln!(writer, "# columns: height(cm) velocity(cm/d)")?;
    for (&z, &vel) in coord.iter().zip(v) {
        writeln!(writer, "{:.6e} {:.6e}", z / 100.0, vel * SECONDS_PER_DAY / 100.0)?;
    }
    writer.flush()?;
    Ok(())
}

/// Error type for reading profile files.
#[derive(Debug, Error)]
pub enum ProfileFileError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Parse error with line number
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Declared node count does not match the data rows
    #[error("Profile declares {declared} nodes but contains {found}")]
    NodeCount { declared: usize, found: usize },
}

/// Profile read back from a text table, in display units.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileTable {
    /// Height column
    pub height: Vec<f64>,
    /// Velocity column
    pub velocity: Vec<f64>,
}

/// Read a profile table written by [`write_velocity_profile`].
pub fn read_velocity_profile<R: BufRead>(reader: R) -> std::result::Result<ProfileTable, ProfileFileError> {
    let mut table = ProfileTable::default();
    let mut declared = None;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = idx + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }
        if let Some(comment) = trimmed.strip_prefix('#') {
            if let Some(n) = comment.trim().strip_prefix("nodes:") {
                let n = n.trim().parse::<usize>().map_err(|e| ProfileFileError::ParseError {
                    line: line_num,
                    message: format!("invalid node count: {}", e),
                })?;
                declared = Some(n);
            }
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let (Some(h), Some(v), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ProfileFileError::ParseError {
                line: line_num,
                message: "expected 2 columns".to_string(),
            });
        };
        let parse = |s: &str| {
            s.parse::<f64>().map_err(|e| ProfileFileError::ParseError {
                line: line_num,
                message: format!("invalid number '{}': {}", s, e),
            })
        };
        table.height.push(parse(h)?);
        table.velocity.push(parse(v)?);
    }

    if let Some(declared) = declared {
        if declared != table.height.len() {
            return Err(ProfileFileError::NodeCount {
                declared,
                found: table.height.len(),
            });
        }
    }

    Ok(table)
}

/// Read a profile table from a file path.
pub fn read_velocity_profile_file(path: &Path) -> std::result::Result<ProfileTable, ProfileFileError> {
    let file = File::open(path)?;
    read_velocity_profile(BufReader::new(file))
}
