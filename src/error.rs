//! Error types for settling computations.

use thiserror::Error;

/// Errors that can occur while computing settling, stress or viscosity fields.
///
/// None of these are recovered from inside the crate. The caller decides
/// whether to abort the timestep or the whole simulation.
#[derive(Error, Debug)]
pub enum SettlingError {
    /// A model selector received a value outside its closed set.
    #[error("Invalid option for {option}: '{value}'")]
    InvalidOption { option: &'static str, value: String },

    /// The node layout does not fit the requested model.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// The computed stress profile is not monotonic.
    #[error("Monotonicity error: {0}")]
    Monotonicity(String),

    /// Input fields have inconsistent lengths.
    #[error("Dimension mismatch for {field}: expected {expected}, got {actual}")]
    DimensionMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// I/O error while writing a diagnostic profile.
    #[error("Profile I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SettlingError {
    /// Create an invalid option error.
    pub fn invalid_option(option: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidOption {
            option,
            value: value.into(),
        }
    }

    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(field: &'static str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            field,
            expected,
            actual,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SettlingError>;
