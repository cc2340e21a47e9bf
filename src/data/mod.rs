//! Data module - Sampling helpers and histogram binning

mod binning;
mod sampling;

pub use binning::{Bins, Bins2D, Histogram, Histogram2D, MAX_AUTO_BINS};
pub use sampling::{linspace, make_denser, make_wider};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Input data is empty")]
    Empty,
    #[error("The density cannot take values less than 1 (got {0})")]
    InvalidDensity(usize),
    #[error("The percentages of widening cannot take values less than 0 (left {left}, right {right})")]
    NegativeWidening { left: f64, right: f64 },
    #[error("{what} has length {found}, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Invalid bins: {0}")]
    InvalidBins(String),
    #[error("Invalid range [{0}, {1}]")]
    InvalidRange(f64, f64),
    #[error("The linear threshold of a symlog scale must be positive and finite (got {0})")]
    InvalidLinthresh(f64),
    #[error("Row {row} has {found} values, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Fail with [`DataError::LengthMismatch`] unless `found == expected`.
pub(crate) fn ensure_len(what: &'static str, expected: usize, found: usize) -> Result<(), DataError> {
    if expected == found {
        Ok(())
    } else {
        Err(DataError::LengthMismatch {
            what,
            expected,
            found,
        })
    }
}
