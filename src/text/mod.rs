//! Text module - Per-subplot labels loaded from JSON

mod labels;

pub use labels::{Labels, SeriesKind, SubplotText, TextConfig};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextError {
    #[error("Failed to read text config '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid text config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid subplot key '{0}' in text config")]
    InvalidKey(String),
}
