//! Config module - Style sheet and workspace bootstrap

mod style;
mod workspace;

pub use style::Style;
pub use workspace::Workspace;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid style sheet: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Logger already installed: {0}")]
    Logger(#[from] log::SetLoggerError),
}
