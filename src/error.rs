//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Separates pipeline-fatal failures (missing source, undecodable input, degenerate
//! dimensions) from per-destination failures (encode/write) that only affect one output.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Source image not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid {what} dimensions: {width}x{height}")]
    InvalidDimensions {
        what: &'static str,
        width: u32,
        height: u32,
    },

    #[error("Resize error: {0}")]
    Resize(String),

    #[error("Failed to encode {}: {reason}", path.display())]
    Encode { path: PathBuf, reason: String },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to write {}: {reason}", path.display())]
    OutputConflict { path: PathBuf, reason: String },

    #[error("At least one destination path is required")]
    NoDestinations,

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{} of {} destination(s) failed", failed.len(), failed.len() + succeeded.len())]
    DestinationsFailed {
        failed: Vec<(PathBuf, String)>,
        succeeded: Vec<PathBuf>,
    },
}

impl Error {
    pub fn encode<E: std::fmt::Display>(path: impl Into<PathBuf>, e: E) -> Self {
        Error::Encode {
            path: path.into(),
            reason: e.to_string(),
        }
    }

    pub fn resize<E: std::fmt::Display>(e: E) -> Self {
        Error::Resize(e.to_string())
    }

    /// True for errors that abort the whole pipeline rather than a single destination.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Error::Encode { .. } | Error::Write { .. } | Error::DestinationsFailed { .. }
        )
    }
}
