//! Error types shared across the library.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading, preprocessing or parsing sketch sources.
///
/// Detectors themselves never fail: a malformed or unexpected tree shape
/// degrades to "no violation found for this node". These errors cover the
/// boundary where files are read and turned into units.
#[derive(Debug, Error)]
pub enum SketchError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {unit}: {reason}")]
    Parse { unit: String, reason: String },

    #[error("invalid configuration in {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl SketchError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(unit: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            unit: unit.into(),
            reason: reason.into(),
        }
    }
}
