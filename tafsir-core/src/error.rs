//! Error types for conversion runs
//!
//! Only failures at the I/O boundary are errors. Irregular source content is
//! never fatal and is reported through [`crate::diagnostics::Diagnostic`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort a conversion or validation run
#[derive(Debug, Error)]
pub enum TafsirError {
    /// Input directory absent, or no file in it follows the naming convention
    #[error("missing input in '{}': expected {expected}", path.display())]
    MissingInput { path: PathBuf, expected: String },

    /// Output directory or file could not be created or written
    #[error("cannot write '{}': {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file that must be read could not be
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl TafsirError {
    pub(crate) fn output_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TafsirError::OutputWrite {
            path: path.into(),
            source,
        }
    }
}
