//! Error types for the poem-import library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`PoemImportError`] — **Fatal**: the run cannot proceed at all
//!   (input file missing, output not writable). Returned as
//!   `Err(PoemImportError)` from the top-level `convert*` functions.
//!
//! * [`BlockError`] — **Non-fatal**: a single block of the input did not
//!   decompose into a title and a body. Collected in
//!   [`crate::output::ConversionOutput::skipped`] and reported through the
//!   progress callback; every other block is still converted.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the poem-import library.
#[derive(Debug, Error)]
pub enum PoemImportError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Input file not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists but could not be read as UTF-8 text.
    #[error("Failed to read input file '{path}': {source}")]
    InputReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PoemImportError {
    /// True when the input file does not exist.
    ///
    /// The CLI reports this case and exits normally instead of failing.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, PoemImportError::InputNotFound { .. })
    }
}

/// A non-fatal error for a single block of the input.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum BlockError {
    /// The block has no blank line separating a title from a body, or one of
    /// the two parts is empty after trimming.
    #[error("Block {block}: expected a title and a body separated by a blank line: '{preview}'")]
    Malformed { block: usize, preview: String },
}

impl BlockError {
    /// 1-based ordinal of the offending block in the input.
    pub fn block(&self) -> usize {
        match self {
            BlockError::Malformed { block, .. } => *block,
        }
    }

    /// Leading characters of the offending block.
    pub fn preview(&self) -> &str {
        match self {
            BlockError::Malformed { preview, .. } => preview,
        }
    }
}
