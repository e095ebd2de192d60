//! Input resolution: read the poem collection and normalise it for scanning.
//!
//! The whole file is read up front. A missing file is reported before the
//! output file is ever opened, so a failed run leaves no partial output
//! behind.

use crate::error::PoemImportError;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Read `path` as UTF-8 and return its normalised text.
pub fn read_input(path: &Path) -> Result<String, PoemImportError> {
    let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PoemImportError::InputNotFound {
            path: path.to_path_buf(),
        },
        ErrorKind::PermissionDenied => PoemImportError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => PoemImportError::InputReadFailed {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    debug!("Read {} bytes from {}", raw.len(), path.display());
    Ok(normalise_text(&raw))
}

/// Normalise line endings to `\n` and drop a leading byte-order mark.
pub fn normalise_text(input: &str) -> String {
    let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
    input.replace("\r\n", "\n").replace('\r', "\n")
}
