//! Pipeline stages for text-to-NDJSON conversion.
//!
//! Each submodule implements exactly one transformation step, so the
//! edge-case policy of every stage can be tested on its own.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ split ──▶ (record) ──▶ encode
//! (file)    (blocks,   PoemRecord   (NDJSON line)
//!            title/body)
//! ```
//!
//! 1. [`input`]  — read the file, map I/O errors, normalise line endings
//! 2. [`split`]  — blank-line-run block detection, then first-blank-line
//!    title/body split
//! 3. [`encode`] — one JSON document per line, `$date` timestamp wrapper

pub mod encode;
pub mod input;
pub mod split;
