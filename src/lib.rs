//! # poem-import
//!
//! Convert a plain-text poem collection into newline-delimited JSON ready
//! for bulk import into a cloud document database.
//!
//! ## Input format
//!
//! ```text
//! 无题                      ← title
//!                           ← one blank line
//! 相见时难别亦难，           ← body (single blank lines inside are kept)
//! 东风无力百花残。
//!                           ← two or more blank lines
//!                           ←   separate poems
//! 下一首
//! …
//! ```
//!
//! ## Pipeline Overview
//!
//! ```text
//! poems.txt
//!  │
//!  ├─ 1. Input   read UTF-8, normalise line endings
//!  ├─ 2. Blocks  cut on runs of ≥2 blank lines
//!  ├─ 3. Split   first blank line → title / body (malformed blocks skipped)
//!  ├─ 4. Record  owner id, createTime, counters, empty media fields, tags
//!  └─ 5. Output  one JSON object per line, createTime as {"$date": …}
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use poem_import::{convert_to_file, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder()
//!         .input_path("poems.txt")
//!         .output_path("poems_for_import.json")
//!         .owner_id("user-openid")
//!         .build()?;
//!     let stats = convert_to_file(&config)?;
//!     eprintln!("{} poems converted, {} skipped", stats.converted, stats.skipped);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `poem2json` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, convert_str, convert_to_file, convert_to_writer, inspect};
pub use error::{BlockError, PoemImportError};
pub use output::{ConversionOutput, ConversionStats, CreateTime, InputSummary, PoemRecord};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
