//! Progress-callback trait for per-poem conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as each block is converted or skipped. The library itself never
//! prints; the `poem2json` binary installs a callback that writes the
//! `[✓] title` / `[!] warning` lines to stdout.
//!
//! # Example
//!
//! ```rust
//! use poem_import::{ConversionProgressCallback, ConversionConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     written: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for CountingCallback {
//!     fn on_poem_written(&self, index: usize, title: &str) {
//!         self.written.fetch_add(1, Ordering::SeqCst);
//!         println!("#{index}: {title}");
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { written: AtomicUsize::new(0) });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;

/// Called by the converter as it processes each block.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Events arrive strictly in input order.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after the input has been split, before any record is built.
    ///
    /// # Arguments
    /// * `input`        — path the text was read from
    /// * `total_blocks` — number of non-empty blocks found in the input
    fn on_conversion_start(&self, input: &Path, total_blocks: usize) {
        let _ = (input, total_blocks);
    }

    /// Called after a record has been emitted, to the output file or to the
    /// in-memory result.
    ///
    /// # Arguments
    /// * `index` — 1-based count of records converted so far
    /// * `title` — trimmed title of the poem
    fn on_poem_written(&self, index: usize, title: &str) {
        let _ = (index, title);
    }

    /// Called when a block is skipped because it is malformed.
    ///
    /// # Arguments
    /// * `block`   — 1-based ordinal of the block in the input
    /// * `preview` — leading characters of the block
    fn on_block_skipped(&self, block: usize, preview: &str) {
        let _ = (block, preview);
    }

    /// Called once after every block has been attempted.
    fn on_conversion_complete(&self, converted: usize, skipped: usize) {
        let _ = (converted, skipped);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
