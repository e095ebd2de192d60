//! Conversion entry points.
//!
//! [`convert_to_file`] is the batch run: read the input, open the output
//! once, write one line per poem as it is built. [`convert`] and
//! [`convert_str`] build the records in memory instead, and [`inspect`]
//! reports what a run would do without writing anything.

use crate::config::ConversionConfig;
use crate::error::{BlockError, PoemImportError};
use crate::output::{ConversionOutput, ConversionStats, InputSummary, PoemRecord};
use crate::pipeline::{encode, input, split};
use chrono::Utc;
use std::convert::Infallible;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Read `config.input_path` and convert it to records in memory.
///
/// # Errors
/// Returns `Err(PoemImportError)` only when the input cannot be read.
/// Malformed blocks are collected in [`ConversionOutput::skipped`].
pub fn convert(config: &ConversionConfig) -> Result<ConversionOutput, PoemImportError> {
    let text = input::read_input(&config.input_path)?;
    Ok(convert_str(&text, config))
}

/// Convert already-loaded text to records in memory.
///
/// Line endings are normalised here as well, so callers may pass raw text.
pub fn convert_str(text: &str, config: &ConversionConfig) -> ConversionOutput {
    let start = Instant::now();
    let text = input::normalise_text(text);
    let mut records = Vec::new();
    let result = run_blocks(&text, config, |record| {
        records.push(record.clone());
        Ok::<(), Infallible>(())
    });
    let (tally, skipped) = match result {
        Ok(done) => done,
        Err(never) => match never {},
    };

    ConversionOutput {
        records,
        skipped,
        stats: tally.into_stats(start),
    }
}

/// Convert `text` and stream NDJSON lines into `writer`.
///
/// Write failures are reported as [`PoemImportError::OutputWriteFailed`]
/// against `config.output_path`.
pub fn convert_to_writer<W: Write>(
    text: &str,
    writer: &mut W,
    config: &ConversionConfig,
) -> Result<ConversionStats, PoemImportError> {
    let start = Instant::now();
    let text = input::normalise_text(text);
    let (tally, _skipped) = write_records(&text, writer, &config.output_path, config)?;
    Ok(tally.into_stats(start))
}

/// Convert `config.input_path` into the NDJSON file `config.output_path`.
///
/// The input is read in full before the output is opened, so a missing
/// input never creates or truncates the output file. The output is opened
/// once, written line by line, flushed, and closed on every exit path.
///
/// # Errors
/// - [`PoemImportError::InputNotFound`] / [`PoemImportError::PermissionDenied`] /
///   [`PoemImportError::InputReadFailed`] — input could not be read
/// - [`PoemImportError::OutputWriteFailed`] — output could not be created or written
pub fn convert_to_file(config: &ConversionConfig) -> Result<ConversionStats, PoemImportError> {
    let start = Instant::now();
    info!("Starting conversion: {}", config.input_path.display());

    let text = input::read_input(&config.input_path)?;
    let path = config.output_path.as_path();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PoemImportError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let file = File::create(path).map_err(|e| PoemImportError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);

    let (tally, _skipped) = write_records(&text, &mut writer, path, config)?;

    writer
        .flush()
        .map_err(|e| PoemImportError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    let stats = tally.into_stats(start);
    info!(
        "Conversion complete: {}/{} blocks converted, {} skipped, {}ms → {}",
        stats.converted,
        stats.total_blocks,
        stats.skipped,
        stats.duration_ms,
        path.display()
    );
    Ok(stats)
}

/// Scan `path` and report valid and malformed blocks without converting.
pub fn inspect(
    path: impl AsRef<Path>,
    preview_chars: usize,
) -> Result<InputSummary, PoemImportError> {
    let text = input::read_input(path.as_ref())?;
    let blocks = split::split_blocks(&text);

    let mut summary = InputSummary {
        total_blocks: blocks.len(),
        ..InputSummary::default()
    };
    for block in &blocks {
        match split::parse_block(block, preview_chars) {
            Ok(poem) => summary.titles.push(poem.title),
            Err(e) => summary.malformed.push(e),
        }
    }
    Ok(summary)
}

// ── Internal helpers ─────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Tally {
    total_blocks: usize,
    converted: usize,
    skipped: usize,
}

impl Tally {
    fn into_stats(self, start: Instant) -> ConversionStats {
        ConversionStats {
            total_blocks: self.total_blocks,
            converted: self.converted,
            skipped: self.skipped,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }
}

fn write_records<W: Write>(
    text: &str,
    writer: &mut W,
    path: &Path,
    config: &ConversionConfig,
) -> Result<(Tally, Vec<BlockError>), PoemImportError> {
    run_blocks(text, config, |record| {
        encode::write_line(&mut *writer, record).map_err(|e| PoemImportError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })
    })
}

/// Drive both passes over `text`, handing each finished record to `emit`
/// in input order. Malformed blocks are warned about and collected.
fn run_blocks<E, F>(
    text: &str,
    config: &ConversionConfig,
    mut emit: F,
) -> Result<(Tally, Vec<BlockError>), E>
where
    F: FnMut(&PoemRecord) -> Result<(), E>,
{
    let blocks = split::split_blocks(text);
    debug!("Found {} candidate blocks", blocks.len());

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(&config.input_path, blocks.len());
    }

    let mut tally = Tally {
        total_blocks: blocks.len(),
        ..Tally::default()
    };
    let mut skipped = Vec::new();

    for block in &blocks {
        let poem = match split::parse_block(block, config.preview_chars) {
            Ok(poem) => poem,
            Err(e) => {
                warn!("Skipping malformed block {}: '{}'", e.block(), e.preview());
                if let Some(ref cb) = config.progress_callback {
                    cb.on_block_skipped(e.block(), e.preview());
                }
                tally.skipped += 1;
                skipped.push(e);
                continue;
            }
        };

        let record = PoemRecord::new(
            poem.title,
            poem.content,
            config.owner_id.as_str(),
            Utc::now(),
        )
        .with_tags(config.tags.clone())
        .with_original(config.is_original);
        emit(&record)?;

        tally.converted += 1;
        debug!("Converted block {} as '{}'", block.ordinal, record.title);
        if let Some(ref cb) = config.progress_callback {
            cb.on_poem_written(tally.converted, &record.title);
        }
    }

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(tally.converted, tally.skipped);
    }

    Ok((tally, skipped))
}
