//! CLI binary for poem-import.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints progress to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use poem_import::config::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_OWNER_ID, DEFAULT_TAG};
use poem_import::{
    convert_to_file, inspect, ConversionConfig, ConversionProgressCallback, InputSummary,
    PoemImportError, ProgressCallback,
};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers ──────────────────────────────────────────────────────

#[derive(Clone, Copy)]
struct Palette {
    enabled: bool,
}

impl Palette {
    fn detect() -> Self {
        Self {
            enabled: io::stdout().is_terminal(),
        }
    }

    fn paint(&self, code: &str, s: &str) -> String {
        if self.enabled {
            format!("\x1b[{code}m{s}\x1b[0m")
        } else {
            s.to_string()
        }
    }

    fn green(&self, s: &str) -> String {
        self.paint("32", s)
    }
    fn yellow(&self, s: &str) -> String {
        self.paint("33", s)
    }
    fn red(&self, s: &str) -> String {
        self.paint("31", s)
    }
    fn bold(&self, s: &str) -> String {
        self.paint("1", s)
    }
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Prints one stdout line per converted or skipped poem while an indicatif
/// spinner on stderr tracks the running count.
struct CliProgressCallback {
    bar: ProgressBar,
    palette: Palette,
}

impl CliProgressCallback {
    fn new(show_bar: bool, palette: Palette) -> Arc<Self> {
        let bar = if show_bar {
            let bar = ProgressBar::new(0);
            let style = ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  [{bar:32.green/238}] {pos:>4}/{len} blocks  {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ");
            bar.set_style(style);
            bar.set_prefix("Converting");
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        } else {
            ProgressBar::hidden()
        };

        Arc::new(Self { bar, palette })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, input: &Path, total_blocks: usize) {
        self.bar.set_length(total_blocks as u64);
        let line = format!("Processing '{}' ({total_blocks} blocks)...", input.display());
        self.bar.suspend(|| println!("{line}"));
    }

    fn on_poem_written(&self, _index: usize, title: &str) {
        let line = format!("  [{}] Converted: {title}", self.palette.green("✓"));
        self.bar.suspend(|| println!("{line}"));
        self.bar.set_message(title.to_string());
        self.bar.inc(1);
    }

    fn on_block_skipped(&self, block: usize, preview: &str) {
        let line = format!(
            "  [{}] Warning: skipping malformed block {block}: '{preview}...'",
            self.palette.yellow("!")
        );
        self.bar.suspend(|| println!("{line}"));
        self.bar.inc(1);
    }

    fn on_conversion_complete(&self, _converted: usize, _skipped: usize) {
        self.bar.finish_and_clear();
    }
}

/// Convert a plain-text poem collection into NDJSON for cloud database import.
#[derive(Parser, Debug)]
#[command(
    name = "poem2json",
    version,
    about = "Convert a plain-text poem collection into newline-delimited JSON for database import",
    long_about = "Reads poems separated by two or more blank lines (title, one blank line, body) \
and writes one JSON document per poem, with owner id, createTime as {\"$date\": ...}, zeroed \
counters, empty image fields and a fixed tag list.",
    color = clap::ColorChoice::Auto
)]
struct Cli {
    /// Plain-text poem file.
    #[arg(env = "POEM2JSON_INPUT", default_value = DEFAULT_INPUT_PATH)]
    input: PathBuf,

    /// NDJSON file to create or overwrite.
    #[arg(short, long, env = "POEM2JSON_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Owner id stored in `_openid` on every record.
    #[arg(long, env = "POEM2JSON_OWNER_ID", default_value = DEFAULT_OWNER_ID)]
    owner_id: String,

    /// Tag stored on every record; repeat for several tags.
    #[arg(long = "tag", env = "POEM2JSON_TAGS", value_delimiter = ',', default_value = DEFAULT_TAG)]
    tags: Vec<String>,

    /// Mark every record as original work (`isOriginal: true`).
    #[arg(long, env = "POEM2JSON_ORIGINAL")]
    original: bool,

    /// Characters of a malformed block quoted in its warning.
    #[arg(long, env = "POEM2JSON_PREVIEW_CHARS", default_value_t = 50)]
    preview_chars: usize,

    /// Report valid and malformed blocks without writing output.
    #[arg(long)]
    inspect_only: bool,

    /// With --inspect-only, print the summary as JSON.
    #[arg(long, requires = "inspect_only")]
    json: bool,

    /// Disable the progress bar (per-poem lines are still printed).
    #[arg(long, env = "POEM2JSON_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "POEM2JSON_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "POEM2JSON_QUIET", conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_bar = !cli.quiet && !cli.no_progress && io::stderr().is_terminal();
    let filter = log_filter(&cli, show_bar);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let palette = Palette::detect();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let summary = match inspect(&cli.input, cli.preview_chars.max(1)) {
            Ok(summary) => summary,
            Err(e) if e.is_missing_input() => {
                report_missing_input(&cli.input, palette);
                return Ok(());
            }
            Err(e) => return Err(e).context("Failed to inspect input"),
        };

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?
            );
        } else {
            print_summary(&cli.input, &summary, palette);
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if cli.quiet {
        None
    } else {
        Some(CliProgressCallback::new(show_bar, palette) as Arc<dyn ConversionProgressCallback>)
    };

    let config = build_config(&cli, progress_cb)?;

    // ── Run conversion ───────────────────────────────────────────────────
    let stats = match convert_to_file(&config) {
        Ok(stats) => stats,
        Err(e) if e.is_missing_input() => {
            report_missing_input(&config.input_path, palette);
            return Ok(());
        }
        Err(e) => return Err(e).context("Conversion failed"),
    };

    if !cli.quiet {
        println!();
        println!(
            "Done! Converted {} poems{}.",
            palette.bold(&stats.converted.to_string()),
            if stats.skipped > 0 {
                format!(
                    ", skipped {} malformed blocks",
                    palette.yellow(&stats.skipped.to_string())
                )
            } else {
                String::new()
            }
        );
        println!("Output saved to: '{}'", config.output_path.display());
    }

    Ok(())
}

/// Default tracing level when `RUST_LOG` is unset.
///
/// The progress bar already shows skipped blocks, so library warnings are
/// only let through when no bar is drawn.
fn log_filter(cli: &Cli, show_bar: bool) -> &'static str {
    if cli.verbose {
        "debug"
    } else if cli.quiet || show_bar {
        "error"
    } else {
        "warn"
    }
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let tags: Vec<String> = cli
        .tags
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    let mut builder = ConversionConfig::builder()
        .input_path(&cli.input)
        .output_path(&cli.output)
        .owner_id(cli.owner_id.trim())
        .tags(tags)
        .is_original(cli.original)
        .preview_chars(cli.preview_chars);

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Missing input is reported, not treated as a process failure.
fn report_missing_input(path: &Path, palette: Palette) {
    let err = PoemImportError::InputNotFound {
        path: path.to_path_buf(),
    };
    println!("{} {err}", palette.red("Error:"));
}

fn print_summary(input: &Path, summary: &InputSummary, palette: Palette) {
    println!("File:            {}", input.display());
    println!("Blocks:          {}", summary.total_blocks);
    println!("Valid poems:     {}", summary.valid_blocks());
    println!("Malformed:       {}", summary.malformed.len());
    for e in &summary.malformed {
        println!(
            "  [{}] block {}: '{}...'",
            palette.yellow("!"),
            e.block(),
            e.preview()
        );
    }
}
