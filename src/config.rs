//! Configuration types for text-to-NDJSON poem conversion.
//!
//! Every per-run constant (where to read, where to write, whose account owns
//! the imported records, which tags they carry) lives in
//! [`ConversionConfig`], built via its [`ConversionConfigBuilder`]. The same
//! conversion logic can then run against arbitrary input/output targets,
//! including temporary files in tests.

use crate::error::PoemImportError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;

/// Default input file, relative to the working directory.
pub const DEFAULT_INPUT_PATH: &str = "poems.txt";

/// Default output file, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "poems_for_import.json";

/// Default owner id written into `_openid`.
pub const DEFAULT_OWNER_ID: &str = "ojYBd1_A3uCbQ1LGcHxWxOAeA5SE";

/// Default tag attached to every record.
pub const DEFAULT_TAG: &str = "博尔赫斯";

/// Default number of characters quoted from a malformed block in warnings.
pub const DEFAULT_PREVIEW_CHARS: usize = 50;

/// Configuration for one conversion run.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`], which reproduces the historical
/// constants of the batch script.
///
/// # Example
/// ```rust
/// use poem_import::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .input_path("poems.txt")
///     .output_path("out/poems.json")
///     .owner_id("user-openid")
///     .tags(["现代诗"])
///     .build()
///     .unwrap();
/// assert_eq!(config.tags, vec!["现代诗".to_string()]);
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Plain-text poem collection to read. Default: `poems.txt`.
    pub input_path: PathBuf,

    /// NDJSON file to create or overwrite. Default: `poems_for_import.json`.
    pub output_path: PathBuf,

    /// Owner identifier stored on every record. Must not be empty.
    pub owner_id: String,

    /// Tags stored on every record. Default: a single `博尔赫斯` tag.
    pub tags: Vec<String>,

    /// Value of `isOriginal` for every record. Default: false.
    pub is_original: bool,

    /// How many characters of a malformed block to quote in its warning. Default: 50.
    pub preview_chars: usize,

    /// Optional progress callback for per-poem events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            owner_id: DEFAULT_OWNER_ID.to_string(),
            tags: vec![DEFAULT_TAG.to_string()],
            is_original: false,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("input_path", &self.input_path)
            .field("output_path", &self.output_path)
            .field("owner_id", &self.owner_id)
            .field("tags", &self.tags)
            .field("is_original", &self.is_original)
            .field("preview_chars", &self.preview_chars)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.input_path = path.into();
        self
    }

    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    pub fn owner_id(mut self, id: impl Into<String>) -> Self {
        self.config.owner_id = id.into();
        self
    }

    /// Replace the tag list.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_original(mut self, v: bool) -> Self {
        self.config.is_original = v;
        self
    }

    pub fn preview_chars(mut self, n: usize) -> Self {
        self.config.preview_chars = n.max(1);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, PoemImportError> {
        let c = &self.config;
        if c.owner_id.trim().is_empty() {
            return Err(PoemImportError::InvalidConfig(
                "Owner id must not be empty".into(),
            ));
        }
        if c.input_path.as_os_str().is_empty() {
            return Err(PoemImportError::InvalidConfig(
                "Input path must not be empty".into(),
            ));
        }
        if c.output_path.as_os_str().is_empty() {
            return Err(PoemImportError::InvalidConfig(
                "Output path must not be empty".into(),
            ));
        }
        if c.input_path == c.output_path {
            return Err(PoemImportError::InvalidConfig(format!(
                "Output path must differ from input path, got '{}' for both",
                c.input_path.display()
            )));
        }
        if c.tags.iter().any(|t| t.trim().is_empty()) {
            return Err(PoemImportError::InvalidConfig(
                "Tags must not be empty strings".into(),
            ));
        }
        Ok(self.config)
    }
}
