//! Output types: the import record and the per-run summaries.

use crate::error::BlockError;
use crate::pipeline::encode::import_date;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One poem, shaped exactly like a document of the target `posts` collection.
///
/// Field order matches the serialised key order. Every field is always
/// present, including the empty image fields, so the import tool infers the
/// same column types as documents created by the app itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoemRecord {
    pub title: String,
    pub content: String,
    /// Account that owns the record. Serialised under the database's
    /// system owner key.
    #[serde(rename = "_openid")]
    pub owner_id: String,
    pub create_time: CreateTime,
    pub comment_count: u64,
    pub votes: u64,
    pub is_poem: bool,
    pub is_original: bool,
    pub image_url: String,
    pub image_urls: Vec<String>,
    pub original_image_url: String,
    pub original_image_urls: Vec<String>,
    pub poem_bg_image: String,
    pub tags: Vec<String>,
}

impl PoemRecord {
    /// Build a record with zeroed counters and empty media fields.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        owner_id: impl Into<String>,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            owner_id: owner_id.into(),
            create_time: CreateTime::new(created),
            comment_count: 0,
            votes: 0,
            is_poem: true,
            is_original: false,
            image_url: String::new(),
            image_urls: Vec::new(),
            original_image_url: String::new(),
            original_image_urls: Vec::new(),
            poem_bg_image: String::new(),
            tags: Vec::new(),
        }
    }

    /// Replace the tag list.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set `isOriginal`.
    pub fn with_original(mut self, is_original: bool) -> Self {
        self.is_original = is_original;
        self
    }
}

/// A timestamp wrapped as `{"$date": "..."}` so the import tool stores it as
/// a Date instead of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTime {
    #[serde(rename = "$date", with = "import_date")]
    pub date: DateTime<Utc>,
}

impl CreateTime {
    pub fn new(date: DateTime<Utc>) -> Self {
        Self { date }
    }
}

/// Statistics for one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Non-empty blocks found in the input.
    pub total_blocks: usize,
    /// Records written.
    pub converted: usize,
    /// Malformed blocks skipped.
    pub skipped: usize,
    pub duration_ms: u64,
}

/// In-memory result of [`crate::convert::convert`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Records in input order.
    pub records: Vec<PoemRecord>,
    /// Malformed blocks in input order.
    pub skipped: Vec<BlockError>,
    pub stats: ConversionStats,
}

/// Result of [`crate::convert::inspect`]: what a conversion would produce,
/// without writing anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSummary {
    pub total_blocks: usize,
    /// Titles of blocks that would be converted, in input order.
    pub titles: Vec<String>,
    pub malformed: Vec<BlockError>,
}

impl InputSummary {
    /// Number of blocks that would become records.
    pub fn valid_blocks(&self) -> usize {
        self.titles.len()
    }
}
