//! NDJSON encoding for the cloud database import tool.
//!
//! Each record becomes one self-contained JSON document on its own line.
//! `serde_json` writes non-ASCII text literally, so CJK titles stay readable
//! in the output file. Timestamps use the tool's `{"$date": ...}` dialect;
//! that policy lives entirely in [`import_date`].

use crate::output::PoemRecord;
use std::io::Write;

/// Append `record` to `writer` as one NDJSON line.
///
/// `PoemRecord` holds only strings, integers, booleans and string lists, so
/// serialisation itself cannot fail; every error returned is the writer's.
pub fn write_line<W: Write>(writer: &mut W, record: &PoemRecord) -> std::io::Result<()> {
    serde_json::to_writer(&mut *writer, record)?;
    writer.write_all(b"\n")
}

/// `serde(with = ...)` adapter for the import tool's date representation.
///
/// Serialises a UTC instant as ISO-8601 with microsecond precision and a `Z`
/// suffix, e.g. `2024-05-01T08:30:00.123456Z`.
pub mod import_date {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(date: &DateTime<Utc>) -> String {
        date.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|d| d.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
