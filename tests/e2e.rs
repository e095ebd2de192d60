//! End-to-end integration tests for poem-import.
//!
//! Each test writes a small poem collection into a scratch directory,
//! runs the file-to-file conversion and checks the NDJSON it produced.
//!
//! Run with:
//!   cargo test --test e2e -- --nocapture

use poem_import::{
    convert, convert_to_file, inspect, ConversionConfig, ConversionProgressCallback,
    PoemImportError, ProgressCallback,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

const MIXED_INPUT: &str = "A\n\nB\n\n\n\nJustOneParagraph\n\n\n\nC\n\nD";

/// Write `text` as `poems.txt` in a fresh scratch directory.
fn scratch_input(text: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("poems.txt");
    std::fs::write(&path, text).expect("write input");
    (dir, path)
}

fn config_for(input: &Path, output: &Path) -> ConversionConfig {
    ConversionConfig::builder()
        .input_path(input)
        .output_path(output)
        .owner_id("owner-under-test")
        .tags(["博尔赫斯"])
        .build()
        .expect("valid config")
}

fn read_lines(path: &Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .expect("read output")
        .lines()
        .map(|l| serde_json::from_str(l).expect("every line is valid JSON"))
        .collect()
}

/// Assert a line carries every import field with the exact JSON type.
fn assert_record_shape(v: &Value, context: &str) {
    let obj = v.as_object().unwrap_or_else(|| panic!("[{context}] not an object"));
    assert_eq!(obj.len(), 14, "[{context}] unexpected key count: {obj:?}");

    for key in ["title", "content", "_openid", "imageUrl", "originalImageUrl", "poemBgImage"] {
        assert!(obj[key].is_string(), "[{context}] {key} must be a string");
    }
    for key in ["imageUrl", "originalImageUrl", "poemBgImage"] {
        assert_eq!(obj[key], "", "[{context}] {key} must be empty");
    }
    for key in ["imageUrls", "originalImageUrls"] {
        assert_eq!(obj[key], Value::Array(vec![]), "[{context}] {key} must be []");
    }
    for key in ["commentCount", "votes"] {
        assert_eq!(obj[key].as_u64(), Some(0), "[{context}] {key} must be 0");
    }
    assert_eq!(obj["isPoem"], Value::Bool(true), "[{context}] isPoem");
    assert_eq!(obj["isOriginal"], Value::Bool(false), "[{context}] isOriginal");
    assert!(obj["tags"].is_array(), "[{context}] tags must be an array");

    let ct = obj["createTime"]
        .as_object()
        .unwrap_or_else(|| panic!("[{context}] createTime must be an object"));
    assert_eq!(ct.len(), 1, "[{context}] createTime has exactly one key");
    let date = ct["$date"]
        .as_str()
        .unwrap_or_else(|| panic!("[{context}] $date must be a string"));
    assert!(date.ends_with('Z'), "[{context}] $date must be UTC: {date}");
    assert!(
        chrono::DateTime::parse_from_rfc3339(date).is_ok(),
        "[{context}] $date must be ISO-8601: {date}"
    );
}

fn titles(lines: &[Value]) -> Vec<&str> {
    lines.iter().map(|v| v["title"].as_str().unwrap()).collect()
}

// ── File conversion ──────────────────────────────────────────────────────────

#[test]
fn test_mixed_input_skips_malformed_block() {
    let (dir, input) = scratch_input(MIXED_INPUT);
    let output = dir.path().join("out.json");

    let stats = convert_to_file(&config_for(&input, &output)).expect("conversion succeeds");

    assert_eq!(stats.total_blocks, 3);
    assert_eq!(stats.converted, 2);
    assert_eq!(stats.skipped, 1);

    let lines = read_lines(&output);
    assert_eq!(titles(&lines), vec!["A", "C"]);
    assert_eq!(lines[0]["content"], "B");
    assert_eq!(lines[1]["content"], "D");
    for (i, line) in lines.iter().enumerate() {
        assert_record_shape(line, &format!("line {}", i + 1));
        assert_eq!(line["_openid"], "owner-under-test");
        assert_eq!(line["tags"], serde_json::json!(["博尔赫斯"]));
    }
}

#[test]
fn test_non_ascii_written_literally() {
    let (dir, input) = scratch_input("无题\n\n相见时难别亦难，\n东风无力百花残。\n");
    let output = dir.path().join("out.json");

    convert_to_file(&config_for(&input, &output)).expect("conversion succeeds");

    let raw = std::fs::read_to_string(&output).unwrap();
    assert!(raw.contains(r#""title":"无题""#), "got: {raw}");
    assert!(!raw.contains("\\u"), "non-ASCII must not be escaped: {raw}");
    assert!(raw.ends_with('\n'));

    let lines = read_lines(&output);
    assert_eq!(lines[0]["content"], "相见时难别亦难，\n东风无力百花残。");
}

#[test]
fn test_output_order_matches_input_order() {
    let poems: Vec<String> = (1..=20)
        .map(|i| format!("Poem {i}\n\nline {i}\n\nsecond stanza {i}"))
        .collect();
    let (dir, input) = scratch_input(&poems.join("\n\n\n"));
    let output = dir.path().join("out.json");

    let stats = convert_to_file(&config_for(&input, &output)).unwrap();
    assert_eq!(stats.converted, 20);

    let lines = read_lines(&output);
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(line["title"], format!("Poem {}", i + 1));
        assert_eq!(
            line["content"],
            format!("line {}\n\nsecond stanza {}", i + 1, i + 1)
        );
    }
}

#[test]
fn test_two_runs_differ_only_in_create_time() {
    let (dir, input) = scratch_input(MIXED_INPUT);
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    convert_to_file(&config_for(&input, &first)).unwrap();
    convert_to_file(&config_for(&input, &second)).unwrap();

    let strip = |mut v: Value| {
        v.as_object_mut().unwrap().remove("createTime");
        v
    };
    let a: Vec<Value> = read_lines(&first).into_iter().map(strip).collect();
    let b: Vec<Value> = read_lines(&second).into_iter().map(strip).collect();
    assert_eq!(a, b);
}

#[test]
fn test_existing_output_is_overwritten() {
    let (dir, input) = scratch_input("T\n\nbody");
    let output = dir.path().join("out.json");
    std::fs::write(&output, "stale line 1\nstale line 2\nstale line 3\n").unwrap();

    convert_to_file(&config_for(&input, &output)).unwrap();

    let lines = read_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["title"], "T");
}

#[test]
fn test_missing_parent_directory_created() {
    let (dir, input) = scratch_input("T\n\nbody");
    let output = dir.path().join("nested/deeper/out.json");

    convert_to_file(&config_for(&input, &output)).unwrap();
    assert_eq!(read_lines(&output).len(), 1);
}

#[test]
fn test_all_blocks_malformed_writes_empty_file() {
    let (dir, input) = scratch_input("one\n\n\ntwo\n\n\nthree");
    let output = dir.path().join("out.json");

    let stats = convert_to_file(&config_for(&input, &output)).unwrap();
    assert_eq!(stats.converted, 0);
    assert_eq!(stats.skipped, 3);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
}

// ── Missing input ────────────────────────────────────────────────────────────

#[test]
fn test_missing_input_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("does-not-exist.txt");
    let output = dir.path().join("out.json");

    let err = convert_to_file(&config_for(&input, &output)).unwrap_err();
    assert!(err.is_missing_input(), "got: {err}");
    assert!(matches!(err, PoemImportError::InputNotFound { .. }));
    assert!(!output.exists(), "output must not be created");
}

#[test]
fn test_missing_input_leaves_existing_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("does-not-exist.txt");
    let output = dir.path().join("out.json");
    std::fs::write(&output, "previous run\n").unwrap();

    assert!(convert_to_file(&config_for(&input, &output)).is_err());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous run\n");
}

// ── In-memory conversion and inspection ──────────────────────────────────────

#[test]
fn test_convert_in_memory_matches_file_run() {
    let (dir, input) = scratch_input(MIXED_INPUT);
    let output = dir.path().join("out.json");
    let config = config_for(&input, &output);

    let in_memory = convert(&config).unwrap();
    convert_to_file(&config).unwrap();

    let from_file = read_lines(&output);
    assert_eq!(in_memory.records.len(), from_file.len());
    for (record, line) in in_memory.records.iter().zip(&from_file) {
        assert_eq!(line["title"], record.title.as_str());
        assert_eq!(line["content"], record.content.as_str());
    }
    assert_eq!(in_memory.skipped[0].preview(), "JustOneParagraph");
}

#[test]
fn test_inspect_reports_without_writing() {
    let (dir, input) = scratch_input(MIXED_INPUT);

    let summary = inspect(&input, 50).unwrap();
    assert_eq!(summary.total_blocks, 3);
    assert_eq!(summary.titles, vec!["A".to_string(), "C".to_string()]);
    assert_eq!(summary.malformed.len(), 1);
    assert_eq!(summary.malformed[0].block(), 2);

    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1, "inspect must not create files");
}

// ── Progress callback ────────────────────────────────────────────────────────

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

impl ConversionProgressCallback for Recorder {
    fn on_conversion_start(&self, _input: &Path, total_blocks: usize) {
        self.events.lock().unwrap().push(format!("start {total_blocks}"));
    }

    fn on_poem_written(&self, index: usize, title: &str) {
        self.events.lock().unwrap().push(format!("poem {index} {title}"));
    }

    fn on_block_skipped(&self, block: usize, preview: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("skip {block} {preview}"));
    }

    fn on_conversion_complete(&self, converted: usize, skipped: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("done {converted} {skipped}"));
    }
}

#[test]
fn test_progress_events_follow_input_order() {
    let (dir, input) = scratch_input(MIXED_INPUT);
    let output = dir.path().join("out.json");
    let recorder = Arc::new(Recorder::default());

    let config = ConversionConfig::builder()
        .input_path(&input)
        .output_path(&output)
        .progress_callback(recorder.clone() as ProgressCallback)
        .build()
        .unwrap();
    convert_to_file(&config).unwrap();

    let events = recorder.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            "start 3",
            "poem 1 A",
            "skip 2 JustOneParagraph",
            "poem 2 C",
            "done 2 1",
        ]
    );
}

#[test]
fn test_callback_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Recorder>();
    assert_send_sync::<ConversionConfig>();
}
