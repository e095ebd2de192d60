//! Block splitting: two explicit text-scanning passes over normalised input.
//!
//! 1. [`split_blocks`] walks the lines and cuts the text wherever a run of at
//!    least [`BLOCK_SEPARATOR_BLANK_LINES`] blank lines occurs.
//! 2. [`split_title_body`] cuts one block at its first blank line into a
//!    title and a body.
//!
//! A line is *blank* when it is empty or holds only Unicode whitespace
//! (including the ideographic space U+3000 common in CJK text).
//! Single blank lines inside a body (stanza breaks) are preserved.

use crate::error::BlockError;

/// Minimum number of consecutive blank lines that separates two poems.
pub const BLOCK_SEPARATOR_BLANK_LINES: usize = 2;

/// One candidate poem: a trimmed, non-empty run of text between separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// 1-based position among the non-empty blocks of the input.
    pub ordinal: usize,
    pub text: String,
}

/// A block that decomposed into a title and a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPoem {
    pub title: String,
    pub content: String,
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Pass 1: split `text` (already `\n`-normalised) into non-empty blocks.
pub fn split_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut blank_run = 0usize;

    for line in text.split('\n') {
        if is_blank(line) {
            blank_run += 1;
            current.push(line);
            continue;
        }
        if blank_run >= BLOCK_SEPARATOR_BLANK_LINES {
            flush_block(&mut current, &mut blocks);
        }
        blank_run = 0;
        current.push(line);
    }
    flush_block(&mut current, &mut blocks);

    blocks
}

fn flush_block(lines: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    let joined = lines.join("\n");
    lines.clear();
    let text = joined.trim();
    if !text.is_empty() {
        blocks.push(Block {
            ordinal: blocks.len() + 1,
            text: text.to_string(),
        });
    }
}

/// Pass 2: split a block at its first blank line.
///
/// Returns `None` when there is no blank line, or when the title or the body
/// is empty after trimming.
pub fn split_title_body(block: &str) -> Option<(&str, &str)> {
    let mut offset = 0usize;
    for line in block.split_inclusive('\n') {
        let bare = line.strip_suffix('\n').unwrap_or(line);
        if is_blank(bare) {
            let title = block[..offset].trim();
            let content = block[offset + line.len()..].trim();
            if title.is_empty() || content.is_empty() {
                return None;
            }
            return Some((title, content));
        }
        offset += line.len();
    }
    None
}

/// Run pass 2 on a block, producing a [`BlockError`] for malformed input.
pub fn parse_block(block: &Block, preview_chars: usize) -> Result<ParsedPoem, BlockError> {
    match split_title_body(&block.text) {
        Some((title, content)) => Ok(ParsedPoem {
            title: title.to_string(),
            content: content.to_string(),
        }),
        None => Err(BlockError::Malformed {
            block: block.ordinal,
            preview: preview(&block.text, preview_chars),
        }),
    }
}

/// The first `max_chars` characters of `text` on a single line.
pub fn preview(text: &str, max_chars: usize) -> String {
    text.chars()
        .take(max_chars)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}
