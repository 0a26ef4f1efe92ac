//! Runnable fenced code blocks.
//!
//! Slides can carry fenced code blocks tagged with a language. The viewer can
//! run the last visible block or copy it to the clipboard. Lines starting
//! with `///` are shown on the slide but hidden from execution.

mod execute;
mod languages;

pub use execute::{CodeError, EXECUTE_TIMEOUT, execute, execute_with_timeout};
pub use languages::{Language, language};

use once_cell::sync::Lazy;
use regex::Regex;

static CODE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(\w+)\n(.*?)\n```").expect("code block regex"));

const HIDDEN_LINE_PREFIX: &str = "///";

/// A fenced code block with its language tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: String,
    pub code: String,
}

/// Find all fenced code blocks with a language tag, in document order.
///
/// Blocks without a language tag are not runnable and are skipped.
pub fn extract_blocks(content: &str) -> Vec<CodeBlock> {
    CODE_BLOCK
        .captures_iter(content)
        .map(|caps| CodeBlock {
            language: caps[1].to_string(),
            code: caps[2].to_string(),
        })
        .collect()
}

/// The last runnable block in `content`, if any.
pub fn last_block(content: &str) -> Option<CodeBlock> {
    extract_blocks(content).pop()
}

/// Remove presenter-only lines (trimmed text starting with `///`).
pub fn strip_hidden_lines(code: &str) -> String {
    code.split('\n')
        .filter(|line| !line.trim().starts_with(HIDDEN_LINE_PREFIX))
        .collect::<Vec<_>>()
        .join("\n")
}
