//! YAML frontmatter extraction.
//!
//! The metadata block uses the same `---` delimiter as slide boundaries, so
//! it must be removed before the body is split into slides.

use serde::Deserialize;
use serde_yaml::Value;

use super::types::{DEFAULT_PAGING, Metadata};

const DELIMITER: &str = "---";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFrontmatter {
    theme: Option<Value>,
    author: Option<Value>,
    date: Option<Value>,
    paging: Option<Value>,
    footer: Option<Value>,
}

/// Extract the metadata block from the head of `content`.
///
/// Returns the metadata and the remaining body. When there is no complete
/// block (missing opening or closing delimiter) the content is returned
/// unchanged with empty metadata and no defaults applied.
pub fn parse_frontmatter(content: &str) -> (Metadata, String) {
    let trimmed = content.trim_start();
    let Some(after_open) = strip_opening_line(trimmed) else {
        return (Metadata::default(), content.to_string());
    };
    let Some(close) = find_closing_line(after_open) else {
        tracing::debug!("frontmatter opened but never closed; treating as body");
        return (Metadata::default(), content.to_string());
    };

    let yaml = &after_open[..close];
    let rest = &after_open[close + DELIMITER.len()..];
    let remainder = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .unwrap_or(rest);

    let mut metadata = metadata_from_yaml(yaml);
    if metadata.paging.is_none() {
        metadata.paging = Some(DEFAULT_PAGING.to_string());
    }
    (metadata, remainder.to_string())
}

fn strip_opening_line(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(DELIMITER)?;
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

/// Byte offset of the first line in `text` consisting of exactly `---`.
fn find_closing_line(text: &str) -> Option<usize> {
    let mut start = 0;
    loop {
        let line_end = text[start..].find('\n').map(|i| start + i);
        let line = &text[start..line_end.unwrap_or(text.len())];
        if line.trim_end_matches('\r') == DELIMITER {
            return Some(start);
        }
        start = line_end? + 1;
    }
}

fn metadata_from_yaml(yaml: &str) -> Metadata {
    if yaml.trim().is_empty() {
        return Metadata::default();
    }
    let raw: RawFrontmatter = match serde_yaml::from_str(yaml) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::debug!("ignoring unparseable frontmatter: {err}");
            return Metadata::default();
        }
    };
    Metadata {
        theme: scalar_string(raw.theme),
        author: scalar_string(raw.author),
        date: scalar_string(raw.date),
        paging: scalar_string(raw.paging),
        footer: scalar_string(raw.footer),
    }
}

/// Stringify a YAML scalar. Mappings, sequences, nulls and empty strings
/// count as absent.
fn scalar_string(value: Option<Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_frontmatter_returns_content_unchanged() {
        let content = "# Hello\n\nWorld";
        let (meta, rest) = parse_frontmatter(content);
        assert_eq!(meta, Metadata::default());
        assert_eq!(rest, content);
    }

    #[test]
    fn test_frontmatter_fields_are_extracted() {
        let content = "---\nauthor: Jane\ndate: 2025-01-15\ntheme: light\n---\n# Slide";
        let (meta, rest) = parse_frontmatter(content);
        assert_eq!(meta.author.as_deref(), Some("Jane"));
        assert_eq!(meta.date.as_deref(), Some("2025-01-15"));
        assert_eq!(meta.theme.as_deref(), Some("light"));
        assert_eq!(rest, "# Slide");
    }

    #[test]
    fn test_paging_defaults_only_when_block_present() {
        let (meta, _) = parse_frontmatter("---\nauthor: A\n---\nbody");
        assert_eq!(meta.paging.as_deref(), Some(DEFAULT_PAGING));

        let (meta, _) = parse_frontmatter("body only");
        assert_eq!(meta.paging, None);
    }

    #[test]
    fn test_custom_paging_is_kept() {
        let (meta, _) = parse_frontmatter("---\npaging: \"%d of %d\"\n---\nbody");
        assert_eq!(meta.paging.as_deref(), Some("%d of %d"));
    }

    #[test]
    fn test_unterminated_frontmatter_is_body() {
        let content = "---\nauthor: A\n# Slide";
        let (meta, rest) = parse_frontmatter(content);
        assert_eq!(meta, Metadata::default());
        assert_eq!(rest, content);
    }

    #[test]
    fn test_invalid_yaml_degrades_to_defaults() {
        let (meta, rest) = parse_frontmatter("---\n: : [\n---\n# Body");
        assert_eq!(meta.author, None);
        assert_eq!(meta.paging.as_deref(), Some(DEFAULT_PAGING));
        assert_eq!(rest, "# Body");
    }

    #[test]
    fn test_unknown_keys_and_non_string_scalars() {
        let (meta, _) = parse_frontmatter("---\nvenue: Hall A\nauthor: 42\nfooter: [1, 2]\n---\n");
        assert_eq!(meta.author.as_deref(), Some("42"));
        assert_eq!(meta.footer, None);
    }

    #[test]
    fn test_leading_whitespace_before_block() {
        let (meta, rest) = parse_frontmatter("\n\n---\nauthor: A\n---\n\nbody");
        assert_eq!(meta.author.as_deref(), Some("A"));
        assert_eq!(rest, "\nbody", "only one leading newline is stripped");
    }

    #[test]
    fn test_crlf_delimiters() {
        let (meta, rest) = parse_frontmatter("---\r\nauthor: A\r\n---\r\n# One");
        assert_eq!(meta.author.as_deref(), Some("A"));
        assert_eq!(rest, "# One");
    }

    #[test]
    fn test_empty_block_still_applies_default() {
        let (meta, rest) = parse_frontmatter("---\n---\n# One");
        assert_eq!(meta.paging.as_deref(), Some(DEFAULT_PAGING));
        assert_eq!(rest, "# One");
    }
}
