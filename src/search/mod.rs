//! Slide search.
//!
//! Provides text search across slides with:
//! - Forward and backward search with wraparound
//! - Regex patterns, with a literal fallback for invalid forward patterns
//! - Case-insensitive matching via a trailing `/i`
//!
//! Slides are always matched on their fully revealed text.

use regex::{Regex, RegexBuilder};

use crate::document::Slide;

const CASE_INSENSITIVE_SUFFIX: &str = "/i";

/// Which way to scan from the starting slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Scan `start, start+1, ...`, including `start` itself.
    Forward,
    /// Scan `start-1, start-2, ...`, excluding `start`.
    Backward,
}

/// Outcome of a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub slide_index: usize,
    pub found: bool,
}

impl SearchResult {
    const NOT_FOUND: Self = Self {
        slide_index: 0,
        found: false,
    };

    const fn at(slide_index: usize) -> Self {
        Self {
            slide_index,
            found: true,
        }
    }

    /// The matching slide, if any.
    pub const fn index(self) -> Option<usize> {
        if self.found {
            Some(self.slide_index)
        } else {
            None
        }
    }
}

/// Search `slides` for `query`, starting at `start` and wrapping around.
///
/// # Example
///
/// ```
/// use deck::document::Slide;
/// use deck::search::{search, Direction};
///
/// let slides = [Slide::single("# Target"), Slide::single("# Middle")];
/// let result = search(&slides, "target/i", 1, Direction::Forward);
/// assert_eq!(result.index(), Some(0));
/// ```
pub fn search(slides: &[Slide], query: &str, start: usize, direction: Direction) -> SearchResult {
    if query.is_empty() || slides.is_empty() {
        return SearchResult::NOT_FOUND;
    }

    let (pattern, case_insensitive) = match query.strip_suffix(CASE_INSENSITIVE_SUFFIX) {
        Some(rest) => (rest, true),
        None => (query, false),
    };

    let matcher = match compile(pattern, case_insensitive) {
        Ok(regex) => Matcher::Regex(regex),
        Err(err) if direction == Direction::Forward => {
            tracing::debug!("search pattern {pattern:?} is not a regex ({err}); matching literally");
            Matcher::literal(pattern, case_insensitive)
        }
        Err(err) => {
            tracing::debug!("backward search with invalid pattern {pattern:?}: {err}");
            return SearchResult::NOT_FOUND;
        }
    };

    let n = slides.len();
    let candidates = match direction {
        Direction::Forward => n,
        Direction::Backward => n - 1,
    };
    let result = (0..candidates)
        .map(|i| match direction {
            Direction::Forward => (start % n + i) % n,
            Direction::Backward => (start % n + n - 1 - i) % n,
        })
        .find(|&index| matcher.is_match(&slides[index].full_content()))
        .map_or(SearchResult::NOT_FOUND, SearchResult::at);
    tracing::debug!(?direction, ?result, "search");
    result
}

/// Search forward starting one slide after `current`.
pub fn search_next(slides: &[Slide], query: &str, current: usize) -> SearchResult {
    if slides.is_empty() {
        return SearchResult::NOT_FOUND;
    }
    search(slides, query, (current + 1) % slides.len(), Direction::Forward)
}

/// Search backward from `current`, excluding it.
pub fn search_prev(slides: &[Slide], query: &str, current: usize) -> SearchResult {
    search(slides, query, current, Direction::Backward)
}

fn compile(pattern: &str, case_insensitive: bool) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
}

enum Matcher {
    Regex(Regex),
    Literal { needle: String, fold_case: bool },
}

impl Matcher {
    fn literal(pattern: &str, fold_case: bool) -> Self {
        let needle = if fold_case {
            pattern.to_lowercase()
        } else {
            pattern.to_string()
        };
        Self::Literal { needle, fold_case }
    }

    fn is_match(&self, haystack: &str) -> bool {
        match self {
            Self::Regex(regex) => regex.is_match(haystack),
            Self::Literal {
                needle,
                fold_case: true,
            } => haystack.to_lowercase().contains(needle.as_str()),
            Self::Literal { needle, .. } => haystack.contains(needle.as_str()),
        }
    }
}
