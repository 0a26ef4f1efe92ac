//! Presentation document model and parser.
//!
//! This module handles:
//! - Extracting the YAML frontmatter block
//! - Splitting the body into slides
//! - Folding inline directives into chunks, speaker notes and columns

mod directive;
mod frontmatter;
mod parser;
mod types;

pub use directive::{extract_directives, parse_directive};
pub use frontmatter::parse_frontmatter;
pub use parser::{parse, split_slides};
pub use types::{
    COLUMN_GAP, Chunk, ColumnLayout, DEFAULT_PAGING, Directive, Document, Metadata, Slide,
};
