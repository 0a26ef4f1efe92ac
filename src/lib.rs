// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. code::CodeBlock)
    clippy::module_name_repetitions
)]

//! # Deck
//!
//! Markdown slide presentations in the terminal.
//!
//! A deck is one markdown file: optional YAML frontmatter, slides separated
//! by `---` lines, and HTML comment directives for progressive reveal
//! (`<!-- pause -->`), speaker notes and column layouts.
//!
//! ## Architecture
//!
//! Deck uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`document`]: Deck parsing into slides and chunks
//! - [`nav`]: Slide/chunk navigation state machine
//! - [`diff`]: First changed slide between two parses
//! - [`search`]: Regex/literal search across slides
//! - [`code`]: Running fenced code blocks
//! - [`render`]: Markdown to styled terminal text
//! - [`highlight`]: Syntax highlighting
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`watcher`]: File watching
//! - [`config`]: Saved default flags
//! - [`logging`]: Tracing setup
//! - [`version`]: Build version reporting

pub mod app;
pub mod code;
pub mod config;
pub mod diff;
pub mod document;
pub mod highlight;
pub mod logging;
pub mod nav;
pub mod render;
pub mod search;
pub mod ui;
pub mod version;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::{Document, Slide};
    pub use crate::nav::{NavState, advance};
}
