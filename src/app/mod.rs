//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{CodeOutput, InputMode, Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::render::Theme;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    source: String,
    watch_path: Option<PathBuf>,
    theme: Option<Theme>,
}

impl App {
    /// Create a new application presenting `source`.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            watch_path: None,
            theme: None,
        }
    }

    /// Reload from `path` whenever it changes on disk.
    pub fn with_watch(mut self, path: Option<PathBuf>) -> Self {
        self.watch_path = path;
        self
    }

    /// Force a theme. `None` defers to the deck and the terminal.
    pub const fn with_theme(mut self, theme: Option<Theme>) -> Self {
        self.theme = theme;
        self
    }
}
