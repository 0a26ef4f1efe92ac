use std::time::{Duration, Instant};

use crate::code::{self, CodeBlock};
use crate::document::{Document, Slide};
use crate::nav::NavState;
use crate::render::Theme;

const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Whether keys drive navigation or edit the search query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
}

/// Result of the last code block run, shown below the slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeOutput {
    pub text: String,
    pub is_error: bool,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Clone)]
pub struct Model {
    /// The deck being presented
    pub document: Document,
    /// Current slide and chunk
    pub nav: NavState,
    pub theme: Theme,
    /// Theme used when the deck does not name one
    fallback_theme: Theme,
    pub mode: InputMode,
    /// Query being typed in search mode
    pub search_input: String,
    /// Last submitted query, reused by search next/previous
    pub last_search: Option<String>,
    pub code_output: Option<CodeOutput>,
    /// A code block is running in the background
    pub code_running: bool,
    toast: Option<Toast>,
    /// Terminal size (width, height)
    pub size: (u16, u16),
    /// Whether the app should quit
    pub should_quit: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self::new(Document::empty(), Theme::default(), (80, 24))
    }
}

impl Model {
    /// Create a model positioned on the first slide.
    pub fn new(document: Document, theme: Theme, size: (u16, u16)) -> Self {
        let nav = NavState::new(document.slide_count(), document.chunk_count(0));
        Self {
            document,
            nav,
            theme,
            fallback_theme: theme,
            mode: InputMode::Normal,
            search_input: String::new(),
            last_search: None,
            code_output: None,
            code_running: false,
            toast: None,
            size,
            should_quit: false,
        }
    }

    /// Set the theme to use when a reloaded deck does not name one.
    #[must_use]
    pub const fn with_fallback_theme(mut self, theme: Theme) -> Self {
        self.fallback_theme = theme;
        self
    }

    /// The slide being shown, if the deck has any.
    pub fn current_slide(&self) -> Option<&Slide> {
        self.document.slide(self.nav.slide)
    }

    /// Markdown revealed so far on the current slide.
    pub fn visible_content(&self) -> String {
        self.current_slide()
            .map(|slide| slide.visible_content(self.nav.chunk_index()))
            .unwrap_or_default()
    }

    /// The last runnable code block among the revealed chunks.
    pub fn visible_code_block(&self) -> Option<CodeBlock> {
        code::last_block(&self.visible_content())
    }

    /// Jump to the first chunk of `slide`, ignoring out-of-range indices.
    pub(super) fn jump_to_slide(&mut self, slide: usize) {
        if slide >= self.document.slide_count() {
            return;
        }
        self.nav = self.nav.jump_to(slide).settle(self.document.chunk_count(slide));
    }

    /// Swap in a reloaded deck, landing on the first changed slide when it
    /// still exists.
    pub(super) fn replace_document(&mut self, document: Document, jump_to: Option<usize>) {
        self.document = document;
        self.theme = self
            .document
            .metadata()
            .theme
            .as_deref()
            .and_then(Theme::from_name)
            .unwrap_or(self.fallback_theme);
        self.nav.total_slides = self.document.slide_count();
        if let Some(slide) = jump_to.filter(|slide| *slide < self.nav.total_slides) {
            self.nav = self.nav.jump_to(slide);
        }
        self.nav.slide = self.nav.slide.min(self.nav.total_slides.saturating_sub(1));
        self.nav = self.nav.settle(self.document.chunk_count(self.nav.slide));
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}
