//! Slide and chunk navigation.
//!
//! [`advance`] is a pure state machine over [`NavState`]. It only knows the
//! chunk count of the *current* slide, so whenever the slide changes the
//! caller must [`NavState::settle`] the result against the document.
//!
//! # Example
//!
//! ```
//! use deck::nav::{advance, ChunkIndex, Key, NavState};
//!
//! let state = NavState::new(5, 2);
//! let state = advance(state, Key::Forward);
//! assert_eq!(state.chunk, ChunkIndex::Absolute(1));
//!
//! let state = advance(advance(state, Key::Digit(3)), Key::Last);
//! assert_eq!(state.slide, 2);
//! ```

/// Position of the revealed chunk within the current slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkIndex {
    /// A concrete chunk index.
    Absolute(usize),
    /// Counted back from the last chunk of the slide. `FromLast(0)` is the
    /// last chunk. Produced when stepping backward into a slide whose chunk
    /// count is not yet known.
    FromLast(usize),
}

impl ChunkIndex {
    /// Resolve against the real chunk count, clamping into range.
    pub const fn resolve(self, chunks_in_slide: usize) -> usize {
        let last = chunks_in_slide.saturating_sub(1);
        match self {
            Self::Absolute(index) => {
                if index < last {
                    index
                } else {
                    last
                }
            }
            Self::FromLast(back) => last.saturating_sub(back),
        }
    }
}

impl Default for ChunkIndex {
    fn default() -> Self {
        Self::Absolute(0)
    }
}

/// A navigation key, already decoded from whatever input layer produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// `0`-`9`, building a repeat count.
    Digit(u8),
    /// `g`; twice in a row jumps to the first slide.
    First,
    /// `G`; jumps to the counted slide, or the last one.
    Last,
    Forward,
    Backward,
    Other,
}

impl Key {
    /// Decode a key symbol name such as `"space"`, `"pgup"` or `"G"`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "g" => Self::First,
            "G" => Self::Last,
            "space" | "down" | "j" | "right" | "l" | "enter" | "n" | "pgdown" => Self::Forward,
            "up" | "k" | "left" | "h" | "p" | "pgup" => Self::Backward,
            _ => Self::from_digit(name).unwrap_or(Self::Other),
        }
    }

    fn from_digit(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let digit = chars.next()?.to_digit(10)?;
        if chars.next().is_some() {
            return None;
        }
        u8::try_from(digit).ok().map(Self::Digit)
    }
}

/// Where the viewer is in the deck, plus any pending key prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavState {
    pub slide: usize,
    pub chunk: ChunkIndex,
    pub total_slides: usize,
    /// Chunk count of the current slide only
    pub chunks_in_slide: usize,
    /// Repeat count typed so far
    pub count: Option<usize>,
    /// A single `g` was pressed and the next `g` completes `gg`
    pub pending_g: bool,
}

impl NavState {
    /// Start at the first chunk of the first slide.
    pub const fn new(total_slides: usize, chunks_in_slide: usize) -> Self {
        Self {
            slide: 0,
            chunk: ChunkIndex::Absolute(0),
            total_slides,
            chunks_in_slide,
            count: None,
            pending_g: false,
        }
    }

    /// Refresh the chunk count for the current slide and resolve the chunk
    /// position into range.
    #[must_use]
    pub const fn settle(mut self, chunks_in_slide: usize) -> Self {
        self.chunks_in_slide = chunks_in_slide;
        self.chunk = ChunkIndex::Absolute(self.chunk.resolve(chunks_in_slide));
        self
    }

    /// Jump to the first chunk of `slide`, clamped to the deck.
    #[must_use]
    pub const fn jump_to(mut self, slide: usize) -> Self {
        let last = self.total_slides.saturating_sub(1);
        self.slide = if slide < last { slide } else { last };
        self.chunk = ChunkIndex::Absolute(0);
        self.count = None;
        self.pending_g = false;
        self
    }

    /// The concrete chunk index for the current slide.
    pub const fn chunk_index(&self) -> usize {
        self.chunk.resolve(self.chunks_in_slide)
    }

    /// True when a repeat count or `g` prefix is pending.
    pub const fn has_prefix(&self) -> bool {
        self.count.is_some() || self.pending_g
    }

    const fn repeat(&self) -> usize {
        match self.count {
            Some(n) if n > 0 => n,
            _ => 1,
        }
    }

    const fn cleared(mut self) -> Self {
        self.count = None;
        self.pending_g = false;
        self
    }
}

/// Apply one key to the navigation state.
///
/// Pure and total. Every key except a digit or the first `g` clears the
/// pending prefix.
#[must_use]
pub fn advance(state: NavState, key: Key) -> NavState {
    match key {
        Key::Digit(digit) => NavState {
            count: Some(
                state
                    .count
                    .unwrap_or(0)
                    .saturating_mul(10)
                    .saturating_add(usize::from(digit)),
            ),
            pending_g: false,
            ..state
        },
        Key::First if state.pending_g => state.jump_to(0),
        Key::First => NavState {
            count: None,
            pending_g: true,
            ..state
        },
        Key::Last => match state.count {
            Some(n) => state.jump_to(n.saturating_sub(1)),
            None => state.jump_to(usize::MAX),
        },
        Key::Forward => forward(state),
        Key::Backward => backward(state),
        Key::Other => state.cleared(),
    }
}

fn forward(state: NavState) -> NavState {
    let mut slide = state.slide;
    let mut chunk = state.chunk_index();
    let mut chunks_in_slide = state.chunks_in_slide;

    for _ in 0..state.repeat() {
        if chunk + 1 < chunks_in_slide {
            chunk += 1;
        } else if slide + 1 < state.total_slides {
            slide += 1;
            chunk = 0;
            // Placeholder until the caller settles against the document.
            chunks_in_slide = 1;
        } else {
            break;
        }
    }

    NavState {
        slide,
        chunk: ChunkIndex::Absolute(chunk),
        chunks_in_slide,
        ..state.cleared()
    }
}

fn backward(state: NavState) -> NavState {
    let mut slide = state.slide;
    let mut chunk = state.chunk;

    for _ in 0..state.repeat() {
        chunk = match chunk {
            ChunkIndex::Absolute(index) if index > 0 => ChunkIndex::Absolute(index - 1),
            ChunkIndex::Absolute(_) if slide > 0 => {
                slide -= 1;
                ChunkIndex::FromLast(0)
            }
            ChunkIndex::Absolute(_) => break,
            ChunkIndex::FromLast(back) => ChunkIndex::FromLast(back.saturating_add(1)),
        };
    }

    NavState {
        slide,
        chunk,
        ..state.cleared()
    }
}
