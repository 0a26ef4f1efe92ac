//! Terminal UI components.
//!
//! - [`render()`]: Draw the whole frame from the model
//! - `status`: Footer, search bar and toast rows

mod render;
mod status;

pub use render::{content_width, render};

/// Blank columns on each side of the slide.
pub const CONTENT_PADDING: u16 = 2;
/// Divider plus footer text.
pub const FOOTER_HEIGHT: u16 = 2;
