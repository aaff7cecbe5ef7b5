//! Core of the hex viewer: reading, formatting, wrapping and viewport state.
//!
//! Nothing in this crate talks to a terminal.

pub mod encoding;
pub mod error;
pub mod format;
pub mod layout;
pub mod source;
pub mod viewport;
pub mod wrap;

pub use encoding::TextEncoding;
pub use error::{Result, ViewerError};
pub use format::{ColorSelector, color_for, format_byte, human_size};
pub use source::ByteSource;
pub use viewport::{Overlay, ViewportState};
