//! Shared rendering helpers

pub mod text;

pub use text::{display_width, pad_to_width, tail_to_width, truncate_ellipsis, wrap_text};
