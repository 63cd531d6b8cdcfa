//! Input handling
//!
//! Every editable control in the dashboard is a single-line [`TextField`].

pub mod text_field;

pub use text_field::{InputAction, TextField};
