//! Event handlers for the TUI
//!
//! Key dispatch, request mediators, response application and rendering,
//! each as an `impl App` block.

pub mod event_loop;
pub mod keyboard;
pub mod popup_keys;
pub mod rendering;
pub mod requests;
pub mod responses;
