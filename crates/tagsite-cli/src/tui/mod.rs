//! Terminal dashboard

pub mod app;
pub mod components;
pub mod handlers;
pub mod input;
pub mod polling;
pub mod popups;
pub mod state;
pub mod themes;
pub mod utils;

pub use app::run;
