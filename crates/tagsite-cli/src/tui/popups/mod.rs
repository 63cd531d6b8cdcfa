//! Popup overlays

pub mod common;
pub mod confirm;
pub mod help;
pub mod tag_stats;

pub use confirm::ConfirmPopup;
pub use help::HelpPopup;
pub use tag_stats::{StatsView, TagStatsPopup};
