//! Reusable UI components

pub mod button;
pub mod chips;
pub mod toast;

pub use button::{button, danger_button};
pub use chips::{chip_lines, preview_line};
pub use toast::{render_toasts, Toast, ToastKind, ToastQueue};
