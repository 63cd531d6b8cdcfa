//! Push buttons with a busy state

use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::tui::themes::Theme;

/// `[ label ]`, or the busy label while the control's request is in flight.
/// Busy buttons render dimmed and ignore activation.
pub fn button(label: &str, busy_label: &str, busy: bool, focused: bool, theme: &Theme) -> Span<'static> {
    if busy {
        return Span::styled(
            format!("[ … {busy_label} ]"),
            Style::default()
                .fg(theme.dim_color)
                .add_modifier(Modifier::ITALIC),
        );
    }
    let style = if focused {
        Style::default()
            .fg(theme.bg_color)
            .bg(theme.accent_color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.accent_color)
    };
    Span::styled(format!("[ {label} ]"), style)
}

/// Button whose action is destructive
pub fn danger_button(label: &str, busy_label: &str, busy: bool, focused: bool, theme: &Theme) -> Span<'static> {
    let mut span = button(label, busy_label, busy, focused, theme);
    if !busy {
        span.style = if focused {
            Style::default()
                .fg(theme.bg_color)
                .bg(theme.error_color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.error_color)
        };
    }
    span
}
