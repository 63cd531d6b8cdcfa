//! Shared popup chrome

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear},
    Frame,
};

use crate::tui::themes::Theme;

#[derive(Debug, Clone, Copy)]
pub enum PopupSize {
    Small,
    Medium,
    Large,
}

impl PopupSize {
    pub fn dimensions(self) -> (u16, u16) {
        match self {
            PopupSize::Small => (50, 12),
            PopupSize::Medium => (70, 20),
            PopupSize::Large => (90, 30),
        }
    }
}

/// `width` x `height` rect centered in `area`, clamped to fit
pub fn center_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Horizontally inset `area` by `margin` on both sides
pub fn center_content(area: Rect, margin: u16) -> Rect {
    let margin = margin.min(area.width / 2);
    Rect {
        x: area.x + margin,
        width: area.width - margin * 2,
        ..area
    }
}

pub fn render_popup_background(f: &mut Frame, area: Rect, theme: &Theme) {
    f.render_widget(Clear, area);
    f.render_widget(
        Block::default().style(Style::default().bg(theme.bg_color)),
        area,
    );
}

pub fn popup_block(theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent_color))
        .style(Style::default().bg(theme.bg_color))
}

/// Title line plus an underline rule
pub fn popup_title(title: &str, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(theme.title_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "─".repeat(title.chars().count() + 4),
            Style::default().fg(theme.border_color),
        )),
    ]
}

/// `▲ 3 more` / `▼ 3 more`
pub fn scroll_indicator(direction: &str, count: usize, theme: &Theme) -> Line<'static> {
    let arrow = if direction == "up" { "▲" } else { "▼" };
    Line::from(Span::styled(
        format!("  {arrow} {count} more"),
        Style::default().fg(theme.dim_color),
    ))
}

/// Footer of `key: action` pairs
pub fn key_hints(hints: &[(&str, &str)], theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, action)) in hints.iter().enumerate() {
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(theme.accent_color)
                .add_modifier(Modifier::BOLD),
        ));
        let sep = if i + 1 < hints.len() { "  " } else { "" };
        spans.push(Span::styled(
            format!(": {action}{sep}"),
            Style::default().fg(theme.text_color),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = center_rect(70, 20, area);
        assert_eq!(rect, area);

        let rect = center_rect(20, 4, area);
        assert_eq!(rect, Rect::new(10, 3, 20, 4));
    }

    #[test]
    fn test_key_hints_text() {
        let line = key_hints(&[("Enter", "confirm"), ("Esc", "cancel")], &Theme::default());
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Enter: confirm  Esc: cancel");
    }
}
