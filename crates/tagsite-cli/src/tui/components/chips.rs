//! Tag chips
//!
//! Chips flow left to right and wrap at the available width. Removable
//! chips carry a `×` and the one under the chip cursor is highlighted.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use tagsite_core::view::tag_preview;

use crate::tui::themes::Theme;
use crate::tui::utils::display_width;

pub const NO_TAGS: &str = "No tags";

fn chip_label(tag: &str, removable: bool) -> String {
    if removable {
        format!(" {tag} × ")
    } else {
        format!(" {tag} ")
    }
}

fn chip_style(color: Color, selected: bool, theme: &Theme) -> Style {
    if selected {
        Style::default()
            .fg(theme.bg_color)
            .bg(color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color).bg(theme.selection_bg_color)
    }
}

fn no_tags(theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        NO_TAGS,
        Style::default()
            .fg(theme.dim_color)
            .add_modifier(Modifier::ITALIC),
    ))
}

/// Lay chips out across as many lines as `width` requires
pub fn chip_lines(
    tags: &[String],
    width: usize,
    color: Color,
    cursor: Option<usize>,
    removable: bool,
    theme: &Theme,
) -> Vec<Line<'static>> {
    if tags.is_empty() {
        return vec![no_tags(theme)];
    }

    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0usize;

    for (idx, tag) in tags.iter().enumerate() {
        let label = chip_label(tag, removable);
        let w = display_width(&label);
        if used > 0 && used + 1 + w > width {
            lines.push(Line::from(std::mem::take(&mut current)));
            used = 0;
        }
        if used > 0 {
            current.push(Span::raw(" "));
            used += 1;
        }
        current.push(Span::styled(
            label,
            chip_style(color, cursor == Some(idx), theme),
        ));
        used += w;
    }
    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

/// One-line preview: at most five chips plus a `+N` overflow marker
pub fn preview_line(tags: &[String], color: Color, theme: &Theme) -> Line<'static> {
    if tags.is_empty() {
        return no_tags(theme);
    }
    let preview = tag_preview(tags);
    let mut spans = Vec::new();
    for tag in preview.shown {
        if !spans.is_empty() {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(chip_label(tag, false), chip_style(color, false, theme)));
    }
    if preview.overflow > 0 {
        spans.push(Span::styled(
            format!(" +{}", preview.overflow),
            Style::default().fg(theme.dim_color),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_empty_tags_render_placeholder() {
        let theme = Theme::default();
        let lines = chip_lines(&[], 40, theme.chip_kr_color, None, true, &theme);
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), NO_TAGS);
    }

    #[test]
    fn test_chips_wrap_at_width() {
        let theme = Theme::default();
        let lines = chip_lines(
            &tags(&["alpha", "beta", "gamma"]),
            16,
            theme.chip_jp_color,
            None,
            false,
            &theme,
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), " alpha   beta ");
    }

    #[test]
    fn test_preview_shows_overflow_count() {
        let theme = Theme::default();
        let line = preview_line(
            &tags(&["a", "b", "c", "d", "e", "f", "g"]),
            theme.chip_kr_color,
            &theme,
        );
        assert!(line_text(&line).ends_with(" +2"));
    }
}
