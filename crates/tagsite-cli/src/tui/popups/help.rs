//! Key reference overlay

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::common::{
    center_content, center_rect, key_hints, popup_block, popup_title, render_popup_background,
    scroll_indicator, PopupSize,
};
use crate::tui::themes::Theme;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Global",
        &[
            ("F2-F6 / Alt+1-5", "switch tab"),
            ("Tab / Shift+Tab", "move focus"),
            ("Enter", "activate focused control"),
            ("←/→", "change platform when focused"),
            ("F1", "this help"),
            ("Esc", "close popup / cancel edit"),
            ("Ctrl+C / Ctrl+Q", "quit"),
        ],
    ),
    (
        "Tags",
        &[
            ("Enter / e on row", "edit Korean tag and priority"),
            ("Ctrl+R", "reload table"),
            ("Ctrl+S", "sync tags to all games"),
            ("Ctrl+X", "remove tags containing '/'"),
        ],
    ),
    (
        "Game lists",
        &[
            ("Ctrl+R", "load games for the platform"),
            ("↑/↓", "select game"),
            ("d / Delete", "delete selected game"),
        ],
    ),
    (
        "Editors",
        &[
            ("Enter in code field", "look up record"),
            ("Enter in search field", "search by title or tag"),
            ("Enter on result", "open result in the form"),
            ("←/→ on chips", "move chip cursor"),
            ("Delete / x on chip", "remove chip"),
            ("Ctrl+S", "save record"),
        ],
    ),
];

#[derive(Debug, Default)]
pub struct HelpPopup {
    pub scroll_offset: usize,
}

impl HelpPopup {
    fn lines(theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (section, keys) in SECTIONS {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                section.to_string(),
                Style::default()
                    .fg(theme.title_color)
                    .add_modifier(Modifier::BOLD),
            )));
            for (key, action) in keys.iter() {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {key:<22}"),
                        Style::default().fg(theme.accent_color),
                    ),
                    Span::styled(action.to_string(), Style::default().fg(theme.text_color)),
                ]));
            }
        }
        lines
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset += 1;
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn render(&mut self, f: &mut Frame, theme: &Theme) {
        let (w, h) = PopupSize::Medium.dimensions();
        let area = center_rect(w, h, f.area());
        render_popup_background(f, area, theme);

        let block = popup_block(theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(2),
            ])
            .split(inner);

        let title = Paragraph::new(popup_title("Keyboard Shortcuts", theme)).alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        let all = Self::lines(theme);
        let visible_height = (chunks[1].height as usize).saturating_sub(2).max(1);
        let max_offset = all.len().saturating_sub(visible_height);
        self.scroll_offset = self.scroll_offset.min(max_offset);

        let mut lines = Vec::new();
        if self.scroll_offset > 0 {
            lines.push(scroll_indicator("up", self.scroll_offset, theme));
        }
        let end = (self.scroll_offset + visible_height).min(all.len());
        let remaining = all.len() - end;
        lines.extend(all.into_iter().skip(self.scroll_offset).take(visible_height));
        if remaining > 0 {
            lines.push(scroll_indicator("down", remaining, theme));
        }
        f.render_widget(Paragraph::new(lines), center_content(chunks[1], 4));

        let footer = key_hints(&[("↑/↓", "scroll"), ("Esc", "close")], theme);
        f.render_widget(Paragraph::new(footer).alignment(Alignment::Center), chunks[2]);
    }
}
