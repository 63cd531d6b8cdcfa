//! Confirmation dialog for destructive actions

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::common::{
    center_content, center_rect, key_hints, popup_block, popup_title, render_popup_background,
    PopupSize,
};
use crate::tui::components::{button, danger_button};
use crate::tui::state::PendingAction;
use crate::tui::themes::Theme;
use crate::tui::utils::wrap_text;

/// Which button has focus; Cancel on open
#[derive(Debug, Default)]
pub struct ConfirmPopup {
    pub confirm_focused: bool,
}

impl ConfirmPopup {
    pub fn reset(&mut self) {
        self.confirm_focused = false;
    }

    pub fn toggle(&mut self) {
        self.confirm_focused = !self.confirm_focused;
    }

    pub fn render(&self, f: &mut Frame, theme: &Theme, action: &PendingAction) {
        let (w, h) = PopupSize::Small.dimensions();
        let area = center_rect(w, h, f.area());
        render_popup_background(f, area, theme);

        let block = popup_block(theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(3),    // Message
                Constraint::Length(1), // Buttons
                Constraint::Length(2), // Footer
            ])
            .split(inner);

        let title = Paragraph::new(popup_title(action.title(), theme)).alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        let body = center_content(chunks[1], 2);
        let lines: Vec<Line> = wrap_text(&action.message(), body.width as usize)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(theme.text_color))))
            .collect();
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);

        let buttons = Line::from(vec![
            button("Cancel", "", false, !self.confirm_focused, theme),
            Span::raw("    "),
            danger_button("Confirm", "", false, self.confirm_focused, theme),
        ]);
        f.render_widget(Paragraph::new(buttons).alignment(Alignment::Center), chunks[2]);

        let footer = key_hints(&[("←/→", "choose"), ("Enter", "select"), ("y/n", "answer")], theme);
        f.render_widget(Paragraph::new(footer).alignment(Alignment::Center), chunks[3]);
    }
}
