//! UI rendering coordinator
//!
//! Main entry point that dispatches to specialized render modules.

mod browser;
mod editor;
mod tags;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
    Frame,
};

use crate::tui::app::{App, Popup, Tab};
use crate::tui::components::render_toasts;
use crate::tui::input::TextField;
use crate::tui::state::PlatformSelect;
use crate::tui::themes::Theme;
use crate::tui::utils::{display_width, truncate_ellipsis};

impl App {
    /// Main UI rendering dispatcher
    pub fn ui(&mut self, f: &mut Frame) {
        // Render background
        let bg = Block::default().style(Style::default().bg(self.theme.bg_color));
        f.render_widget(bg, f.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_tab_bar(f, chunks[0]);

        // Direct match avoids borrow conflicts
        match self.tab {
            Tab::Tags => self.render_tags(f, chunks[1]),
            Tab::Browse(catalogue) => self.render_browser(f, chunks[1], catalogue),
            Tab::Edit(catalogue) => self.render_editor(f, chunks[1], catalogue),
        }

        self.render_status_bar(f, chunks[2]);

        // Render popup on top
        match self.popup {
            Popup::None => {}
            Popup::Help => self.popups.help.render(f, &self.theme),
            Popup::TagStats => self.popups.stats.render(f, &self.theme),
            Popup::Confirm => {
                if let Some(action) = self.pending.as_ref() {
                    self.popups.confirm.render(f, &self.theme, action);
                }
            }
        }

        // Render toasts on top of everything
        let area = f.area();
        render_toasts(f.buffer_mut(), area, &self.toasts, &self.theme);
    }

    fn render_tab_bar(&self, f: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| Line::from(format!(" F{} {} ", i + 2, tab.title())))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.tab.index())
            .style(
                Style::default()
                    .fg(self.theme.dim_color)
                    .bg(self.theme.status_bar_bg_color),
            )
            .highlight_style(
                Style::default()
                    .fg(self.theme.bg_color)
                    .bg(self.theme.accent_color)
                    .add_modifier(Modifier::BOLD),
            )
            .divider(Span::styled("│", Style::default().fg(self.theme.border_color)))
            .padding("", "");
        f.render_widget(tabs, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let hints = match self.tab {
            Tab::Tags => "Tab focus  ^R reload  ^S sync  ^X purge '/'  F1 help",
            Tab::Browse(_) => "Tab focus  ←/→ platform  ^R load  d delete  F1 help",
            Tab::Edit(_) => "Tab focus  Enter find/search  ^S save  F1 help",
        };
        let busy = if self.busy.is_empty() { "" } else { " ● working " };
        let left = format!(" {}", self.config.api_url);

        let width = area.width as usize;
        let right_width = display_width(hints) + 1;
        let left = truncate_ellipsis(
            &left,
            width.saturating_sub(right_width + display_width(busy)),
        )
        .into_owned();
        let fill = width.saturating_sub(display_width(&left) + display_width(busy) + right_width);

        let bar = Line::from(vec![
            Span::styled(left, Style::default().fg(self.theme.dim_color)),
            Span::styled(
                busy,
                Style::default()
                    .fg(self.theme.warning_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ".repeat(fill)),
            Span::styled(
                format!("{hints} "),
                Style::default().fg(self.theme.dim_color),
            ),
        ]);
        f.render_widget(
            Paragraph::new(bar).style(Style::default().bg(self.theme.status_bar_bg_color)),
            area,
        );
    }
}

/// Bordered panel, highlighted while one of its controls has focus
pub(super) fn panel(title: &str, focused: bool, theme: &Theme) -> Block<'static> {
    let border = if focused {
        theme.accent_color
    } else {
        theme.border_color
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme.title_color)
                .add_modifier(Modifier::BOLD),
        ))
}

/// `Label: [text field]`
pub(super) fn labeled_field(
    label: &str,
    field: &TextField,
    width: usize,
    focused: bool,
    theme: &Theme,
) -> Vec<Span<'static>> {
    let label_style = if focused {
        Style::default()
            .fg(theme.accent_color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim_color)
    };
    let mut spans = vec![Span::styled(format!("{label} "), label_style)];
    let field_width = width.saturating_sub(display_width(label) + 1);
    spans.extend(field.spans(field_width, focused, theme));
    spans
}

/// `Platform ◀ rj │ steam ▶` with the current option highlighted
pub(super) fn platform_spans(
    select: &PlatformSelect,
    focused: bool,
    theme: &Theme,
) -> Vec<Span<'static>> {
    let dim = Style::default().fg(theme.dim_color);
    let current_style = if focused {
        Style::default()
            .fg(theme.bg_color)
            .bg(theme.accent_color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme.text_color)
            .add_modifier(Modifier::BOLD)
    };
    let mut spans = vec![Span::styled("Platform ", dim), Span::styled("◀ ", dim)];
    for (i, option) in select.options().iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", dim));
        }
        let style = if option == select.current() {
            current_style
        } else {
            dim
        };
        spans.push(Span::styled(option.to_string(), style));
    }
    spans.push(Span::styled(" ▶", dim));
    spans
}

/// Single dimmed or colored message, used for empty and error states
pub(super) fn message_line(text: &str, color: ratatui::style::Color) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(color).add_modifier(Modifier::ITALIC),
    ))
}
