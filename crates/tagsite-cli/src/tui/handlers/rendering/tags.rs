//! Tag table view

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tagsite_core::view::EmptyReason;

use super::{labeled_field, message_line, panel};
use crate::tui::app::App;
use crate::tui::components::button;
use crate::tui::input::TextField;
use crate::tui::state::{BusyControl, LoadStatus, RowEditFocus, TagsFocus};
use crate::tui::utils::{display_width, pad_to_width, truncate_ellipsis};

const PRIORITY_WIDTH: usize = 10;

/// Message for a table with no rows, if it should show one
fn empty_message(status: LoadStatus, reason: Option<EmptyReason>) -> Option<&'static str> {
    match status {
        LoadStatus::NotLoaded | LoadStatus::Loading => Some("Loading..."),
        LoadStatus::Unavailable => Some("Unable to load data"),
        LoadStatus::Ready => match reason? {
            EmptyReason::NoData => Some("No tags"),
            EmptyReason::NoResults => Some("No results"),
        },
    }
}

impl App {
    pub(super) fn render_tags(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search + actions
                Constraint::Length(3), // Add form
                Constraint::Min(4),    // Table
            ])
            .split(area);

        self.render_tag_toolbar(f, chunks[0]);
        self.render_add_form(f, chunks[1]);
        self.render_tag_table(f, chunks[2]);
    }

    fn render_tag_toolbar(&self, f: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let focused = self.tags.focus == TagsFocus::Search && self.tags.row_edit.is_none();
        let block = panel("Tags", focused, theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let buttons = vec![
            Span::raw("  "),
            button(
                "^R Reload",
                "Loading",
                self.busy.is_busy(BusyControl::ReloadTags),
                false,
                theme,
            ),
            Span::raw(" "),
            button(
                "^S Sync Tags",
                "Syncing",
                self.busy.is_busy(BusyControl::SyncTags),
                false,
                theme,
            ),
            Span::raw(" "),
            button(
                "^X Remove '/' Tags",
                "Removing",
                self.busy.is_busy(BusyControl::PurgeSlashTags),
                false,
                theme,
            ),
        ];
        let buttons_width: usize = buttons.iter().map(|s| display_width(&s.content)).sum();
        let search_width = (inner.width as usize).saturating_sub(buttons_width);

        let mut spans = labeled_field("Search", &self.tags.search, search_width, focused, theme);
        spans.extend(buttons);
        f.render_widget(Paragraph::new(Line::from(spans)), inner);
    }

    fn render_add_form(&self, f: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let focus = self.tags.focus;
        let editing = self.tags.row_edit.is_some();
        let in_form = !editing
            && matches!(
                focus,
                TagsFocus::NewJp | TagsFocus::NewKr | TagsFocus::NewPriority | TagsFocus::Add
            );
        let block = panel("Add Tag", in_form, theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(38),
                Constraint::Percentage(38),
                Constraint::Length(16),
                Constraint::Min(10),
            ])
            .split(inner);

        let field = |i: usize, label: &str, f_ref: &TextField, target: TagsFocus| {
            Paragraph::new(Line::from(labeled_field(
                label,
                f_ref,
                (cols[i].width as usize).saturating_sub(1),
                !editing && focus == target,
                theme,
            )))
        };
        f.render_widget(field(0, "JP", &self.tags.new_jp, TagsFocus::NewJp), cols[0]);
        f.render_widget(field(1, "KR", &self.tags.new_kr, TagsFocus::NewKr), cols[1]);
        f.render_widget(
            field(2, "Prio", &self.tags.new_priority, TagsFocus::NewPriority),
            cols[2],
        );

        let add = button(
            "Add",
            "Adding",
            self.busy.is_busy(BusyControl::AddTag),
            !editing && focus == TagsFocus::Add,
            theme,
        );
        f.render_widget(Paragraph::new(Line::from(add)), cols[3]);
    }

    fn render_tag_table(&mut self, f: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let table_focused = self.tags.focus == TagsFocus::Table || self.tags.row_edit.is_some();
        let title = format!("Tag Table ({})", self.tags.tags.len());
        let block = panel(&title, table_focused, theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let width = inner.width as usize;
        let name_width = width.saturating_sub(PRIORITY_WIDTH + 4) / 2;
        let height = (inner.height as usize).saturating_sub(1);
        self.list_height = height;

        let header_style = Style::default()
            .fg(theme.title_color)
            .add_modifier(Modifier::BOLD);
        let mut lines = vec![Line::from(vec![
            Span::styled(pad_to_width("  Japanese", name_width + 2), header_style),
            Span::styled(pad_to_width("Korean", name_width + 1), header_style),
            Span::styled("Priority", header_style),
        ])];

        if let Some(message) = empty_message(self.tags.status, self.tags.empty_reason()) {
            if self.tags.visible_len() == 0 {
                let color = if self.tags.status == LoadStatus::Unavailable {
                    theme.error_color
                } else {
                    theme.dim_color
                };
                lines.push(message_line(&format!("  {message}"), color));
                f.render_widget(Paragraph::new(lines), inner);
                return;
            }
        }

        let offset = self.tags.scroll_offset;
        for (i, tag) in self
            .tags
            .visible()
            .enumerate()
            .skip(offset)
            .take(height)
        {
            let selected = i == self.tags.selected;
            let marker = if selected && table_focused { "▸ " } else { "  " };
            let jp = truncate_ellipsis(&tag.tag_jp, name_width).into_owned();

            let edit = self
                .tags
                .row_edit
                .as_ref()
                .filter(|edit| selected && edit.tag_jp == tag.tag_jp);
            let line = match edit {
                Some(edit) => {
                    let mut spans = vec![
                        Span::styled(marker, Style::default().fg(theme.accent_color)),
                        Span::styled(
                            pad_to_width(&jp, name_width + 1),
                            Style::default().fg(theme.text_color),
                        ),
                    ];
                    spans.extend(edit.kr.spans(
                        name_width,
                        edit.focus == RowEditFocus::Kr,
                        theme,
                    ));
                    spans.push(Span::raw(" "));
                    spans.extend(edit.priority.spans(
                        PRIORITY_WIDTH,
                        edit.focus == RowEditFocus::Priority,
                        theme,
                    ));
                    spans.push(Span::raw(" "));
                    spans.push(button(
                        "Update",
                        "Updating",
                        self.busy.is_busy(BusyControl::UpdateTag),
                        false,
                        theme,
                    ));
                    Line::from(spans)
                }
                None => {
                    let style = if selected && table_focused {
                        Style::default()
                            .fg(theme.selection_fg_color)
                            .bg(theme.selection_bg_color)
                    } else {
                        Style::default().fg(theme.text_color)
                    };
                    let kr = truncate_ellipsis(&tag.tag_kr, name_width).into_owned();
                    let priority = tag.priority.map(|p| p.to_string()).unwrap_or_default();
                    Line::from(vec![
                        Span::styled(marker, Style::default().fg(theme.accent_color)),
                        Span::styled(pad_to_width(&jp, name_width + 1), style),
                        Span::styled(pad_to_width(&kr, name_width + 1), style),
                        Span::styled(pad_to_width(&priority, PRIORITY_WIDTH), style),
                    ])
                }
            };
            lines.push(line);
        }
        f.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_messages_distinguish_cases() {
        assert_eq!(
            empty_message(LoadStatus::Unavailable, None),
            Some("Unable to load data")
        );
        assert_eq!(
            empty_message(LoadStatus::Ready, Some(EmptyReason::NoData)),
            Some("No tags")
        );
        assert_eq!(
            empty_message(LoadStatus::Ready, Some(EmptyReason::NoResults)),
            Some("No results")
        );
        assert_eq!(empty_message(LoadStatus::Ready, None), None);
    }
}
