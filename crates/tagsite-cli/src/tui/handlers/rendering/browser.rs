//! Catalogue browser view: list on the left, detail on the right

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use tagsite_core::{Capability, Catalogue, GameRecord};

use super::{labeled_field, message_line, panel, platform_spans};
use crate::tui::app::App;
use crate::tui::components::{button, chip_lines, danger_button};
use crate::tui::state::{BrowserFocus, BrowserState, BusyControl, LoadStatus};
use crate::tui::themes::Theme;
use crate::tui::utils::{display_width, pad_to_width, truncate_ellipsis};

fn list_placeholder(browser: &BrowserState) -> Option<&'static str> {
    match browser.status {
        LoadStatus::NotLoaded => Some("Choose a platform and press Load"),
        LoadStatus::Loading => Some("Loading..."),
        LoadStatus::Unavailable => Some("Unable to load games"),
        LoadStatus::Ready if browser.games.is_empty() => Some("No games"),
        LoadStatus::Ready if browser.visible.is_empty() => Some("No results"),
        LoadStatus::Ready => None,
    }
}

fn info_line(label: &str, value: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            pad_to_width(label, 14),
            Style::default().fg(theme.dim_color),
        ),
        Span::styled(value.to_string(), Style::default().fg(theme.text_color)),
    ])
}

/// Detail panel contents for one record
fn detail_lines(
    record: &GameRecord,
    catalogue: Catalogue,
    width: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        record.display_title().to_string(),
        Style::default()
            .fg(theme.title_color)
            .add_modifier(Modifier::BOLD),
    ))];
    let title_jp = record.title_jp_str();
    if !title_jp.is_empty() {
        lines.push(Line::from(Span::styled(
            title_jp.to_string(),
            Style::default().fg(theme.dim_color),
        )));
    }
    lines.push(Line::from(""));

    lines.push(info_line("Maker", record.maker_str(), theme));
    lines.push(info_line("Code", record.code_str(), theme));
    lines.push(info_line("Release date", &record.release_date, theme));
    lines.push(info_line("Primary tag", &record.primary_tag, theme));
    if let Some(thumbnail) = record.thumbnail() {
        lines.push(info_line("Thumbnail", thumbnail, theme));
    }
    if let Some(link) = record.link_url() {
        lines.push(Line::from(vec![
            Span::styled(pad_to_width("Link", 14), Style::default().fg(theme.dim_color)),
            Span::styled(
                link.to_string(),
                Style::default()
                    .fg(theme.link_color)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]));
    }
    if catalogue.supports(Capability::Timestamps) {
        if let Some(updated) = record.timestamp_label() {
            lines.push(info_line("Last updated", &updated, theme));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Japanese tags",
        Style::default().fg(theme.chip_jp_color),
    )));
    lines.extend(chip_lines(
        &record.tags_jp,
        width,
        theme.chip_jp_color,
        None,
        false,
        theme,
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Korean tags",
        Style::default().fg(theme.chip_kr_color),
    )));
    lines.extend(chip_lines(
        &record.tags,
        width,
        theme.chip_kr_color,
        None,
        false,
        theme,
    ));
    lines
}

impl App {
    pub(super) fn render_browser(&mut self, f: &mut Frame, area: Rect, catalogue: Catalogue) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5)])
            .split(area);

        self.render_browser_controls(f, chunks[0], catalogue);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
            .split(chunks[1]);

        self.render_game_list(f, body[0], catalogue);
        self.render_game_detail(f, body[1], catalogue);
    }

    fn render_browser_controls(&self, f: &mut Frame, area: Rect, catalogue: Catalogue) {
        let theme = &self.theme;
        let browser = self.browser(catalogue);
        let focus = browser.focus;
        let in_controls = matches!(
            focus,
            BrowserFocus::Platform | BrowserFocus::Load | BrowserFocus::DeleteAll | BrowserFocus::Stats
        );
        let block = panel(&format!("{} Catalogue", catalogue.label()), in_controls, theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let mut spans = platform_spans(&browser.platform, focus == BrowserFocus::Platform, theme);
        spans.push(Span::raw("   "));
        spans.push(button(
            "Load",
            "Loading",
            self.busy.is_busy(BusyControl::LoadGames(catalogue)),
            focus == BrowserFocus::Load,
            theme,
        ));
        spans.push(Span::raw(" "));
        spans.push(danger_button(
            "Delete All",
            "Deleting",
            self.busy.is_busy(BusyControl::DeleteAll(catalogue)),
            focus == BrowserFocus::DeleteAll,
            theme,
        ));
        if catalogue.supports(Capability::TagStats) {
            spans.push(Span::raw(" "));
            spans.push(button(
                "Tag Stats",
                "Loading",
                self.busy.is_busy(BusyControl::TagStats(catalogue)),
                focus == BrowserFocus::Stats,
                theme,
            ));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), inner);
    }

    fn render_game_list(&mut self, f: &mut Frame, area: Rect, catalogue: Catalogue) {
        let theme = &self.theme;
        let browser = &self.browsers[catalogue.index()];
        let focused = matches!(browser.focus, BrowserFocus::Filter | BrowserFocus::List);
        let title = format!("Games ({}/{})", browser.visible.len(), browser.games.len());
        let block = panel(&title, focused, theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let width = inner.width as usize;
        let mut lines = vec![
            Line::from(labeled_field(
                "Filter",
                &browser.filter,
                width,
                browser.focus == BrowserFocus::Filter,
                theme,
            )),
            Line::from(Span::styled(
                "─".repeat(width),
                Style::default().fg(theme.border_color),
            )),
        ];
        let height = (inner.height as usize).saturating_sub(2);

        if let Some(message) = list_placeholder(browser) {
            let color = if browser.status == LoadStatus::Unavailable {
                theme.error_color
            } else {
                theme.dim_color
            };
            lines.push(message_line(message, color));
        } else {
            let list_focused = browser.focus == BrowserFocus::List;
            for (i, game) in browser
                .visible_games()
                .enumerate()
                .skip(browser.scroll_offset)
                .take(height)
            {
                let selected = browser.selected == Some(i);
                let code = game.code_str();
                let title_width = width.saturating_sub(display_width(code) + 3);
                let title = truncate_ellipsis(game.display_title(), title_width);
                let style = if selected {
                    let s = Style::default()
                        .fg(theme.selection_fg_color)
                        .bg(theme.selection_bg_color);
                    if list_focused {
                        s.add_modifier(Modifier::BOLD)
                    } else {
                        s
                    }
                } else {
                    Style::default().fg(theme.text_color)
                };
                let marker = if selected { "▸ " } else { "  " };
                lines.push(Line::from(vec![
                    Span::styled(marker, Style::default().fg(theme.accent_color)),
                    Span::styled(pad_to_width(&title, title_width), style),
                    Span::raw(" "),
                    Span::styled(code.to_string(), Style::default().fg(theme.dim_color)),
                ]));
            }
        }
        f.render_widget(Paragraph::new(lines), inner);
        self.list_height = height;
    }

    fn render_game_detail(&self, f: &mut Frame, area: Rect, catalogue: Catalogue) {
        let theme = &self.theme;
        let browser = self.browser(catalogue);
        let block = panel("Details", false, theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let Some(record) = browser.detail.as_ref() else {
            f.render_widget(
                Paragraph::new(message_line("Select a game from the list", theme.dim_color)),
                inner,
            );
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(inner);

        let lines = detail_lines(record, catalogue, chunks[0].width as usize, theme);
        f.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }),
            chunks[0],
        );

        let delete = Line::from(vec![
            danger_button(
                "Delete",
                "Deleting",
                self.busy.is_busy(BusyControl::DeleteGame(catalogue)),
                false,
                theme,
            ),
            Span::styled("  d on the list", Style::default().fg(theme.dim_color)),
        ]);
        f.render_widget(Paragraph::new(delete), chunks[1]);
    }
}
