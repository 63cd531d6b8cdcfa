//! Tag statistics modal
//!
//! Bars are scaled against the largest count in the result.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tagsite_core::{Platform, TagStats};

use super::common::{
    center_content, center_rect, key_hints, popup_block, popup_title, render_popup_background,
    scroll_indicator, PopupSize,
};
use crate::tui::themes::Theme;
use crate::tui::utils::{display_width, pad_to_width};

const LABEL_WIDTH: usize = 18;
const COUNT_WIDTH: usize = 6;

#[derive(Debug, Default)]
pub enum StatsView {
    #[default]
    Loading,
    Loaded(TagStats),
    Failed,
}

#[derive(Debug, Default)]
pub struct TagStatsPopup {
    pub platform: Option<Platform>,
    pub view: StatsView,
    pub scroll_offset: usize,
    visible_height: usize,
}

impl TagStatsPopup {
    pub fn open(&mut self, platform: Platform) {
        self.platform = Some(platform);
        self.view = StatsView::Loading;
        self.scroll_offset = 0;
    }

    pub fn set_stats(&mut self, stats: TagStats) {
        self.view = StatsView::Loaded(stats);
        self.scroll_offset = 0;
    }

    pub fn set_failed(&mut self) {
        self.view = StatsView::Failed;
    }

    fn entry_count(&self) -> usize {
        match &self.view {
            StatsView::Loaded(stats) => stats.tag_stats.len(),
            _ => 0,
        }
    }

    pub fn scroll_down(&mut self) {
        let max = self.entry_count().saturating_sub(self.visible_height.max(1));
        if self.scroll_offset < max {
            self.scroll_offset += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn render(&mut self, f: &mut Frame, theme: &Theme) {
        let (w, h) = PopupSize::Large.dimensions();
        let area = center_rect(w, h, f.area());
        render_popup_background(f, area, theme);

        let block = popup_block(theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(2), // Summary
                Constraint::Min(3),    // Bars
                Constraint::Length(2), // Footer
            ])
            .split(inner);

        let title_text = match &self.platform {
            Some(p) => format!("Tag Statistics ({p})"),
            None => "Tag Statistics".to_string(),
        };
        let title = Paragraph::new(popup_title(&title_text, theme)).alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        let content_area = center_content(chunks[2], 2);
        // Reserve 2 rows for scroll indicators
        self.visible_height = (content_area.height as usize).saturating_sub(2);

        match &self.view {
            StatsView::Loading => {
                let loading = Paragraph::new(Line::from(Span::styled(
                    "Loading...",
                    Style::default().fg(theme.dim_color),
                )))
                .alignment(Alignment::Center);
                f.render_widget(loading, chunks[2]);
            }
            StatsView::Failed => {
                let failed = Paragraph::new(Line::from(Span::styled(
                    "Unable to load tag statistics",
                    Style::default().fg(theme.error_color),
                )))
                .alignment(Alignment::Center);
                f.render_widget(failed, chunks[2]);
            }
            StatsView::Loaded(stats) => {
                let summary = Line::from(vec![
                    Span::styled("Total games: ", Style::default().fg(theme.dim_color)),
                    Span::styled(
                        stats.total_games.to_string(),
                        Style::default()
                            .fg(theme.accent_color)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled("    Unique tags: ", Style::default().fg(theme.dim_color)),
                    Span::styled(
                        stats.unique_tags.to_string(),
                        Style::default()
                            .fg(theme.accent_color)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]);
                f.render_widget(
                    Paragraph::new(summary).alignment(Alignment::Center),
                    chunks[1],
                );

                let bar_width = (content_area.width as usize)
                    .saturating_sub(LABEL_WIDTH + COUNT_WIDTH + 2);
                let lines = stat_lines(
                    stats,
                    self.scroll_offset,
                    self.visible_height,
                    bar_width,
                    theme,
                );
                f.render_widget(Paragraph::new(lines), content_area);
            }
        }

        let footer = key_hints(&[("↑/↓", "scroll"), ("Esc", "close")], theme);
        f.render_widget(Paragraph::new(footer).alignment(Alignment::Center), chunks[3]);
    }
}

/// Cells of a bar at `percent` of `width`
pub fn bar_cells(percent: f64, width: usize) -> usize {
    ((percent / 100.0) * width as f64).round() as usize
}

fn stat_lines(
    stats: &TagStats,
    offset: usize,
    height: usize,
    bar_width: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    if stats.tag_stats.is_empty() {
        return vec![Line::from(Span::styled(
            "No tags",
            Style::default().fg(theme.dim_color),
        ))];
    }

    let percentages = stats.bar_percentages();
    let mut lines = Vec::new();
    if offset > 0 {
        lines.push(scroll_indicator("up", offset, theme));
    }

    let end = (offset + height).min(stats.tag_stats.len());
    for (entry, percent) in stats
        .tag_stats
        .iter()
        .zip(percentages)
        .skip(offset)
        .take(height)
    {
        let cells = bar_cells(percent, bar_width);
        let count = entry.count.to_string();
        let count_pad = COUNT_WIDTH.saturating_sub(display_width(&count));
        lines.push(Line::from(vec![
            Span::styled(
                pad_to_width(&entry.tag, LABEL_WIDTH),
                Style::default().fg(theme.text_color),
            ),
            Span::raw(" "),
            Span::styled("█".repeat(cells), Style::default().fg(theme.bar_color)),
            Span::raw(" ".repeat(bar_width - cells.min(bar_width) + 1)),
            Span::styled(
                format!("{}{}", " ".repeat(count_pad), count),
                Style::default().fg(theme.dim_color),
            ),
        ]));
    }

    let remaining = stats.tag_stats.len().saturating_sub(end);
    if remaining > 0 {
        lines.push(scroll_indicator("down", remaining, theme));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagsite_core::TagStatEntry;

    fn stats() -> TagStats {
        TagStats {
            total_games: 12,
            unique_tags: 2,
            tag_stats: vec![
                TagStatEntry {
                    tag: "a".to_string(),
                    count: 10,
                },
                TagStatEntry {
                    tag: "b".to_string(),
                    count: 5,
                },
            ],
        }
    }

    #[test]
    fn test_bars_scale_to_largest_count() {
        let pct = stats().bar_percentages();
        assert_eq!(bar_cells(pct[0], 40), 40);
        assert_eq!(bar_cells(pct[1], 40), 20);
    }

    #[test]
    fn test_stat_lines_render_each_entry() {
        let theme = Theme::default();
        let lines = stat_lines(&stats(), 0, 10, 20, &theme);
        assert_eq!(lines.len(), 2);
        let first: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(first.starts_with("a "));
        assert!(first.contains(&"█".repeat(20)));
        assert!(first.trim_end().ends_with("10"));
    }

    #[test]
    fn test_open_resets_to_loading() {
        let mut popup = TagStatsPopup::default();
        popup.set_stats(stats());
        popup.open(Platform::new("rj"));
        assert!(matches!(popup.view, StatsView::Loading));
        popup.set_failed();
        assert!(matches!(popup.view, StatsView::Failed));
    }
}
