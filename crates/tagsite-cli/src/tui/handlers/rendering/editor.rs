//! Game record editor view

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tagsite_core::{Capability, Catalogue, GameRecord, TagLanguage};

use super::{labeled_field, message_line, panel, platform_spans};
use crate::tui::app::App;
use crate::tui::components::{button, chip_lines, preview_line};
use crate::tui::input::TextField;
use crate::tui::state::{BusyControl, EditorFocus, EditorState, SearchStatus};
use crate::tui::themes::Theme;
use crate::tui::utils::{display_width, pad_to_width, truncate_ellipsis};

const LABEL_WIDTH: usize = 14;

/// Two lines per search result: title, then `code | maker` and tag preview
fn result_lines(
    result: &GameRecord,
    selected: bool,
    focused: bool,
    width: usize,
    theme: &Theme,
) -> [Line<'static>; 2] {
    let title_style = if selected && focused {
        Style::default()
            .fg(theme.selection_fg_color)
            .bg(theme.selection_bg_color)
            .add_modifier(Modifier::BOLD)
    } else if selected {
        Style::default()
            .fg(theme.selection_fg_color)
            .bg(theme.selection_bg_color)
    } else {
        Style::default().fg(theme.text_color)
    };
    let marker = if selected { "▸ " } else { "  " };
    let title = truncate_ellipsis(result.display_title(), width.saturating_sub(2)).into_owned();

    let meta = format!("{} | {}", result.code_str(), result.maker_str());
    let mut second = vec![
        Span::raw("  "),
        Span::styled(meta, Style::default().fg(theme.dim_color)),
        Span::raw("  "),
    ];
    second.extend(preview_line(&result.tags, theme.chip_kr_color, theme).spans);

    [
        Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.accent_color)),
            Span::styled(title, title_style),
        ]),
        Line::from(second),
    ]
}

impl App {
    pub(super) fn render_editor(&mut self, f: &mut Frame, area: Rect, catalogue: Catalogue) {
        let searchable = catalogue.supports(Capability::Search);
        let constraints = if searchable {
            vec![
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(5),
            ]
        } else {
            vec![Constraint::Length(3), Constraint::Min(5)]
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        self.render_lookup(f, chunks[0], catalogue);
        let body = if searchable {
            self.render_search_bar(f, chunks[1], catalogue);
            chunks[2]
        } else {
            chunks[1]
        };

        let editor = self.editor(catalogue);
        if editor.form_visible && editor.record.is_some() {
            self.render_record_form(f, body, catalogue);
        } else if matches!(editor.search, SearchStatus::Results(_)) {
            self.render_results(f, body, catalogue);
        } else {
            let block = panel("Record", false, &self.theme);
            let inner = block.inner(body);
            f.render_widget(block, body);
            f.render_widget(
                Paragraph::new(message_line(
                    "Enter a game code and press Find to edit its record",
                    self.theme.dim_color,
                )),
                inner,
            );
        }
    }

    fn render_lookup(&self, f: &mut Frame, area: Rect, catalogue: Catalogue) {
        let theme = &self.theme;
        let editor = self.editor(catalogue);
        let focus = editor.focus;
        let in_lookup = matches!(
            focus,
            EditorFocus::Platform | EditorFocus::Code | EditorFocus::Find
        );
        let block = panel(&format!("{} Editor", catalogue.label()), in_lookup, theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let mut spans = platform_spans(&editor.platform, focus == EditorFocus::Platform, theme);
        spans.push(Span::raw("   "));
        let find = button(
            "Find",
            "Searching",
            self.busy.is_busy(BusyControl::FindCode(catalogue)),
            focus == EditorFocus::Find,
            theme,
        );
        let used: usize = spans.iter().map(|s| display_width(&s.content)).sum::<usize>()
            + display_width(&find.content)
            + 1;
        let field_width = (inner.width as usize).saturating_sub(used);
        spans.extend(labeled_field(
            "Code",
            &editor.code,
            field_width,
            focus == EditorFocus::Code,
            theme,
        ));
        spans.push(Span::raw(" "));
        spans.push(find);
        f.render_widget(Paragraph::new(Line::from(spans)), inner);
    }

    fn render_search_bar(&self, f: &mut Frame, area: Rect, catalogue: Catalogue) {
        let theme = &self.theme;
        let editor = self.editor(catalogue);
        let focus = editor.focus;
        let in_search = matches!(focus, EditorFocus::TitleQuery | EditorFocus::TagQuery);
        let block = panel("Search", in_search, theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inner);

        let searching_title = self.busy.is_busy(BusyControl::SearchTitle(catalogue));
        let searching_tag = self.busy.is_busy(BusyControl::SearchTag(catalogue));
        let column = |field: &TextField, label: &str, focused: bool, busy: bool, width: u16| {
            let status = button("Search", "Searching", busy, false, theme);
            let field_width = (width as usize).saturating_sub(display_width(&status.content) + 2);
            let mut spans = labeled_field(label, field, field_width, focused, theme);
            spans.push(Span::raw(" "));
            spans.push(status);
            Paragraph::new(Line::from(spans))
        };
        f.render_widget(
            column(
                &editor.title_query,
                "Title",
                focus == EditorFocus::TitleQuery,
                searching_title,
                cols[0].width,
            ),
            cols[0],
        );
        f.render_widget(
            column(
                &editor.tag_query,
                "Tag",
                focus == EditorFocus::TagQuery,
                searching_tag,
                cols[1].width,
            ),
            cols[1],
        );
    }

    fn render_results(&mut self, f: &mut Frame, area: Rect, catalogue: Catalogue) {
        let theme = &self.theme;
        let editor = &self.editors[catalogue.index()];
        let focused = editor.focus == EditorFocus::Results;
        let results = editor.results();
        let block = panel(&format!("Results ({})", results.len()), focused, theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let height = (inner.height as usize) / 2;
        let width = inner.width as usize;
        let mut lines = Vec::new();
        if results.is_empty() {
            lines.push(message_line("No results", theme.dim_color));
        }
        for (i, result) in results
            .iter()
            .enumerate()
            .skip(editor.results_offset)
            .take(height)
        {
            lines.extend(result_lines(
                result,
                i == editor.results_selected,
                focused,
                width,
                theme,
            ));
        }
        f.render_widget(Paragraph::new(lines), inner);
        self.list_height = height;
    }

    fn render_record_form(&self, f: &mut Frame, area: Rect, catalogue: Catalogue) {
        let theme = &self.theme;
        let editor = self.editor(catalogue);
        let Some(record) = editor.record.as_ref() else {
            return;
        };
        let title = match &editor.current {
            Some((platform, code)) => format!("Record {platform}/{code}"),
            None => "Record".to_string(),
        };
        let in_form = !matches!(
            editor.focus,
            EditorFocus::Platform
                | EditorFocus::Code
                | EditorFocus::Find
                | EditorFocus::TitleQuery
                | EditorFocus::TagQuery
                | EditorFocus::Results
        );
        let block = panel(&title, in_form, theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let width = inner.width as usize;
        let mut lines: Vec<Line> = [
            ("Title", &editor.title, EditorFocus::Title),
            ("Circle", &editor.circle, EditorFocus::Circle),
            ("Release date", &editor.release_date, EditorFocus::ReleaseDate),
            ("Price", &editor.price, EditorFocus::Price),
            ("Description", &editor.description, EditorFocus::Description),
        ]
        .into_iter()
        .map(|(label, field, target)| {
            let label = pad_to_width(label, LABEL_WIDTH);
            Line::from(labeled_field(
                &label,
                field,
                width,
                editor.focus == target,
                theme,
            ))
        })
        .collect();
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<w$}", "Primary tag", w = LABEL_WIDTH + 1),
                Style::default().fg(theme.dim_color),
            ),
            Span::styled(
                record.primary_tag.clone(),
                Style::default().fg(theme.text_color),
            ),
        ]));
        lines.push(Line::from(""));

        lines.extend(chip_section(editor, record, TagLanguage::Japanese, width, theme));
        lines.push(Line::from(""));
        lines.extend(chip_section(editor, record, TagLanguage::Korean, width, theme));
        lines.push(Line::from(""));

        lines.push(Line::from(button(
            "Save",
            "Saving",
            self.busy.is_busy(BusyControl::SaveGame(catalogue)),
            editor.focus == EditorFocus::Save,
            theme,
        )));
        f.render_widget(Paragraph::new(lines), inner);
    }
}

/// Heading plus removable chips for one language
fn chip_section(
    editor: &EditorState,
    record: &GameRecord,
    language: TagLanguage,
    width: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let (heading, color, target) = match language {
        TagLanguage::Japanese => ("Japanese tags", theme.chip_jp_color, EditorFocus::TagsJp),
        TagLanguage::Korean => ("Korean tags", theme.chip_kr_color, EditorFocus::TagsKr),
    };
    let focused = editor.focus == target;
    let heading_style = if focused {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    };
    let mut lines = vec![Line::from(Span::styled(heading, heading_style))];
    let cursor = focused.then(|| editor.chip_cursor(language));
    lines.extend(chip_lines(
        record.tags_for(language),
        width,
        color,
        cursor,
        true,
        theme,
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_preview_caps_chips() {
        let result = GameRecord {
            code: Some(Some("RJ7".to_string())),
            maker: Some(Some("サークル".to_string())),
            title_jp: Some(Some("作品".to_string())),
            tags: (1..=7).map(|i| format!("태그{i}")).collect(),
            ..GameRecord::default()
        };
        let theme = Theme::default();
        let [title, meta] = result_lines(&result, false, false, 60, &theme);
        let title: String = title.spans.iter().map(|s| s.content.as_ref()).collect();
        let meta: String = meta.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(title.contains("作品"));
        assert!(meta.contains("RJ7 | サークル"));
        assert!(meta.contains("태그5"));
        assert!(!meta.contains("태그6"));
        assert!(meta.ends_with("+2"));
    }
}
