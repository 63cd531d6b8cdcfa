//! Keyboard event handling
//!
//! Global keys first, then the open popup, then the active view. Each view
//! routes by its focused control.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tagsite_core::Catalogue;

use crate::tui::app::{App, Popup, Tab};
use crate::tui::input::InputAction;
use crate::tui::state::{BrowserFocus, BusyControl, EditorFocus, TagsFocus};

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            self.should_quit = true;
            return;
        }

        if self.popup != Popup::None {
            self.handle_popup_key(key);
            return;
        }

        if self.handle_tab_key(key) {
            return;
        }

        match self.tab {
            Tab::Tags => self.handle_tags_key(key),
            Tab::Browse(catalogue) => self.handle_browser_key(catalogue, key),
            Tab::Edit(catalogue) => self.handle_editor_key(catalogue, key),
        }
    }

    /// F1 help, F2-F6 and Alt+1-5 tab switching
    fn handle_tab_key(&mut self, key: KeyEvent) -> bool {
        let index = match key.code {
            KeyCode::F(1) => {
                self.popups.help.scroll_offset = 0;
                self.open_popup(Popup::Help);
                return true;
            }
            KeyCode::F(n @ 2..=6) => (n - 2) as usize,
            KeyCode::Char(c @ '1'..='5') if key.modifiers.contains(KeyModifiers::ALT) => {
                (c as u8 - b'1') as usize
            }
            _ => return false,
        };
        self.switch_tab(Tab::ALL[index]);
        true
    }

    /// Paste into whichever text field has focus
    pub fn handle_paste(&mut self, text: &str) {
        if self.popup != Popup::None {
            return;
        }
        match self.tab {
            Tab::Tags => {
                if let Some(edit) = self.tags.row_edit.as_mut() {
                    edit.focused_field().insert_text(text);
                } else if let Some(field) = self.tags.focused_field() {
                    field.insert_text(text);
                    if self.tags.focus == TagsFocus::Search {
                        self.tags.refilter();
                    }
                }
            }
            Tab::Browse(catalogue) => {
                let browser = self.browser_mut(catalogue);
                if browser.focus == BrowserFocus::Filter {
                    browser.filter.insert_text(text);
                    browser.refilter();
                }
            }
            Tab::Edit(catalogue) => {
                if let Some(field) = self.editor_mut(catalogue).focused_field() {
                    field.insert_text(text);
                }
            }
        }
    }

    fn handle_tags_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if let Some(edit) = self.tags.row_edit.as_mut() {
            match key.code {
                KeyCode::Esc => self.tags.row_edit = None,
                KeyCode::Tab | KeyCode::BackTab => edit.toggle_focus(),
                KeyCode::Enter => {
                    if !self.busy.is_busy(BusyControl::UpdateTag) {
                        self.update_row_tag();
                    }
                }
                code => {
                    edit.focused_field().handle_key(code, key.modifiers);
                }
            }
            return;
        }

        if ctrl {
            match key.code {
                KeyCode::Char('r') if !self.busy.is_busy(BusyControl::ReloadTags) => {
                    self.load_tags()
                }
                KeyCode::Char('s') if !self.busy.is_busy(BusyControl::SyncTags) => {
                    self.request_sync()
                }
                KeyCode::Char('x') if !self.busy.is_busy(BusyControl::PurgeSlashTags) => {
                    self.request_purge()
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.tags.focus = self.tags.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.tags.focus = self.tags.focus.prev();
                return;
            }
            _ => {}
        }

        let height = self.list_height;
        match self.tags.focus {
            TagsFocus::Table => match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.tags.select_prev(height),
                KeyCode::Down | KeyCode::Char('j') => self.tags.select_next(height),
                KeyCode::PageUp => {
                    for _ in 0..height.max(1) {
                        self.tags.select_prev(height);
                    }
                }
                KeyCode::PageDown => {
                    for _ in 0..height.max(1) {
                        self.tags.select_next(height);
                    }
                }
                KeyCode::Enter | KeyCode::Char('e') => {
                    self.tags.begin_row_edit();
                }
                _ => {}
            },
            TagsFocus::Add => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
                    && !self.busy.is_busy(BusyControl::AddTag)
                {
                    self.add_tag();
                }
            }
            TagsFocus::Search => {
                if key.code == KeyCode::Down {
                    self.tags.focus = TagsFocus::Table;
                    return;
                }
                if let Some(field) = self.tags.focused_field() {
                    if field.handle_key(key.code, key.modifiers) == InputAction::ContentChanged {
                        self.tags.refilter();
                    }
                }
            }
            TagsFocus::NewJp | TagsFocus::NewKr | TagsFocus::NewPriority => {
                let submitted = self
                    .tags
                    .focused_field()
                    .map(|field| field.handle_key(key.code, key.modifiers))
                    == Some(InputAction::Submit);
                if submitted && !self.busy.is_busy(BusyControl::AddTag) {
                    self.add_tag();
                }
            }
        }
    }

    fn handle_browser_key(&mut self, catalogue: Catalogue, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let height = self.list_height;

        if ctrl {
            if key.code == KeyCode::Char('r')
                && !self.busy.is_busy(BusyControl::LoadGames(catalogue))
            {
                self.load_games(catalogue);
            }
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.browser_mut(catalogue).cycle_focus(true);
                return;
            }
            KeyCode::BackTab => {
                self.browser_mut(catalogue).cycle_focus(false);
                return;
            }
            _ => {}
        }

        match self.browser(catalogue).focus {
            BrowserFocus::Platform => match key.code {
                KeyCode::Left | KeyCode::Up => self.browser_mut(catalogue).platform.prev(),
                KeyCode::Right | KeyCode::Down => self.browser_mut(catalogue).platform.next(),
                KeyCode::Enter if !self.busy.is_busy(BusyControl::LoadGames(catalogue)) => {
                    self.load_games(catalogue)
                }
                _ => {}
            },
            BrowserFocus::Load => {
                if key.code == KeyCode::Enter
                    && !self.busy.is_busy(BusyControl::LoadGames(catalogue))
                {
                    self.load_games(catalogue);
                }
            }
            BrowserFocus::DeleteAll => {
                if key.code == KeyCode::Enter
                    && !self.busy.is_busy(BusyControl::DeleteAll(catalogue))
                {
                    self.request_delete_all(catalogue);
                }
            }
            BrowserFocus::Stats => {
                if key.code == KeyCode::Enter
                    && !self.busy.is_busy(BusyControl::TagStats(catalogue))
                {
                    self.open_tag_stats(catalogue);
                }
            }
            BrowserFocus::Filter => {
                if key.code == KeyCode::Down {
                    self.browser_mut(catalogue).focus = BrowserFocus::List;
                    return;
                }
                let browser = self.browser_mut(catalogue);
                if browser.filter.handle_key(key.code, key.modifiers)
                    == InputAction::ContentChanged
                {
                    browser.refilter();
                }
            }
            BrowserFocus::List => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.browser_mut(catalogue).select_prev(height)
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.browser_mut(catalogue).select_next(height)
                }
                KeyCode::Char('d') | KeyCode::Delete
                    if !self.busy.is_busy(BusyControl::DeleteGame(catalogue)) =>
                {
                    self.request_delete_selected(catalogue)
                }
                _ => {}
            },
        }
    }

    fn handle_editor_key(&mut self, catalogue: Catalogue, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let height = self.list_height;

        if ctrl && key.code == KeyCode::Char('s') {
            if !self.busy.is_busy(BusyControl::SaveGame(catalogue)) {
                self.save_game(catalogue);
            }
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.editor_mut(catalogue).cycle_focus(true);
                return;
            }
            KeyCode::BackTab => {
                self.editor_mut(catalogue).cycle_focus(false);
                return;
            }
            _ => {}
        }

        let focus = self.editor(catalogue).focus;
        if let Some(language) = focus.chip_language() {
            let editor = self.editor_mut(catalogue);
            match key.code {
                KeyCode::Left => editor.move_chip_cursor(language, false),
                KeyCode::Right => editor.move_chip_cursor(language, true),
                KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('x') => {
                    if let Some(tag) = editor.remove_chip(language) {
                        tracing::debug!(tag = %tag, "Removed chip");
                    }
                }
                _ => {}
            }
            return;
        }

        match focus {
            EditorFocus::Platform => match key.code {
                KeyCode::Left | KeyCode::Up => self.editor_mut(catalogue).platform.prev(),
                KeyCode::Right | KeyCode::Down => self.editor_mut(catalogue).platform.next(),
                KeyCode::Enter if !self.busy.is_busy(BusyControl::FindCode(catalogue)) => {
                    self.find_code(catalogue)
                }
                _ => {}
            },
            EditorFocus::Find => {
                if key.code == KeyCode::Enter
                    && !self.busy.is_busy(BusyControl::FindCode(catalogue))
                {
                    self.find_code(catalogue);
                }
            }
            EditorFocus::Results => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.editor_mut(catalogue).select_result_prev(height)
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.editor_mut(catalogue).select_result_next(height)
                }
                KeyCode::Enter if !self.busy.is_busy(BusyControl::FindCode(catalogue)) => {
                    self.pick_search_result(catalogue)
                }
                _ => {}
            },
            EditorFocus::Save => {
                if key.code == KeyCode::Enter
                    && !self.busy.is_busy(BusyControl::SaveGame(catalogue))
                {
                    self.save_game(catalogue);
                }
            }
            _ => {
                let action = self
                    .editor_mut(catalogue)
                    .focused_field()
                    .map(|field| field.handle_key(key.code, key.modifiers));
                if action == Some(InputAction::Submit) {
                    self.submit_editor_field(catalogue, focus);
                }
            }
        }
    }

    /// Enter in a text field runs the action of the group it belongs to
    fn submit_editor_field(&mut self, catalogue: Catalogue, focus: EditorFocus) {
        let control = match focus {
            EditorFocus::Code => BusyControl::FindCode(catalogue),
            EditorFocus::TitleQuery => BusyControl::SearchTitle(catalogue),
            EditorFocus::TagQuery => BusyControl::SearchTag(catalogue),
            _ => BusyControl::SaveGame(catalogue),
        };
        if self.busy.is_busy(control) {
            return;
        }
        match focus {
            EditorFocus::Code => self.find_code(catalogue),
            EditorFocus::TitleQuery => self.search_title(catalogue),
            EditorFocus::TagQuery => self.search_tag(catalogue),
            _ => self.save_game(catalogue),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;
    use tagsite_core::GameRecord;

    use super::*;
    use crate::tui::app::test_support::app;
    use crate::tui::components::ToastKind;
    use crate::tui::state::PendingAction;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_function_keys_switch_tabs() {
        let mut app = app();
        app.handle_key(press(KeyCode::F(5)));
        assert_eq!(app.tab, Tab::Browse(Catalogue::Document));
        app.handle_key(KeyEvent::new(KeyCode::Char('3'), KeyModifiers::ALT));
        assert_eq!(app.tab, Tab::Edit(Catalogue::Storage));
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut app = app();
        let mut key = press(KeyCode::F(3));
        key.kind = KeyEventKind::Release;
        key.state = KeyEventState::NONE;
        app.handle_key(key);
        assert_eq!(app.tab, Tab::Tags);
    }

    #[test]
    fn test_tag_search_filters_as_you_type() {
        let mut app = app();
        app.tags.set_tags(vec![
            tagsite_core::Tag::new("巨乳", "거유", Some(1)),
            tagsite_core::Tag::new("百合", "백합", Some(2)),
        ]);
        type_text(&mut app, "백");
        assert_eq!(app.tags.visible_len(), 1);
        app.handle_key(press(KeyCode::Backspace));
        assert_eq!(app.tags.visible_len(), 2);
    }

    #[test]
    fn test_sync_asks_for_confirmation() {
        let mut app = app();
        app.handle_key(ctrl('s'));
        assert_eq!(app.popup, Popup::Confirm);
        assert_eq!(app.pending, Some(PendingAction::SyncTags));

        app.handle_key(press(KeyCode::Char('n')));
        assert_eq!(app.popup, Popup::None);
        assert!(app.pending.is_none());
        assert!(app.busy.is_empty());
    }

    #[test]
    fn test_add_with_missing_tag_is_rejected_locally() {
        let mut app = app();
        app.tags.focus = TagsFocus::NewJp;
        type_text(&mut app, "巨乳");
        app.handle_key(press(KeyCode::Enter));
        let toast = app.toasts.iter().next_back().expect("validation toast");
        assert_eq!(toast.kind, ToastKind::Error);
        assert!(app.busy.is_empty());
        assert_eq!(app.tags.new_jp.content(), "巨乳");
    }

    #[test]
    fn test_editor_code_lookup_requires_code() {
        let mut app = app();
        app.switch_tab(Tab::Edit(Catalogue::Document));
        app.handle_key(press(KeyCode::Enter));
        let toast = app.toasts.iter().next_back().expect("validation toast");
        assert_eq!(toast.message, "Enter a game code");
        assert!(app.busy.is_empty());
    }

    #[test]
    fn test_empty_title_search_is_rejected() {
        let mut app = app();
        app.switch_tab(Tab::Edit(Catalogue::Document));
        app.editor_mut(Catalogue::Document).focus = EditorFocus::TitleQuery;
        type_text(&mut app, "   ");
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(
            app.toasts.iter().next_back().map(|t| t.message.as_str()),
            Some("Enter a search term")
        );
    }

    #[test]
    fn test_chip_removal_from_keyboard() {
        let mut app = app();
        let editor = app.editor_mut(Catalogue::Storage);
        editor.show_record(
            tagsite_core::Platform::new("rj"),
            "RJ1".to_string(),
            GameRecord {
                tags: vec!["가".into(), "나".into()],
                ..GameRecord::default()
            },
        );
        editor.focus = EditorFocus::TagsKr;
        app.switch_tab(Tab::Edit(Catalogue::Storage));
        app.handle_key(press(KeyCode::Right));
        app.handle_key(press(KeyCode::Delete));
        let record = app.editor(Catalogue::Storage).record.as_ref().unwrap();
        assert_eq!(record.tags, vec!["가".to_string()]);
    }

    #[tokio::test]
    async fn test_tag_stats_button_ignored_while_busy() {
        let mut app = app();
        let catalogue = Catalogue::Document;
        app.tab = Tab::Browse(catalogue);
        app.browser_mut(catalogue).focus = BrowserFocus::Stats;

        app.busy.mark(BusyControl::TagStats(catalogue));
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.popup, Popup::None);

        app.busy.clear(BusyControl::TagStats(catalogue));
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.popup, Popup::TagStats);
        assert!(app.busy.is_busy(BusyControl::TagStats(catalogue)));
    }

    #[test]
    fn test_ctrl_c_quits_from_popup() {
        let mut app = app();
        app.open_popup(Popup::Help);
        app.handle_key(ctrl('c'));
        assert!(app.should_quit);
    }
}
