use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

use super::app_state::{App, Focus, OutputMode};
use crate::query::QueryInvoker;

/// Short enough that published output shows up without a keypress
const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Lines moved per PageUp/PageDown
pub(crate) const PAGE_SCROLL_LINES: u16 = 10;

impl<I: QueryInvoker> App<I> {
    pub fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(EVENT_POLL_TIMEOUT)? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_event(key_event);
                }
                Event::Paste(text) => {
                    self.handle_paste_event(text);
                }
                Event::Resize(_, _) => self.mark_dirty(),
                _ => {}
            }
        }
        Ok(())
    }

    pub(crate) fn handle_paste_event(&mut self, text: String) {
        match self.focus {
            Focus::Document => {
                self.document.insert_str(text);
                self.document_edited();
            }
            Focus::Query => {
                let text = text.replace("\r\n", " ").replace(['\n', '\r'], " ");
                self.query.insert_str(text);
                self.query_edited();
            }
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit(None);
            return;
        }

        if self.help.visible {
            self.handle_help_key(key);
            return;
        }

        if self.handle_global_keys(key) {
            return;
        }

        match self.focus {
            Focus::Document => self.handle_document_key(key),
            Focus::Query => self.handle_query_key(key),
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') => self.help.close(),
            KeyCode::Down | KeyCode::Char('j') => self.help.scroll_down(1),
            KeyCode::Up | KeyCode::Char('k') => self.help.scroll_up(1),
            KeyCode::PageDown => self.help.scroll_down(PAGE_SCROLL_LINES),
            KeyCode::PageUp => self.help.scroll_up(PAGE_SCROLL_LINES),
            _ => return,
        }
        self.mark_dirty();
    }

    /// Keys that work the same in both editors. Returns true when consumed.
    fn handle_global_keys(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.quit(None),
            KeyCode::Char('q') if ctrl => self.quit(Some(OutputMode::Query)),
            KeyCode::Enter if self.focus == Focus::Query => self.quit(Some(OutputMode::Results)),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Document => Focus::Query,
                    Focus::Query => Focus::Document,
                };
                self.mark_dirty();
            }
            KeyCode::F(1) => {
                self.help.toggle();
                self.mark_dirty();
            }
            KeyCode::F(2) => {
                self.controller.cycle_indentation();
                self.mark_dirty();
            }
            KeyCode::F(3) => {
                self.controller.toggle_sort_keys();
                self.mark_dirty();
            }
            KeyCode::F(5) => {
                self.controller.rerun();
                self.mark_dirty();
            }
            KeyCode::PageDown => self.scroll_output_down(PAGE_SCROLL_LINES),
            KeyCode::PageUp => self.scroll_output_up(PAGE_SCROLL_LINES),
            _ => return false,
        }
        true
    }

    fn handle_document_key(&mut self, key: KeyEvent) {
        if self.document.input(key) {
            self.document_edited();
        } else {
            self.mark_dirty();
        }
    }

    fn handle_query_key(&mut self, key: KeyEvent) {
        // The query is a single line; these would insert a line break
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key.code, KeyCode::Char('m') | KeyCode::Char('j')) {
            return;
        }

        if self.query.input(key) {
            self.query_edited();
        } else {
            self.mark_dirty();
        }
    }
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;
