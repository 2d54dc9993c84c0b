use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::app_state::{App, Focus};
use crate::help::{help_line_render, help_popup_render};
use crate::input::DocumentCheck;
use crate::query::{OutputState, QueryInvoker, StatusLine};
use crate::settings::FormattingOptions;
use crate::theme;
use crate::widgets::scrollbar;

const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

impl<I: QueryInvoker> App<I> {
    pub fn render(&mut self, frame: &mut Frame) {
        self.frame_count = self.frame_count.wrapping_add(1);

        let state = self.controller.output().snapshot();
        let pending = self.controller.is_pending();
        let options = self.controller.formatting();

        let rows = Layout::vertical([Constraint::Min(5), Constraint::Length(1)])
            .split(frame.area());
        let columns = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[0]);
        let right = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(columns[1]);

        self.render_document(frame, columns[0]);
        self.render_query(frame, right[0]);
        self.render_status(frame, right[1], &state.status);
        self.render_output(frame, right[2], &state, pending, options);

        help_line_render::render_line(self, frame, rows[1]);

        if self.help.visible {
            help_popup_render::render_popup(self, frame);
        }

        self.mark_rendered(state.revision, pending);
    }

    fn render_document(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Document;

        let mut title = vec![Span::styled(" Document ", title_style(focused))];
        if let Some(label) = self.document_check.label() {
            let color = match self.document_check {
                DocumentCheck::Invalid => theme::editor::DOCUMENT_INVALID,
                DocumentCheck::Unchecked => theme::editor::DOCUMENT_UNCHECKED,
                _ => theme::editor::DOCUMENT_OK,
            };
            title.push(Span::styled(format!("({}) ", label), Style::default().fg(color)));
        }

        self.document.set_block(editor_block(Line::from(title), focused));
        self.document.set_cursor_line_style(Style::default());
        self.document.set_cursor_style(cursor_style(focused));
        frame.render_widget(&self.document, area);
    }

    fn render_query(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Query;
        let title = Line::from(Span::styled(" Query ", title_style(focused)));

        self.query.set_block(editor_block(title, focused));
        self.query.set_cursor_line_style(Style::default());
        self.query.set_cursor_style(cursor_style(focused));
        frame.render_widget(&self.query, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, status: &StatusLine) {
        let line = match status {
            StatusLine::Empty => match &self.notification {
                Some(message) => Line::styled(
                    format!(" {}", message),
                    Style::default().fg(theme::status::NOTIFICATION),
                ),
                None => Line::default(),
            },
            StatusLine::Warning(text) => Line::styled(
                format!(" {}", collapse_lines(text)),
                Style::default().fg(theme::status::WARNING),
            ),
            StatusLine::Error(text) => Line::styled(
                format!(" {}", collapse_lines(text)),
                Style::default().fg(theme::status::ERROR),
            ),
            StatusLine::InvocationFailed(text) => Line::styled(
                format!(" ⚠ {}", collapse_lines(text)),
                theme::status::INVOCATION_FAILED,
            ),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_output(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &OutputState,
        pending: bool,
        options: FormattingOptions,
    ) {
        let mut title = format!(" Output [{}", options.indentation.label());
        if options.sort_keys {
            title.push_str(", sorted keys");
        }
        title.push_str("] ");

        let mut title_spans = vec![Span::styled(title, theme::output::TITLE)];
        if pending {
            let spinner = SPINNER_FRAMES[(self.frame_count as usize) % SPINNER_FRAMES.len()];
            title_spans.push(Span::styled(
                format!("{} ", spinner),
                Style::default().fg(theme::output::SPINNER),
            ));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(Line::from(title_spans))
            .border_style(Style::default().fg(theme::output::BORDER));

        let text = self.rendered_output(state).clone();
        let total_lines = text.lines.len();
        let viewport = area.height.saturating_sub(2) as usize;

        self.max_output_scroll = total_lines.saturating_sub(viewport).min(u16::MAX as usize) as u16;
        self.output_scroll = self.output_scroll.min(self.max_output_scroll);

        let paragraph = Paragraph::new(text)
            .block(block)
            .style(Style::default().fg(theme::output::TEXT))
            .scroll((self.output_scroll, 0));
        frame.render_widget(paragraph, area);

        scrollbar::render_vertical_scrollbar(
            frame,
            area,
            total_lines,
            viewport,
            self.output_scroll as usize,
            theme::output::SCROLLBAR,
        );
    }
}

fn editor_block(title: Line<'static>, focused: bool) -> Block<'static> {
    let border = if focused {
        theme::editor::BORDER_FOCUSED
    } else {
        theme::editor::BORDER_UNFOCUSED
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(border))
}

fn title_style(focused: bool) -> Style {
    if focused {
        theme::editor::TITLE_FOCUSED
    } else {
        theme::editor::TITLE_UNFOCUSED
    }
}

fn cursor_style(focused: bool) -> Style {
    if focused {
        theme::editor::CURSOR
    } else {
        Style::default()
    }
}

/// jq diagnostics can span lines; the status line has one row
fn collapse_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" · ")
}

#[cfg(test)]
#[path = "app_render_tests.rs"]
mod app_render_tests;
