use ratatui::text::Text;
use tui_textarea::TextArea;

use ansi_to_tui::IntoText;

use crate::help::HelpPopupState;
use crate::input::DocumentCheck;
use crate::query::{JqExecutor, OutputState, QueryController, QueryInvoker, QueryRequest};

/// Which editor receives typed keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Document,
    #[default]
    Query,
}

/// What to print to stdout after the terminal is restored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Results,
    Query,
}

pub struct App<I: QueryInvoker = JqExecutor> {
    pub(crate) document: TextArea<'static>,
    pub(crate) query: TextArea<'static>,
    pub controller: QueryController<I>,
    pub focus: Focus,
    pub output_scroll: u16,
    /// Upper bound for `output_scroll`, updated on every render
    pub(crate) max_output_scroll: u16,
    pub help: HelpPopupState,
    /// One-off message shown on the status line while jq reports nothing
    pub notification: Option<String>,
    pub document_check: DocumentCheck,
    pub(crate) color_output: bool,
    output_mode: Option<OutputMode>,
    should_quit: bool,
    dirty: bool,
    seen_revision: u64,
    seen_pending: bool,
    rendered_output: Option<(u64, Text<'static>)>,
    pub(crate) frame_count: u64,
}

impl<I: QueryInvoker> App<I> {
    /// Fill both editors and start the first run
    pub fn new(
        mut controller: QueryController<I>,
        document: String,
        query: String,
        color_output: bool,
    ) -> Self {
        let query = single_line(&query);
        let document_check = DocumentCheck::of(&document);

        let mut query_area = TextArea::from([query.clone()]);
        query_area.move_cursor(tui_textarea::CursorMove::End);

        let document_area = TextArea::from(document.lines());

        controller.load(document, query);

        Self {
            document: document_area,
            query: query_area,
            controller,
            focus: Focus::default(),
            output_scroll: 0,
            max_output_scroll: 0,
            help: HelpPopupState::default(),
            notification: None,
            document_check,
            color_output,
            output_mode: None,
            should_quit: false,
            dirty: true,
            seen_revision: 0,
            seen_pending: false,
            rendered_output: None,
            frame_count: 0,
        }
    }

    pub fn document_text(&self) -> String {
        self.document.lines().join("\n")
    }

    pub fn query_text(&self) -> String {
        self.query.lines().concat()
    }

    /// Request built from what the editors currently hold
    pub fn current_request(&self) -> QueryRequest {
        self.controller.snapshot()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn output_mode(&self) -> Option<OutputMode> {
        self.output_mode
    }

    pub(crate) fn quit(&mut self, mode: Option<OutputMode>) {
        self.output_mode = mode;
        self.should_quit = true;
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(message.into());
        self.dirty = true;
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// True when input changed or the pipeline published since the last frame
    pub fn should_render(&self) -> bool {
        self.dirty
            || self.controller.output().revision() != self.seen_revision
            || self.controller.is_pending() != self.seen_pending
    }

    pub(crate) fn mark_rendered(&mut self, revision: u64, pending: bool) {
        self.dirty = false;
        self.seen_revision = revision;
        self.seen_pending = pending;
    }

    pub(crate) fn document_edited(&mut self) {
        let text = self.document_text();
        self.document_check = DocumentCheck::of(&text);
        self.controller.set_document(text);
        self.dirty = true;
    }

    pub(crate) fn query_edited(&mut self) {
        let text = self.query_text();
        self.controller.set_query(text);
        self.notification = None;
        self.dirty = true;
    }

    pub(crate) fn scroll_output_down(&mut self, lines: u16) {
        self.output_scroll = self
            .output_scroll
            .saturating_add(lines)
            .min(self.max_output_scroll);
        self.dirty = true;
    }

    pub(crate) fn scroll_output_up(&mut self, lines: u16) {
        self.output_scroll = self.output_scroll.saturating_sub(lines);
        self.dirty = true;
    }

    /// Output text of `state`, parsed from ANSI once per revision
    pub(crate) fn rendered_output(&mut self, state: &OutputState) -> &Text<'static> {
        let revision = state.revision;
        if !matches!(&self.rendered_output, Some((cached, _)) if *cached == revision) {
            self.rendered_output = None;
        }

        let color_output = self.color_output;
        let (_, text) = self.rendered_output.get_or_insert_with(|| {
            let output = state.output.clone();
            let text = if color_output {
                output
                    .as_bytes()
                    .to_vec()
                    .into_text()
                    .unwrap_or_else(|_| Text::raw(output.clone()))
            } else {
                Text::raw(output)
            };
            (revision, text)
        });
        text
    }
}

/// Collapse a multi-line query into the single query line
fn single_line(query: &str) -> String {
    query
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod app_state_tests;
