//! Trigger controller
//!
//! Turns edits to the document, the query, or the formatting options into
//! gated submissions. There is deliberately no timer here: a burst of edits
//! starts and cancels a run per edit, and cheap cancellation in the gate
//! keeps only the last one alive.

use super::executor::QueryInvoker;
use super::gate::{ExecutionGate, Submission};
use super::publisher::OutputView;
use super::request::QueryRequest;
use crate::settings::{FormattingOptions, Indentation, SettingsStore};

/// Which input changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    DocumentChanged,
    QueryChanged,
    OptionsChanged,
    Rerun,
}

pub struct QueryController<I: QueryInvoker> {
    gate: ExecutionGate<I>,
    settings: Box<dyn SettingsStore>,
    document: String,
    query: String,
}

impl<I: QueryInvoker> QueryController<I> {
    pub fn new(gate: ExecutionGate<I>, settings: Box<dyn SettingsStore>) -> Self {
        Self {
            gate,
            settings,
            document: String::new(),
            query: String::new(),
        }
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn formatting(&self) -> FormattingOptions {
        self.settings.formatting()
    }

    pub fn output(&self) -> &OutputView {
        self.gate.output()
    }

    pub fn gate(&self) -> &ExecutionGate<I> {
        &self.gate
    }

    pub fn is_pending(&self) -> bool {
        self.gate.is_pending()
    }

    /// Replace both inputs at once and run them as a single request
    pub fn load(
        &mut self,
        document: impl Into<String>,
        query: impl Into<String>,
    ) -> Option<Submission> {
        self.document = document.into();
        self.query = query.into();
        self.trigger(Trigger::DocumentChanged)
    }

    pub fn set_document(&mut self, document: impl Into<String>) -> Option<Submission> {
        self.document = document.into();
        self.trigger(Trigger::DocumentChanged)
    }

    pub fn set_query(&mut self, query: impl Into<String>) -> Option<Submission> {
        self.query = query.into();
        self.trigger(Trigger::QueryChanged)
    }

    pub fn set_formatting(&mut self, options: FormattingOptions) -> Option<Submission> {
        self.settings.set_formatting(options);
        self.trigger(Trigger::OptionsChanged)
    }

    pub fn set_indentation(&mut self, indentation: Indentation) -> Option<Submission> {
        let options = FormattingOptions {
            indentation,
            ..self.formatting()
        };
        self.set_formatting(options)
    }

    pub fn cycle_indentation(&mut self) -> Option<Submission> {
        let next = self.formatting().indentation.next();
        self.set_indentation(next)
    }

    pub fn toggle_sort_keys(&mut self) -> Option<Submission> {
        let mut options = self.formatting();
        options.sort_keys = !options.sort_keys;
        self.set_formatting(options)
    }

    /// Rerun after the settings store was changed from outside the controller
    pub fn options_changed(&mut self) -> Option<Submission> {
        self.trigger(Trigger::OptionsChanged)
    }

    /// Resubmit the current inputs unchanged
    pub fn rerun(&mut self) -> Option<Submission> {
        self.trigger(Trigger::Rerun)
    }

    /// Current inputs as a request, with options read from the settings store
    pub fn snapshot(&self) -> QueryRequest {
        QueryRequest::new(&self.document, &self.query, self.settings.formatting())
    }

    /// Snapshot the current inputs into a request and submit it
    pub fn trigger(&mut self, reason: Trigger) -> Option<Submission> {
        let request = self.snapshot();

        match self.gate.submit(request) {
            Ok(submission) => {
                log::debug!(
                    "{:?} triggered request {}",
                    reason,
                    submission.request_id()
                );
                Some(submission)
            }
            Err(e) => {
                log::debug!("{:?} ignored: {}", reason, e);
                None
            }
        }
    }

    /// Dispose the gate and wait for in-flight runs to wind down
    pub async fn shutdown(&self) {
        self.gate.shutdown().await;
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
