use std::sync::Arc;

use crate::settings::FormattingOptions;

/// Immutable snapshot of everything one jq run needs
///
/// Cloning is cheap; the document is shared, not copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    document: Arc<str>,
    query: Arc<str>,
    options: FormattingOptions,
}

impl QueryRequest {
    /// Build a request, normalizing document line endings to `\n`
    pub fn new(document: &str, query: &str, options: FormattingOptions) -> Self {
        Self {
            document: normalize_line_endings(document).into(),
            query: query.into(),
            options,
        }
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub(crate) fn shared_document(&self) -> Arc<str> {
        Arc::clone(&self.document)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn options(&self) -> FormattingOptions {
        self.options
    }
}

fn normalize_line_endings(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
