use std::fs::File;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

use serde_json::Value;

use crate::error::JqPanelError;

/// Read the initial document from stdin or a file
///
/// The text is not validated; jq reports malformed input itself.
pub struct InputReader;

impl InputReader {
    /// Read a document from a file path, or from stdin when it is piped
    ///
    /// An interactive stdin yields an empty document instead of blocking.
    pub fn read_document(path: Option<&Path>) -> Result<String, JqPanelError> {
        match path {
            Some(file_path) => {
                let mut file = File::open(file_path)?;
                let mut contents = String::new();
                file.read_to_string(&mut contents)?;
                Ok(contents)
            }
            None if io::stdin().is_terminal() => Ok(String::new()),
            None => {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                Ok(buffer)
            }
        }
    }
}

/// Documents larger than this are not parsed on every edit
pub const MAX_CHECKED_BYTES: usize = 256 * 1024;

/// Quick local sniff of a document, shown next to the editor title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentCheck {
    Empty,
    /// Number of whitespace-separated JSON values
    Json(usize),
    Invalid,
    /// Too large to parse while typing; jq still reports errors
    Unchecked,
}

impl DocumentCheck {
    pub fn of(text: &str) -> Self {
        if text.len() > MAX_CHECKED_BYTES {
            return DocumentCheck::Unchecked;
        }
        if text.trim().is_empty() {
            return DocumentCheck::Empty;
        }

        let mut count = 0;
        for value in serde_json::Deserializer::from_str(text).into_iter::<Value>() {
            if value.is_err() {
                return DocumentCheck::Invalid;
            }
            count += 1;
        }
        DocumentCheck::Json(count)
    }

    pub fn label(&self) -> Option<String> {
        match self {
            DocumentCheck::Empty => None,
            DocumentCheck::Json(1) => None,
            DocumentCheck::Json(n) => Some(format!("{} values", n)),
            DocumentCheck::Invalid => Some("invalid JSON".to_string()),
            DocumentCheck::Unchecked => Some("not checked".to_string()),
        }
    }
}
