//! jqpanel library - live JSON query panel backed by an external jq process
//!
//! The query pipeline lives in [`query`]; the rest is the terminal host
//! around it.

pub mod app;
pub mod config;
pub mod error;
pub mod help;
pub mod input;
pub mod query;
pub mod settings;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

pub use app::{App, Focus, OutputMode};
pub use config::Config;
pub use error::JqPanelError;
pub use query::{ExecutionGate, JqExecutor, OutputView, QueryController, QueryRequest};
