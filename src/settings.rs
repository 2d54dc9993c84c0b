//! Formatting settings
//!
//! Holds the two options that shape jq's output (indentation and key sorting)
//! and the store that keeps them between sessions.

mod store;
mod types;

pub use store::{FileSettings, MemorySettings, SettingsStore, default_settings_path};
pub use types::{FormattingOptions, Indentation};
