use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::types::FormattingOptions;

/// Source of the formatting options read when a query request is built
pub trait SettingsStore: Send {
    fn formatting(&self) -> FormattingOptions;

    fn set_formatting(&mut self, options: FormattingOptions);
}

/// Settings kept for the lifetime of the process only
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    options: FormattingOptions,
}

impl SettingsStore for MemorySettings {
    fn formatting(&self) -> FormattingOptions {
        self.options
    }

    fn set_formatting(&mut self, options: FormattingOptions) {
        self.options = options;
    }
}

/// Settings persisted as TOML, written back on every change
///
/// Load and save failures never surface to the caller: a broken file falls
/// back to defaults and a failed write only logs.
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
    options: FormattingOptions,
}

impl FileSettings {
    pub fn load(path: PathBuf) -> Self {
        let options = match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<FormattingOptions>(&contents) {
                Ok(options) => options,
                Err(e) => {
                    log::error!("Invalid settings file {:?}: {}", path, e);
                    FormattingOptions::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No settings file at {:?}, using defaults", path);
                FormattingOptions::default()
            }
            Err(e) => {
                log::error!("Failed to read settings file {:?}: {}", path, e);
                FormattingOptions::default()
            }
        };

        Self { path, options }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> io::Result<()> {
        let contents = toml::to_string_pretty(&self.options)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, contents)
    }
}

impl SettingsStore for FileSettings {
    fn formatting(&self) -> FormattingOptions {
        self.options
    }

    fn set_formatting(&mut self, options: FormattingOptions) {
        self.options = options;
        if let Err(e) = self.save() {
            log::error!("Failed to save settings to {:?}: {}", self.path, e);
        }
    }
}

/// Returns ~/.config/jqpanel/settings.toml
pub fn default_settings_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("jqpanel")
        .join("settings.toml")
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
