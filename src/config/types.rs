// Configuration type definitions

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::error::JqPanelError;

/// jq binary section
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct JqConfig {
    /// Explicit binary; resolved from PATH when absent
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub color: bool,
    /// Hard kill timeout per run
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl JqConfig {
    /// Locate the jq binary, either the configured one or `jq` on PATH
    pub fn resolve(&self) -> Result<PathBuf, JqPanelError> {
        let program = self
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from("jq"));

        which::which(&program)
            .map_err(|_| JqPanelError::JqNotFound(program.display().to_string()))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}

/// Settings persistence section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SettingsConfig {
    #[serde(default = "default_persist")]
    pub persist: bool,
}

fn default_persist() -> bool {
    true
}

impl Default for SettingsConfig {
    fn default() -> Self {
        SettingsConfig { persist: true }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub jq: JqConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
}
