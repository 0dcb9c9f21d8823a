//! shiftcheck.toml configuration

use crate::engine::{EngineSettings, DEFAULT_BATCH_WINDOW};
use crate::models::{ChecklistDefinition, DEFAULT_LOG_LIMIT};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "shiftcheck.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftcheckConfig {
    /// Session state file
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,

    /// Optional YAML checklist replacing the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checklist: Option<PathBuf>,

    /// Items offered at once in batch mode
    #[serde(default = "default_batch_window")]
    pub batch_window: usize,

    /// Records shown per log section
    #[serde(default = "default_log_limit")]
    pub log_limit: usize,
}

fn default_state_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("shiftcheck").join("state.json"))
        .unwrap_or_else(|| PathBuf::from(".shiftcheck/state.json"))
}

fn default_batch_window() -> usize {
    DEFAULT_BATCH_WINDOW
}

fn default_log_limit() -> usize {
    DEFAULT_LOG_LIMIT
}

impl Default for ShiftcheckConfig {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
            checklist: None,
            batch_window: default_batch_window(),
            log_limit: default_log_limit(),
        }
    }
}

impl ShiftcheckConfig {
    /// Load config from an explicit path, else `./shiftcheck.toml`, else defaults.
    ///
    /// An explicit path must exist.
    pub fn load(explicit: Option<&Path>, project_root: &Path) -> Result<Self> {
        let config_path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = project_root.join(CONFIG_FILE);
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let mut config: ShiftcheckConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        // Relative paths are relative to the config file
        let base = config_path.parent().unwrap_or(project_root);
        if config.state_path.is_relative() {
            config.state_path = base.join(&config.state_path);
        }
        if let Some(checklist) = config.checklist.as_mut() {
            if checklist.is_relative() {
                *checklist = base.join(&*checklist);
            }
        }

        Ok(config)
    }

    /// The configured checklist, or the built-in one
    pub fn load_checklist(&self) -> Result<ChecklistDefinition> {
        match &self.checklist {
            Some(path) => ChecklistDefinition::load(path),
            None => Ok(ChecklistDefinition::default()),
        }
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            batch_window: self.batch_window.max(1),
            log_limit: self.log_limit,
        }
    }
}
