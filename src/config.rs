//! Configuration handling for the TUI

use crate::service::DEFAULT_DELAY;
use crate::state::Theme;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment override for the simulated create delay
const DELAY_ENV: &str = "ROSTER_SUBMIT_DELAY_MS";

/// Environment override that makes every simulated create fail
const FAILURE_ENV: &str = "ROSTER_SIMULATE_FAILURE";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RosterConfig {
    /// Delay of the simulated create call, in milliseconds
    pub submit_delay_ms: Option<u64>,
    /// Path of the JSON data file holding the user list
    pub data_file: Option<PathBuf>,
    /// Theme at startup
    pub theme: Option<Theme>,
    /// Make the simulated create call fail, to exercise the error path
    pub simulate_failure: Option<bool>,
}

impl RosterConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "roster", "roster-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: RosterConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Create delay, with the environment variable taking precedence
    pub fn submit_delay(&self) -> Duration {
        let from_env = std::env::var(DELAY_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok());
        Self::resolve_delay(from_env, self.submit_delay_ms)
    }

    fn resolve_delay(from_env: Option<u64>, configured: Option<u64>) -> Duration {
        from_env
            .or(configured)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DELAY)
    }

    /// Whether simulated creates should fail, with the environment variable
    /// taking precedence
    pub fn simulate_failure(&self) -> bool {
        let from_env = std::env::var(FAILURE_ENV).ok().and_then(|v| parse_flag(&v));
        from_env.or(self.simulate_failure).unwrap_or(false)
    }

    /// Data file location: configured path, else the platform data dir.
    /// `None` means no location could be determined.
    pub fn data_path(&self) -> Option<PathBuf> {
        self.data_file.clone().or_else(|| {
            Self::project_dirs().map(|dirs| dirs.data_dir().join("store.json"))
        })
    }

    pub fn theme(&self) -> Theme {
        self.theme.unwrap_or_default()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
