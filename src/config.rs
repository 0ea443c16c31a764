//! Settings - defaults, YAML config file and environment overrides
//!
//! Command-line flags are applied last, in `main`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_API_URL};
use crate::models::Tone;

pub const ENV_API_URL: &str = "DOCUFORGE_API_URL";
pub const ENV_TONE: &str = "DOCUFORGE_TONE";
pub const ENV_TIMEOUT_SECS: &str = "DOCUFORGE_TIMEOUT_SECS";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Backend address that `/api` and `/health` paths are joined onto
    pub api_url: String,
    pub tone: Tone,
    /// Unset means no client-side timeout
    pub request_timeout_secs: Option<u64>,
    pub log_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_url: String::from(DEFAULT_API_URL),
            tone: Tone::default(),
            request_timeout_secs: None,
            log_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// `~/.docuforge/config.yaml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load settings from `path` (must exist) or from the default location
    /// (may be absent), then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => Settings::default(),
            },
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Settings::default());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(tone) = lookup(ENV_TONE) {
            self.tone = tone
                .parse::<Tone>()
                .with_context(|| format!("invalid {}", ENV_TONE))?;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs = secs
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid {}: '{}'", ENV_TIMEOUT_SECS, secs))?;
            self.request_timeout_secs = Some(secs);
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
