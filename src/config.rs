//! Configuration
//!
//! Read from `minutes-digest.toml` (or `--config <path>`). Every field has a
//! default, so a missing file or an empty one tracks the Go proposal minutes
//! issue and writes under `data/` and `content/`.
//!
//! ```toml
//! [source]
//! owner = "golang"
//! repo = "go"
//! issue = 33502
//! per_page = 100
//!
//! [output]
//! state_file = "data/state.json"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::paths;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where comments come from
    #[serde(default)]
    pub source: SourceConfig,
    /// Where results go
    #[serde(default)]
    pub output: OutputConfig,
}

/// Comment source settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// GitHub API base URL
    pub api_base: String,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Tracking issue holding the minutes
    pub issue: u64,
    /// Comments per page
    pub per_page: u32,
    /// Environment variable holding an API token
    pub token_env: String,
    /// How far back to look for the baseline comment
    pub baseline_lookback_days: i64,
    /// HTTP timeout
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            owner: "golang".to_string(),
            repo: "go".to_string(),
            issue: 33502,
            per_page: 100,
            token_env: "GITHUB_TOKEN".to_string(),
            baseline_lookback_days: 30,
            timeout_secs: 30,
        }
    }
}

impl SourceConfig {
    /// Read the API token from the configured environment variable
    #[must_use]
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env).ok().filter(|t| !t.trim().is_empty())
    }
}

/// Output locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Processing pointer
    pub state_file: PathBuf,
    /// Weekly digest
    pub digest_file: PathBuf,
    /// Per-proposal content files
    pub content_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from(paths::STATE_FILE),
            digest_file: PathBuf::from(paths::DIGEST_FILE),
            content_dir: PathBuf::from(paths::CONTENT_DIR),
        }
    }
}

impl Config {
    /// Load from a TOML file; a missing file yields the defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Parse TOML text
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot work with
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.source.issue > 0, "source.issue must be a positive issue number");
        anyhow::ensure!(
            (1..=100).contains(&self.source.per_page),
            "source.per_page must be between 1 and 100"
        );
        anyhow::ensure!(
            self.source.baseline_lookback_days > 0,
            "source.baseline_lookback_days must be positive"
        );
        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
