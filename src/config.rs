//! Resolver configuration loaded from `~/.config/embedres/config.toml`.
//!
//! Every key is optional:
//!
//! ```toml
//! [bilibili]
//! host = "bilibili.com"
//!
//! [content]
//! placeholder_poster = "/covers/placeholder.jpg"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::site::bilibili;

/// Poster shown when a content record carries none.
pub const DEFAULT_PLACEHOLDER_POSTER: &str = "/covers/placeholder.jpg";

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    pub bilibili: BilibiliConfig,
    pub content: ContentConfig,
}

/// Bilibili platform settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BilibiliConfig {
    /// Registrable domain; `www.` and `player.` are prefixed to it.
    pub host: String,
}

impl Default for BilibiliConfig {
    fn default() -> Self {
        Self {
            host: bilibili::DEFAULT_HOST.to_string(),
        }
    }
}

/// Content presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub placeholder_poster: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            placeholder_poster: DEFAULT_PLACEHOLDER_POSTER.to_string(),
        }
    }
}

impl EmbedConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid embedres config")
    }

    /// Load configuration from `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("invalid TOML in {}", path.display()))
    }

    /// Load configuration from the default location.
    ///
    /// Returns defaults if the file doesn't exist (configuration is optional).
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("embedres")
        .join("config.toml")
}
