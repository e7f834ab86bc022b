//! Configuration management.
//!
//! Loads configuration from ${TECHHUB_HOME}/config.toml with sensible
//! defaults. The service base URL is deliberately not defaulted: the
//! deployment the client should talk to is an external decision and
//! must come from the flag, the environment, or the config file.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the configured base URL.
pub const BASE_URL_ENV: &str = "TECHHUB_BASE_URL";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time. To update, edit
/// that file directly.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the authentication service. Empty means unset.
    pub base_url: String,

    /// Timeout for authentication requests in seconds.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Loads the config from the default path, falling back to defaults
    /// when no file exists yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads the config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Writes the config file at the default path, merging any existing
    /// user values into the commented template so new sections always
    /// appear.
    pub fn initialize() -> Result<std::path::PathBuf> {
        let path = paths::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let merged = if path.exists() {
            let existing = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config at {}", path.display()))?;
            merge_with_template(&existing)?
        } else {
            default_config_template().to_string()
        };
        fs::write(&path, merged)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(path)
    }

    /// Request timeout as a [`Duration`]. A zero value falls back to
    /// the default rather than disabling the timeout.
    pub fn request_timeout(&self) -> Duration {
        let secs = if self.request_timeout_secs == 0 {
            DEFAULT_REQUEST_TIMEOUT_SECS
        } else {
            self.request_timeout_secs
        };
        Duration::from_secs(secs)
    }
}

/// Resolves the service base URL.
///
/// Resolution order:
/// 1. `--base-url` flag
/// 2. `TECHHUB_BASE_URL` environment variable
/// 3. `base_url` in config.toml
///
/// Errors if none is set; the client never guesses an endpoint.
pub fn resolve_base_url(flag: Option<&str>, config: &Config) -> Result<String> {
    let env = std::env::var(BASE_URL_ENV).ok();
    resolve_base_url_from(flag, env.as_deref(), config)
}

fn resolve_base_url_from(
    flag: Option<&str>,
    env: Option<&str>,
    config: &Config,
) -> Result<String> {
    for candidate in [flag, env, Some(config.base_url.as_str())] {
        if let Some(url) = candidate {
            let trimmed = url.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.trim_end_matches('/').to_string());
            }
        }
    }
    bail!(
        "No service base URL configured.\n\
         Set base_url in {}, or export {}, or pass --base-url.",
        paths::config_path().display(),
        BASE_URL_ENV
    );
}

/// Merges user config values into the default template.
///
/// The template is the base so new comments/sections are always
/// present; user values overlay it.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::{DocumentMut, Item};

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;
    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    for (key, value) in user_doc.as_table().iter() {
        if let Item::Value(v) = value {
            doc[key] = Item::Value(v.clone());
        }
    }

    Ok(doc.to_string())
}

pub mod paths {
    //! Path resolution for the client's home directory.
    //!
    //! TECHHUB_HOME resolution order:
    //! 1. TECHHUB_HOME environment variable (if set)
    //! 2. ~/.config/techhub (default)

    use std::path::PathBuf;

    /// Returns the techhub home directory.
    pub fn techhub_home() -> PathBuf {
        if let Ok(home) = std::env::var("TECHHUB_HOME") {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .map(|h| h.join(".config").join("techhub"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        techhub_home().join("config.toml")
    }

    /// Returns the directory where TUI-mode log files are written.
    pub fn logs_dir() -> PathBuf {
        techhub_home().join("logs")
    }
}
