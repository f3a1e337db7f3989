//! Configuration file management for fitpath.
//!
//! Provides a TOML-based config file at `~/.config/fitpath/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use fitpath_core::ai::GeminiConfig;
use fitpath_core::ai::gemini::{API_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT};
use fitpath_db::config::DbConfig;

pub const DATABASE_URL_ENV: &str = "FITPATH_DATABASE_URL";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "FITPATH_MODEL";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub database: DatabaseSection,
    #[serde(default)]
    pub ai: AiSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DatabaseSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AiSection {
    /// Gemini API key. Without one, every AI feature uses its fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the fitpath config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/fitpath` or `~/.config/fitpath`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("fitpath");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("fitpath")
}

/// Return the path to the fitpath config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse a config file.
pub fn load_config_from(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(config)
}

/// Load the config file if it exists. A present but unparsable file is an
/// error.
pub fn load_config() -> Result<Option<ConfigFile>> {
    let path = config_path();
    if !path.exists() {
        return Ok(None);
    }
    load_config_from(&path).map(Some)
}

/// Serialize and write a config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix.
pub fn save_config_to(config: &ConfigFile, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    // Owner read/write only: the file may hold an API key.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

pub fn save_config(config: &ConfigFile) -> Result<()> {
    save_config_to(config, &config_path())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Flags that take part in resolution.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub database_url: Option<String>,
    pub model: Option<String>,
}

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct FitpathConfig {
    pub db_config: DbConfig,
    /// `None` when no API key is configured anywhere.
    pub gemini: Option<GeminiConfig>,
    /// Where the config file was looked up, and whether it was found.
    pub config_file: (PathBuf, bool),
}

impl FitpathConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - DB URL: `--database-url` > `FITPATH_DATABASE_URL` > `database.url` > data dir default
    /// - API key: `GEMINI_API_KEY` > `ai.api_key` > none (offline fallbacks)
    /// - Model: `--model` > `FITPATH_MODEL` > `ai.model` > `gemini-2.5-flash`
    pub fn resolve(cli: &CliOverrides) -> Result<Self> {
        let path = config_path();
        let file_config = load_config()?;
        let found = file_config.is_some();
        let file_config = file_config.unwrap_or_default();

        let db_url = if let Some(url) = cli.database_url.clone() {
            url
        } else if let Some(url) = non_empty_env(DATABASE_URL_ENV) {
            url
        } else if let Some(url) = file_config.database.url.clone() {
            url
        } else {
            DbConfig::default_url()
        };
        let db_config = DbConfig::new(db_url);

        let api_key = non_empty_env(API_KEY_ENV).or_else(|| {
            file_config
                .ai
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty())
        });

        let gemini = api_key.map(|key| {
            let model = cli
                .model
                .clone()
                .or_else(|| non_empty_env(MODEL_ENV))
                .or_else(|| file_config.ai.model.clone())
                .unwrap_or_else(|| DEFAULT_MODEL.to_owned());
            let base_url = file_config
                .ai
                .base_url
                .clone()
                .unwrap_or_else(|| API_BASE_URL.to_owned());
            let timeout = file_config
                .ai
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT);
            GeminiConfig::new(key)
                .with_model(model)
                .with_base_url(base_url)
                .with_timeout(timeout)
        });

        Ok(Self {
            db_config,
            gemini,
            config_file: (path, found),
        })
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
