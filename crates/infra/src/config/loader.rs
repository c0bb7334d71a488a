//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. If `CONVENE_API_URL` is set, the configuration comes from the
//!    environment
//! 2. Otherwise the first config file found by [`probe_config_paths`] is used
//! 3. With neither, built-in defaults apply
//!
//! ## Environment Variables
//! - `CONVENE_API_URL`: API base URL (selects the environment source)
//! - `CONVENE_API_TIMEOUT`: Request timeout in seconds
//! - `CONVENE_CREDENTIAL_BACKEND`: `file` or `keychain`
//! - `CONVENE_CREDENTIAL_PATH`: Credential file for the file backend
//! - `CONVENE_REFRESH_TIMEOUT`: Upper bound on a token refresh, in seconds
//! - `CONVENE_LOG_LEVEL`: Default log filter
//! - `CONVENE_LOG_JSON`: Emit JSON logs (true/false)
//!
//! ## File Locations
//! The loader probes, in the working directory and then next to the
//! executable: `convene.toml`, `convene.json`, `config.toml`, `config.json`.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use convene_domain::{
    ApiConfig, Config, ConveneError, CredentialBackend, LoggingConfig, Result, SessionConfig,
};

const CONFIG_FILE_NAMES: [&str; 4] = ["convene.toml", "convene.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `ConveneError::Config` if the selected source is malformed.
/// Missing sources are not an error.
pub fn load() -> Result<Config> {
    if std::env::var_os("CONVENE_API_URL").is_some() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::debug!("No configuration found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Load configuration from environment variables
///
/// `CONVENE_API_URL` is required; every other variable falls back to its
/// default.
///
/// # Errors
/// Returns `ConveneError::Config` if the URL is missing or a value cannot be
/// parsed.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("CONVENE_API_URL")?;
    let timeout_secs = match optional_env("CONVENE_API_TIMEOUT") {
        Some(raw) => parse_secs("CONVENE_API_TIMEOUT", &raw)?,
        None => ApiConfig::default().timeout_secs,
    };

    let mut session = SessionConfig::default();
    if let Some(raw) = optional_env("CONVENE_CREDENTIAL_BACKEND") {
        session.credential_backend = CredentialBackend::from_str(&raw).map_err(|e| {
            ConveneError::Config(format!("Invalid CONVENE_CREDENTIAL_BACKEND: {e}"))
        })?;
    }
    if let Some(path) = optional_env("CONVENE_CREDENTIAL_PATH") {
        session.credential_path = path;
    }
    if let Some(raw) = optional_env("CONVENE_REFRESH_TIMEOUT") {
        session.refresh_timeout_secs = Some(parse_secs("CONVENE_REFRESH_TIMEOUT", &raw)?);
    }

    let defaults = LoggingConfig::default();
    let logging = LoggingConfig {
        level: optional_env("CONVENE_LOG_LEVEL").unwrap_or(defaults.level),
        json: env_bool("CONVENE_LOG_JSON", defaults.json),
    };

    Ok(Config { api: ApiConfig { base_url, timeout_secs }, session, logging })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `ConveneError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConveneError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ConveneError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ConveneError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration, choosing the format by file extension.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ConveneError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ConveneError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(ConveneError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file in the working directory, then next to the
/// executable.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    probe_in(&dirs)
}

fn probe_in(dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| ConveneError::Config(format!("Missing required environment variable: {key}")))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_secs(key: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| ConveneError::Config(format!("Invalid {key} '{raw}': {e}")))
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
