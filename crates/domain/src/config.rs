//! Application configuration structures
//!
//! Loading (environment, files) lives in `convene-infra`; this module only
//! defines the shape and defaults.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_API_TIMEOUT_SECS, DEFAULT_CREDENTIAL_FILE,
    DEFAULT_KEYCHAIN_ACCOUNT, DEFAULT_KEYCHAIN_SERVICE, DEFAULT_LOG_LEVEL,
};
use crate::impl_domain_status_conversions;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_BASE_URL.to_string(), timeout_secs: DEFAULT_API_TIMEOUT_SECS }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_API_TIMEOUT_SECS
}

/// Where the credential pair is persisted between runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialBackend {
    #[default]
    File,
    Keychain,
}

impl_domain_status_conversions!(CredentialBackend {
    File => "file",
    Keychain => "keychain",
});

/// Session and credential storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub credential_backend: CredentialBackend,
    /// File backend location; relative paths resolve against the working
    /// directory.
    #[serde(default = "default_credential_path")]
    pub credential_path: String,
    #[serde(default = "default_keychain_service")]
    pub keychain_service: String,
    #[serde(default = "default_keychain_account")]
    pub keychain_account: String,
    /// Upper bound on a single refresh call. `None` waits indefinitely.
    #[serde(default)]
    pub refresh_timeout_secs: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            credential_backend: CredentialBackend::File,
            credential_path: default_credential_path(),
            keychain_service: default_keychain_service(),
            keychain_account: default_keychain_account(),
            refresh_timeout_secs: None,
        }
    }
}

fn default_credential_path() -> String {
    DEFAULT_CREDENTIAL_FILE.to_string()
}

fn default_keychain_service() -> String {
    DEFAULT_KEYCHAIN_SERVICE.to_string()
}

fn default_keychain_account() -> String {
    DEFAULT_KEYCHAIN_ACCOUNT.to_string()
}

/// Logging output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), json: false }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
