//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// API defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

// Credential storage
pub const DEFAULT_CREDENTIAL_FILE: &str = "convene-credentials.json";
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "Convene";
pub const DEFAULT_KEYCHAIN_ACCOUNT: &str = "main";

// Logging
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Meeting form limits
pub const MAX_MEETING_TITLE_LENGTH: usize = 200;
