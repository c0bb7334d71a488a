//! Traits for credential storage and refresh
//!
//! These traits enable dependency injection and testing by abstracting
//! external dependencies (the auth endpoint, the storage medium).

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::types::CredentialPair;

/// Failure of a single refresh call. Every variant is terminal for the
/// session; the coordinator never retries a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    /// The server refused the refresh credential (expired, revoked, unknown)
    #[error("refresh credential rejected: {0}")]
    Rejected(String),

    /// The refresh request did not complete (network, 5xx, bad payload)
    #[error("refresh request failed: {0}")]
    Transport(String),

    /// The configured refresh timeout elapsed
    #[error("refresh timed out after {0:?}")]
    Timeout(Duration),
}

/// Remote authentication endpoint that exchanges a refresh credential for a
/// new credential pair.
#[async_trait]
pub trait RefreshClient: Send + Sync {
    /// Exchange `refresh_token` for a new pair.
    ///
    /// # Errors
    /// Returns [`RefreshError`] if the call fails for any reason.
    async fn refresh(&self, refresh_token: &str) -> Result<CredentialPair, RefreshError>;
}

/// Persistence for the credential pair across process restarts.
///
/// The coordinator reads and writes through this trait but does not define
/// the storage medium.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persist the pair, replacing whatever was stored.
    ///
    /// # Errors
    /// Returns error if storage fails
    async fn save(&self, credentials: &CredentialPair) -> Result<(), String>;

    /// Load the stored pair, `None` if nothing is stored.
    ///
    /// # Errors
    /// Returns error if the medium is unreadable or corrupt
    async fn load(&self) -> Result<Option<CredentialPair>, String>;

    /// Remove the stored pair. Idempotent.
    ///
    /// # Errors
    /// Returns error if deletion fails
    async fn clear(&self) -> Result<(), String>;
}
