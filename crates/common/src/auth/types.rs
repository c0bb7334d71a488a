//! Credential types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Access and refresh credentials owned by one session.
///
/// Both tokens are opaque. The pair is always replaced as a whole: a refresh
/// never leaves a new access token next to a stale refresh token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialPair {
    /// Short-lived bearer token attached to API requests
    pub access_token: String,

    /// Longer-lived token used only to obtain a new pair
    pub refresh_token: String,
}

impl CredentialPair {
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), refresh_token: refresh_token.into() }
    }

    /// Whether a refresh can be attempted with this pair.
    #[must_use]
    pub fn has_refresh_token(&self) -> bool {
        !self.refresh_token.trim().is_empty()
    }
}

// Tokens must not reach logs through `{:?}`.
impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}
