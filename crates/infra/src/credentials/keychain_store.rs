//! OS keychain credential store
//!
//! Stores the pair as one JSON secret under `service`/`account`. Keychain
//! calls block, so they run on the blocking pool.

use async_trait::async_trait;
use convene_common::auth::{CredentialPair, CredentialStore};
use convene_domain::ConveneError;
use keyring::Entry;
use tracing::debug;

use crate::errors::InfraError;

#[derive(Debug, Clone)]
pub struct KeychainCredentialStore {
    service: String,
    account: String,
}

impl KeychainCredentialStore {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self { service: service.into(), account: account.into() }
    }

    async fn with_entry<T, F>(&self, op: F) -> Result<T, String>
    where
        T: Send + 'static,
        F: FnOnce(Entry) -> Result<T, InfraError> + Send + 'static,
    {
        let service = self.service.clone();
        let account = self.account.clone();

        tokio::task::spawn_blocking(move || {
            let entry = Entry::new(&service, &account).map_err(InfraError::from)?;
            op(entry)
        })
        .await
        .map_err(|e| format!("keychain task failed: {e}"))?
        .map_err(|e| ConveneError::from(e).to_string())
    }
}

#[async_trait]
impl CredentialStore for KeychainCredentialStore {
    async fn save(&self, credentials: &CredentialPair) -> Result<(), String> {
        let secret = serde_json::to_string(credentials)
            .map_err(|e| ConveneError::from(InfraError::from(e)).to_string())?;

        self.with_entry(move |entry| Ok(entry.set_password(&secret)?)).await?;
        debug!(service = %self.service, account = %self.account, "credentials saved to keychain");
        Ok(())
    }

    async fn load(&self) -> Result<Option<CredentialPair>, String> {
        self.with_entry(|entry| match entry.get_password() {
            Ok(secret) => Ok(Some(serde_json::from_str(&secret)?)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        })
        .await
    }

    async fn clear(&self) -> Result<(), String> {
        self.with_entry(|entry| match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        })
        .await?;
        debug!(service = %self.service, account = %self.account, "keychain credentials removed");
        Ok(())
    }
}
