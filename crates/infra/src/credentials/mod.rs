//! Credential stores
//!
//! Persistence for the session's credential pair. The backend is chosen by
//! `SessionConfig::credential_backend`.

pub mod file_store;
pub mod keychain_store;

use std::sync::Arc;

use convene_common::auth::CredentialStore;
use convene_domain::{CredentialBackend, SessionConfig};

pub use file_store::FileCredentialStore;
pub use keychain_store::KeychainCredentialStore;

/// Build the store selected by configuration.
pub fn build_credential_store(config: &SessionConfig) -> Arc<dyn CredentialStore> {
    match config.credential_backend {
        CredentialBackend::File => Arc::new(FileCredentialStore::new(&config.credential_path)),
        CredentialBackend::Keychain => Arc::new(KeychainCredentialStore::new(
            &config.keychain_service,
            &config.keychain_account,
        )),
    }
}
