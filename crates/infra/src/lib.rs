//! # Convene Infrastructure
//!
//! Infrastructure implementations of core ports and session collaborators.
//!
//! This crate contains:
//! - HTTP client and the remote API adapters (auth, meetings, users)
//! - Credential stores (JSON file, OS keychain)
//! - Configuration loading from environment and files
//!
//! ## Architecture
//! - Implements traits defined in `convene-core` and `convene-common`
//! - Contains all "impure" code (network, filesystem, keychain)

pub mod api;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{
    ApiClient, ApiEnvelope, ApiError, AuthApi, HttpRefreshClient, RemoteMeetingRepository,
    Session, UsersApi,
};
pub use credentials::{build_credential_store, FileCredentialStore, KeychainCredentialStore};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
