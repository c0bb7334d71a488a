//! Session credential infrastructure
//!
//! Owns the access/refresh credential pair for one signed-in session and
//! coordinates token refresh across concurrent requests.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │ SessionTokenCoordinator  │  state machine + wait-list
//! └────────────┬─────────────┘
//!              │
//!              ├──► RefreshClient     (remote refresh endpoint)
//!              └──► CredentialStore   (file, keychain, memory)
//! ```
//!
//! # Usage Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use convene_common::auth::{Authorized, SessionError, SessionTokenCoordinator};
//! # use convene_common::auth::{CredentialStore, RefreshClient};
//!
//! # async fn example<C: RefreshClient + 'static, S: CredentialStore + 'static>(client: C, store: Arc<S>)
//! #     -> Result<(), SessionError> {
//! let session = SessionTokenCoordinator::new(client, store);
//! session.initialize().await?;
//!
//! let body: String = session
//!     .authorized(|token| async move {
//!         // send the request with `token`; report a 401 as `Rejected`
//!         Ok::<_, SessionError>(Authorized::Completed(format!("sent with {token}")))
//!     })
//!     .await?;
//! # let _ = body;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - **[`types`]**: [`CredentialPair`]
//! - **[`traits`]**: [`CredentialStore`], [`RefreshClient`]
//! - **[`coordinator`]**: [`SessionTokenCoordinator`] and its error/outcome
//!   types

pub mod coordinator;
pub mod traits;
pub mod types;

pub use coordinator::{
    Authorized, RequestAttempt, SessionError, SessionState, SessionTokenCoordinator,
};
pub use traits::{CredentialStore, RefreshClient, RefreshError};
pub use types::CredentialPair;
