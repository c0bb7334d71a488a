//! Shared session infrastructure for Convene crates.
//!
//! # Modules
//!
//! - [`auth`]: credential pair, storage/refresh ports and the
//!   [`SessionTokenCoordinator`](auth::SessionTokenCoordinator)
//! - [`testing`]: mocks and async helpers (enabled with `test-utils`)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use auth::{
    Authorized, CredentialPair, CredentialStore, RefreshClient, RefreshError, RequestAttempt,
    SessionError, SessionState, SessionTokenCoordinator,
};
