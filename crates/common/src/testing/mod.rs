//! Testing utilities and helpers
//!
//! - **[`async_utils`]**: polling and timeout helpers for async tests
//! - **[`mocks`]**: in-memory [`CredentialStore`](crate::auth::CredentialStore)
//!   and scriptable [`RefreshClient`](crate::auth::RefreshClient)
//!
//! Enabled for downstream crates with the `test-utils` feature.

pub mod async_utils;
pub mod mocks;

pub use async_utils::{poll_until, timeout_ok};
pub use mocks::{MockCredentialStore, MockRefreshClient};
