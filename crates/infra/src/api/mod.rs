//! Remote API client for Convene
//!
//! HTTP adapters for the scheduling backend: authentication, meetings and
//! users.
//!
//! # Architecture
//!
//! - Uses `HttpClient` (no direct reqwest construction)
//! - Bearer authentication through the session coordinator
//! - Single refresh-and-retry on 401, no other retries
//! - Every body wrapped in an `ApiEnvelope`

pub mod auth;
pub mod client;
pub mod envelope;
pub mod errors;
pub mod meetings;
pub mod users;

pub use auth::{AuthApi, AuthPayload, HttpRefreshClient, LoginRequest, RegisterRequest};
pub use client::{ApiClient, Session};
pub use envelope::ApiEnvelope;
pub use errors::{ApiError, ApiErrorCategory};
pub use meetings::RemoteMeetingRepository;
pub use users::UsersApi;
