//! API-specific error types
//!
//! Classifies remote failures by HTTP status and envelope content, and maps
//! them onto the domain error at the port boundary.

use convene_common::auth::SessionError;
use convene_domain::{ConveneError, MeetingId};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use super::envelope::ApiEnvelope;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Credentials missing or rejected (401, failed refresh)
    Authentication,
    /// Role does not permit the operation (403)
    Permission,
    /// Request content refused by the server (400, 404, 409, 422, envelope)
    Client,
    /// Server errors (5xx)
    Server,
    /// Network/connection errors
    Network,
    /// Local setup problems (config, credential storage, bad payloads)
    Local,
}

/// API operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Scheduling conflict: {message}")]
    Conflict { message: String, meeting_ids: Vec<MeetingId> },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// `{"success": false}` with a success status
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Credential storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConflictDetail {
    #[serde(default)]
    conflicting_meeting_ids: Vec<MeetingId>,
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::Forbidden(_) => ApiErrorCategory::Permission,
            Self::NotFound(_)
            | Self::Conflict { .. }
            | Self::Validation(_)
            | Self::Rejected(_)
            | Self::Client(_) => ApiErrorCategory::Client,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::Network(_) => ApiErrorCategory::Network,
            Self::Decode(_) | Self::Config(_) | Self::Storage(_) => ApiErrorCategory::Local,
        }
    }

    /// Classify a non-success response.
    ///
    /// The envelope `message` is preferred over the raw body. A 409 carries
    /// the conflicting meeting ids in `data.conflictingMeetingIds` when the
    /// server provides them.
    pub fn from_status(status: StatusCode, url: &str, body: &str) -> Self {
        let envelope = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body).ok();
        let server_message = envelope.as_ref().and_then(|e| e.message.clone());
        let message = match server_message {
            Some(text) => format!("{text} ({url} returned {status})"),
            None if body.trim().is_empty() => format!("{url} returned status {status}"),
            None => format!("{url} returned status {status}: {}", body.trim()),
        };

        match status {
            StatusCode::UNAUTHORIZED => Self::Auth(message),
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::CONFLICT => {
                let meeting_ids = envelope
                    .and_then(|e| e.data)
                    .and_then(|data| serde_json::from_value::<ConflictDetail>(data).ok())
                    .unwrap_or_default()
                    .conflicting_meeting_ids;
                Self::Conflict { message, meeting_ids }
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Self::Validation(message),
            s if s.is_server_error() => Self::Server(message),
            s if s.is_client_error() => Self::Client(message),
            _ => Self::Decode(message),
        }
    }
}

impl From<ConveneError> for ApiError {
    fn from(err: ConveneError) -> Self {
        match err {
            ConveneError::Transient(message) => Self::Network(message),
            ConveneError::Authentication(message) => Self::Auth(message),
            ConveneError::Forbidden(message) => Self::Forbidden(message),
            ConveneError::NotFound(message) => Self::NotFound(message),
            ConveneError::Validation(message) => Self::Validation(message),
            ConveneError::Config(message) => Self::Config(message),
            ConveneError::Storage(message) => Self::Storage(message),
            ConveneError::Conflict(meeting_ids) => {
                Self::Conflict { message: "scheduling conflict".into(), meeting_ids }
            }
            ConveneError::InvalidState(message) | ConveneError::Internal(message) => {
                Self::Client(message)
            }
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Authentication(message) => Self::Auth(message),
            SessionError::Storage(message) => Self::Storage(message),
        }
    }
}

/// Convert at the port boundary
impl From<ApiError> for ConveneError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Auth(message) => Self::Authentication(message),
            ApiError::Forbidden(message) => Self::Forbidden(message),
            ApiError::NotFound(message) => Self::NotFound(message),
            ApiError::Conflict { meeting_ids, .. } => Self::Conflict(meeting_ids),
            ApiError::Validation(message) | ApiError::Rejected(message) => {
                Self::Validation(message)
            }
            ApiError::Server(message) | ApiError::Network(message) => Self::Transient(message),
            ApiError::Config(message) => Self::Config(message),
            ApiError::Storage(message) => Self::Storage(message),
            ApiError::Client(message) | ApiError::Decode(message) => Self::Internal(message),
        }
    }
}
