//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::MeetingId;

/// Main error type for Convene
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum ConveneError {
    /// Malformed candidate (bad interval, no participants). Never retried.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The candidate overlaps existing scheduled meetings.
    #[error("Scheduling conflict with meetings: {}", .0.join(", "))]
    Conflict(Vec<MeetingId>),

    /// Session is unusable; the user has to sign in again.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// The caller's role does not permit the operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Network or server failure unrelated to authorization.
    #[error("Transient request error: {0}")]
    Transient(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Lifecycle violation, e.g. rescheduling a cancelled meeting.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConveneError {
    /// Stable label for logs and CLI exit reporting.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Conflict(_) => "conflict",
            Self::Authentication(_) => "authentication",
            Self::Forbidden(_) => "forbidden",
            Self::Transient(_) => "transient",
            Self::NotFound(_) => "not_found",
            Self::InvalidState(_) => "invalid_state",
            Self::Config(_) => "config",
            Self::Storage(_) => "storage",
            Self::Internal(_) => "internal",
        }
    }

    /// Meeting ids carried by a conflict error, empty otherwise.
    pub fn conflicting_meeting_ids(&self) -> &[MeetingId] {
        match self {
            Self::Conflict(ids) => ids,
            _ => &[],
        }
    }
}

/// Result type alias for Convene operations
pub type Result<T> = std::result::Result<T, ConveneError>;
