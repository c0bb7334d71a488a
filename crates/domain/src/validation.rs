//! Candidate meeting validation
//!
//! Runs before any conflict check. A candidate that fails here is reported
//! as `ConveneError::Validation` and never reaches the checker.

use crate::constants::MAX_MEETING_TITLE_LENGTH;
use crate::errors::{ConveneError, Result};
use crate::types::Meeting;

/// Validate a meeting about to be created or updated.
///
/// The interval invariant (`start < end`) is enforced by
/// [`TimeInterval`](crate::types::TimeInterval) itself.
///
/// # Errors
/// Returns `ConveneError::Validation` describing the first violated rule.
pub fn validate_candidate(candidate: &Meeting) -> Result<()> {
    if candidate.id.trim().is_empty() {
        return Err(ConveneError::Validation("meeting id must not be empty".into()));
    }

    let title = candidate.title.trim();
    if title.is_empty() {
        return Err(ConveneError::Validation("meeting title is required".into()));
    }
    if title.chars().count() > MAX_MEETING_TITLE_LENGTH {
        return Err(ConveneError::Validation(format!(
            "meeting title exceeds {MAX_MEETING_TITLE_LENGTH} characters"
        )));
    }

    if candidate.participant_ids.is_empty() {
        return Err(ConveneError::Validation("meeting needs at least one participant".into()));
    }
    if candidate.participant_ids.iter().any(|id| id.trim().is_empty()) {
        return Err(ConveneError::Validation("participant ids must not be blank".into()));
    }

    Ok(())
}
