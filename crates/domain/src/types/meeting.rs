//! Meeting types and lifecycle rules
//!
//! A meeting is created `SCHEDULED`, may be edited only while it stays
//! `SCHEDULED`, and leaves that state exactly once (cancelled by an organizer
//! or completed by the backend).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::interval::TimeInterval;
use super::{MeetingId, UserId};
use crate::errors::{ConveneError, Result};
use crate::impl_domain_status_conversions;

/// Meeting lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingStatus {
    #[default]
    Scheduled,
    Cancelled,
    Completed,
}

impl_domain_status_conversions!(MeetingStatus {
    Scheduled => "scheduled",
    Cancelled => "cancelled",
    Completed => "completed",
});

/// A meeting as known to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: MeetingId,
    pub organizer_id: UserId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub participant_ids: BTreeSet<UserId>,
    #[serde(flatten)]
    pub interval: TimeInterval,
    #[serde(default)]
    pub status: MeetingStatus,
}

impl Meeting {
    /// Only scheduled meetings take part in conflict checks.
    pub fn is_scheduled(&self) -> bool {
        self.status == MeetingStatus::Scheduled
    }

    /// Whether `user_id` organizes or attends this meeting.
    pub fn involves(&self, user_id: &str) -> bool {
        self.organizer_id == user_id || self.participant_ids.contains(user_id)
    }

    pub fn overlaps(&self, other: &Meeting) -> bool {
        self.interval.overlaps(&other.interval)
    }

    /// # Errors
    /// Returns `ConveneError::InvalidState` unless the meeting is scheduled.
    pub fn ensure_mutable(&self) -> Result<()> {
        if self.is_scheduled() {
            Ok(())
        } else {
            Err(ConveneError::InvalidState(format!(
                "meeting {} is {} and can no longer be changed",
                self.id, self.status
            )))
        }
    }

    /// One-way transition to `CANCELLED`.
    ///
    /// # Errors
    /// Returns `ConveneError::InvalidState` unless the meeting is scheduled.
    pub fn cancel(&mut self) -> Result<()> {
        self.ensure_mutable()?;
        self.status = MeetingStatus::Cancelled;
        Ok(())
    }

    /// Move the meeting to a new interval.
    ///
    /// # Errors
    /// Returns `ConveneError::InvalidState` unless the meeting is scheduled.
    pub fn reschedule(&mut self, interval: TimeInterval) -> Result<()> {
        self.ensure_mutable()?;
        self.interval = interval;
        Ok(())
    }

    /// Assign a participant. Returns `false` if already assigned.
    ///
    /// # Errors
    /// Returns `ConveneError::InvalidState` unless the meeting is scheduled.
    pub fn add_participant(&mut self, user_id: impl Into<UserId>) -> Result<bool> {
        self.ensure_mutable()?;
        Ok(self.participant_ids.insert(user_id.into()))
    }

    /// Unassign a participant. Returns `false` if not assigned.
    ///
    /// # Errors
    /// Returns `ConveneError::InvalidState` unless the meeting is scheduled.
    pub fn remove_participant(&mut self, user_id: &str) -> Result<bool> {
        self.ensure_mutable()?;
        Ok(self.participant_ids.remove(user_id))
    }

    /// Apply a partial update, respecting the lifecycle rules.
    ///
    /// # Errors
    /// Returns `ConveneError::InvalidState` unless the meeting is scheduled.
    pub fn apply(&mut self, changes: MeetingChanges) -> Result<()> {
        self.ensure_mutable()?;
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        if let Some(interval) = changes.interval {
            self.interval = interval;
        }
        if let Some(participant_ids) = changes.participant_ids {
            self.participant_ids = participant_ids;
        }
        Ok(())
    }
}

/// Input for creating a meeting; id and status are assigned on commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub participant_ids: BTreeSet<UserId>,
    #[serde(flatten)]
    pub interval: TimeInterval,
}

impl MeetingDraft {
    /// Materialize the draft as a scheduled meeting with the given identity.
    pub fn into_meeting(self, id: MeetingId, organizer_id: UserId) -> Meeting {
        Meeting {
            id,
            organizer_id,
            title: self.title,
            description: self.description,
            participant_ids: self.participant_ids,
            interval: self.interval,
            status: MeetingStatus::Scheduled,
        }
    }
}

/// Partial update for an existing meeting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub interval: Option<TimeInterval>,
    pub participant_ids: Option<BTreeSet<UserId>>,
}

impl MeetingChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.interval.is_none()
            && self.participant_ids.is_none()
    }
}
