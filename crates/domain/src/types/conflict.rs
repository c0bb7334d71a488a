//! Conflict check outcome

use serde::{Deserialize, Serialize};

use super::MeetingId;
use crate::errors::{ConveneError, Result};

/// Outcome of checking a candidate meeting against existing schedules.
///
/// Serializes as `{"ok": true}` or
/// `{"ok": false, "conflictingMeetingIds": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ConflictReport", from = "ConflictReport")]
pub enum ConflictResult {
    Clear,
    /// Every overlapping meeting, ordered by participant then start time.
    Conflicts(Vec<MeetingId>),
}

impl ConflictResult {
    pub fn from_ids(ids: Vec<MeetingId>) -> Self {
        if ids.is_empty() {
            Self::Clear
        } else {
            Self::Conflicts(ids)
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Clear)
    }

    pub fn conflicting_meeting_ids(&self) -> &[MeetingId] {
        match self {
            Self::Clear => &[],
            Self::Conflicts(ids) => ids,
        }
    }

    /// Turn a negative result into the write-rejecting error.
    ///
    /// # Errors
    /// Returns `ConveneError::Conflict` carrying all conflicting ids.
    pub fn into_result(self) -> Result<()> {
        match self {
            Self::Clear => Ok(()),
            Self::Conflicts(ids) => Err(ConveneError::Conflict(ids)),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConflictReport {
    ok: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    conflicting_meeting_ids: Vec<MeetingId>,
}

impl From<ConflictResult> for ConflictReport {
    fn from(result: ConflictResult) -> Self {
        match result {
            ConflictResult::Clear => Self { ok: true, conflicting_meeting_ids: Vec::new() },
            ConflictResult::Conflicts(ids) => Self { ok: false, conflicting_meeting_ids: ids },
        }
    }
}

impl From<ConflictReport> for ConflictResult {
    fn from(report: ConflictReport) -> Self {
        if report.ok {
            Self::Clear
        } else {
            Self::Conflicts(report.conflicting_meeting_ids)
        }
    }
}
