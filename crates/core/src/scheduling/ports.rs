//! Port interfaces for meeting persistence
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use std::collections::BTreeSet;

use async_trait::async_trait;
use convene_domain::{Meeting, MeetingDraft, Result, UserId};

use super::conflict::ScheduleByParticipant;

/// Trait for reading and writing meetings
#[async_trait]
pub trait MeetingRepository: Send + Sync {
    /// Every meeting visible to the current session
    async fn list_meetings(&self) -> Result<Vec<Meeting>>;

    /// Fetch one meeting; `ConveneError::NotFound` if it does not exist
    async fn get_meeting(&self, id: &str) -> Result<Meeting>;

    /// Current scheduled meetings of each requested participant.
    ///
    /// Participants without meetings may be absent from the map.
    async fn participant_schedules(
        &self,
        participant_ids: &BTreeSet<UserId>,
    ) -> Result<ScheduleByParticipant>;

    /// Persist a new meeting; the backing store assigns its id
    async fn create_meeting(&self, draft: &MeetingDraft) -> Result<Meeting>;

    /// Replace a stored meeting
    async fn update_meeting(&self, meeting: &Meeting) -> Result<Meeting>;

    /// Remove a meeting permanently
    async fn delete_meeting(&self, id: &str) -> Result<()>;
}
