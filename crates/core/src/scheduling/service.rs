//! Scheduling service - core business logic
//!
//! Every meeting write passes through here: the role gate first, then the
//! lifecycle rules, then the conflict checker. Only a write that clears all
//! three reaches the repository.

use std::sync::Arc;

use convene_domain::{
    validate_candidate, ConflictResult, ConveneError, Meeting, MeetingChanges, MeetingDraft,
    Result, User,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::conflict::{ConflictChecker, LinearConflictChecker};
use super::ports::MeetingRepository;

/// Meeting scheduling service
pub struct SchedulingService {
    repository: Arc<dyn MeetingRepository>,
    checker: Arc<dyn ConflictChecker>,
}

impl SchedulingService {
    /// Create a service using the linear conflict checker
    pub fn new(repository: Arc<dyn MeetingRepository>) -> Self {
        Self { repository, checker: Arc::new(LinearConflictChecker) }
    }

    /// Substitute the conflict checker implementation
    pub fn with_checker(mut self, checker: Arc<dyn ConflictChecker>) -> Self {
        self.checker = checker;
        self
    }

    fn ensure_organizer(actor: &User, action: &str) -> Result<()> {
        if actor.role.can_manage_meetings() {
            Ok(())
        } else {
            warn!(user_id = %actor.id, role = %actor.role, action, "role gate rejected write");
            Err(ConveneError::Forbidden(format!("only organizers may {action}")))
        }
    }

    /// Dry-run the conflict check for `candidate` against its participants'
    /// current schedules. Only a scheduled candidate can be checked.
    pub async fn check(&self, candidate: &Meeting) -> Result<ConflictResult> {
        candidate.ensure_mutable()?;
        validate_candidate(candidate)?;
        let schedules = self.repository.participant_schedules(&candidate.participant_ids).await?;
        let result = self.checker.check_conflict(candidate, &schedules)?;
        debug!(
            meeting_id = %candidate.id,
            participants = candidate.participant_ids.len(),
            conflicts = result.conflicting_meeting_ids().len(),
            "conflict check finished"
        );
        Ok(result)
    }

    /// Dry-run the check for a meeting that does not exist yet.
    pub async fn check_draft(&self, actor: &User, draft: &MeetingDraft) -> Result<ConflictResult> {
        self.check(&provisional_candidate(draft, &actor.id)).await
    }

    async fn ensure_no_conflicts(&self, candidate: &Meeting) -> Result<()> {
        let result = self.check(candidate).await?;
        if !result.is_ok() {
            info!(
                meeting_id = %candidate.id,
                conflicting = ?result.conflicting_meeting_ids(),
                "meeting write rejected by conflict check"
            );
        }
        result.into_result()
    }

    /// Create a meeting. The backing store assigns the final id.
    pub async fn create_meeting(&self, actor: &User, draft: MeetingDraft) -> Result<Meeting> {
        Self::ensure_organizer(actor, "create meetings")?;

        let candidate = provisional_candidate(&draft, &actor.id);
        self.ensure_no_conflicts(&candidate).await?;

        let created = self.repository.create_meeting(&draft).await?;
        info!(
            meeting_id = %created.id,
            participants = created.participant_ids.len(),
            "meeting created"
        );
        Ok(created)
    }

    /// Apply a partial update to a scheduled meeting.
    pub async fn update_meeting(
        &self,
        actor: &User,
        meeting_id: &str,
        changes: MeetingChanges,
    ) -> Result<Meeting> {
        Self::ensure_organizer(actor, "update meetings")?;
        if changes.is_empty() {
            return Err(ConveneError::Validation("no changes supplied".to_string()));
        }

        let mut meeting = self.repository.get_meeting(meeting_id).await?;
        meeting.apply(changes)?;
        self.ensure_no_conflicts(&meeting).await?;

        let updated = self.repository.update_meeting(&meeting).await?;
        info!(meeting_id = %updated.id, "meeting updated");
        Ok(updated)
    }

    /// Assign a participant. Assigning an existing participant is a no-op.
    pub async fn add_participant(
        &self,
        actor: &User,
        meeting_id: &str,
        participant_id: &str,
    ) -> Result<Meeting> {
        Self::ensure_organizer(actor, "assign participants")?;

        let mut meeting = self.repository.get_meeting(meeting_id).await?;
        if !meeting.add_participant(participant_id)? {
            debug!(meeting_id, participant_id, "participant already assigned");
            return Ok(meeting);
        }
        self.ensure_no_conflicts(&meeting).await?;

        let updated = self.repository.update_meeting(&meeting).await?;
        info!(meeting_id, participant_id, "participant assigned");
        Ok(updated)
    }

    /// Unassign a participant. The last participant cannot be removed.
    pub async fn remove_participant(
        &self,
        actor: &User,
        meeting_id: &str,
        participant_id: &str,
    ) -> Result<Meeting> {
        Self::ensure_organizer(actor, "unassign participants")?;

        let mut meeting = self.repository.get_meeting(meeting_id).await?;
        if !meeting.remove_participant(participant_id)? {
            debug!(meeting_id, participant_id, "participant was not assigned");
            return Ok(meeting);
        }
        validate_candidate(&meeting)?;

        let updated = self.repository.update_meeting(&meeting).await?;
        info!(meeting_id, participant_id, "participant unassigned");
        Ok(updated)
    }

    /// One-way transition to `CANCELLED`.
    pub async fn cancel_meeting(&self, actor: &User, meeting_id: &str) -> Result<Meeting> {
        Self::ensure_organizer(actor, "cancel meetings")?;

        let mut meeting = self.repository.get_meeting(meeting_id).await?;
        meeting.cancel()?;

        let updated = self.repository.update_meeting(&meeting).await?;
        info!(meeting_id, "meeting cancelled");
        Ok(updated)
    }

    /// Remove a meeting permanently.
    pub async fn delete_meeting(&self, actor: &User, meeting_id: &str) -> Result<()> {
        Self::ensure_organizer(actor, "delete meetings")?;
        self.repository.delete_meeting(meeting_id).await?;
        info!(meeting_id, "meeting deleted");
        Ok(())
    }

    /// Meetings visible to `actor`, ordered by start time.
    ///
    /// Organizers see every meeting; participants only the ones they are
    /// assigned to.
    pub async fn list_meetings(&self, actor: &User) -> Result<Vec<Meeting>> {
        let mut meetings = self.repository.list_meetings().await?;
        if !actor.is_organizer() {
            meetings.retain(|meeting| meeting.involves(&actor.id));
        }
        meetings.sort_by(|a, b| {
            a.interval.start().cmp(&b.interval.start()).then_with(|| a.id.cmp(&b.id))
        });
        Ok(meetings)
    }

    /// Fetch one meeting visible to `actor`.
    pub async fn get_meeting(&self, actor: &User, meeting_id: &str) -> Result<Meeting> {
        let meeting = self.repository.get_meeting(meeting_id).await?;
        if actor.is_organizer() || meeting.involves(&actor.id) {
            Ok(meeting)
        } else {
            Err(ConveneError::NotFound(format!("meeting {meeting_id}")))
        }
    }
}

// Provisional id so the candidate never matches a stored meeting.
fn provisional_candidate(draft: &MeetingDraft, organizer_id: &str) -> Meeting {
    draft.clone().into_meeting(format!("draft-{}", Uuid::now_v7()), organizer_id.to_string())
}
