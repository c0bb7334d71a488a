//! Interval-overlap conflict detection
//!
//! A candidate meeting conflicts with an existing meeting when both are
//! scheduled, they share a participant and their half-open intervals
//! overlap:
//!
//! ```text
//! overlap(a, b) := a.start < b.end && b.start < a.end
//! ```
//!
//! Back-to-back meetings (`a.end == b.start`) never conflict. The checker
//! performs no I/O; callers fetch the participants' schedules first.

use std::collections::{HashMap, HashSet};

use convene_domain::{validate_candidate, ConflictResult, Meeting, MeetingId, Result, UserId};

/// Existing meetings keyed by participant id
pub type ScheduleByParticipant = HashMap<UserId, Vec<Meeting>>;

/// Decides whether a candidate meeting may be committed.
///
/// Implementors only provide [`find_conflicts`](Self::find_conflicts);
/// validation and result shaping are shared so alternative index structures
/// keep the same contract.
pub trait ConflictChecker: Send + Sync {
    /// Ids of existing scheduled meetings overlapping `candidate`.
    ///
    /// `candidate` has already been validated. The returned ids must be
    /// unique, ordered by participant id, then start time, then meeting id,
    /// and must not include `candidate.id`.
    fn find_conflicts(&self, candidate: &Meeting, existing: &ScheduleByParticipant)
        -> Vec<MeetingId>;

    /// Validate `candidate` and check it against `existing`.
    ///
    /// # Errors
    /// Returns `ConveneError::Validation` if the candidate is malformed; a
    /// malformed candidate never produces a conflict result.
    fn check_conflict(
        &self,
        candidate: &Meeting,
        existing: &ScheduleByParticipant,
    ) -> Result<ConflictResult> {
        validate_candidate(candidate)?;
        Ok(ConflictResult::from_ids(self.find_conflicts(candidate, existing)))
    }
}

/// Linear scan over each participant's meetings. O(P × M).
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearConflictChecker;

impl ConflictChecker for LinearConflictChecker {
    fn find_conflicts(
        &self,
        candidate: &Meeting,
        existing: &ScheduleByParticipant,
    ) -> Vec<MeetingId> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut conflicts = Vec::new();

        // BTreeSet iteration gives participant id order.
        for participant_id in &candidate.participant_ids {
            let Some(meetings) = existing.get(participant_id) else {
                continue;
            };

            let mut hits: Vec<&Meeting> = meetings
                .iter()
                .filter(|meeting| meeting.is_scheduled())
                .filter(|meeting| meeting.id != candidate.id)
                .filter(|meeting| meeting.overlaps(candidate))
                .collect();
            hits.sort_by(|a, b| {
                a.interval.start().cmp(&b.interval.start()).then_with(|| a.id.cmp(&b.id))
            });

            for meeting in hits {
                if seen.insert(meeting.id.as_str()) {
                    conflicts.push(meeting.id.clone());
                }
            }
        }

        conflicts
    }
}
