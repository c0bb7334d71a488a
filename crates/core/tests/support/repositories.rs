//! In-memory `MeetingRepository` for service tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use convene_core::{MeetingRepository, ScheduleByParticipant};
use convene_domain::{ConveneError, Meeting, MeetingDraft, Result, UserId};
use parking_lot::Mutex;

/// Stores meetings in a map and counts writes.
#[derive(Default, Clone)]
pub struct InMemoryMeetingRepository {
    meetings: Arc<Mutex<BTreeMap<String, Meeting>>>,
    writes: Arc<Mutex<usize>>,
    next_id: Arc<Mutex<u32>>,
}

impl InMemoryMeetingRepository {
    pub fn new(meetings: Vec<Meeting>) -> Self {
        let repo = Self::default();
        {
            let mut stored = repo.meetings.lock();
            for meeting in meetings {
                stored.insert(meeting.id.clone(), meeting);
            }
        }
        repo
    }

    pub fn stored(&self, id: &str) -> Option<Meeting> {
        self.meetings.lock().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.meetings.lock().len()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock()
    }
}

#[async_trait]
impl MeetingRepository for InMemoryMeetingRepository {
    async fn list_meetings(&self) -> Result<Vec<Meeting>> {
        Ok(self.meetings.lock().values().cloned().collect())
    }

    async fn get_meeting(&self, id: &str) -> Result<Meeting> {
        self.stored(id).ok_or_else(|| ConveneError::NotFound(format!("meeting {id}")))
    }

    async fn participant_schedules(
        &self,
        participant_ids: &BTreeSet<UserId>,
    ) -> Result<ScheduleByParticipant> {
        let meetings = self.meetings.lock();
        Ok(participant_ids
            .iter()
            .map(|participant| {
                let scheduled = meetings
                    .values()
                    .filter(|m| m.is_scheduled() && m.participant_ids.contains(participant))
                    .cloned()
                    .collect();
                (participant.clone(), scheduled)
            })
            .collect())
    }

    async fn create_meeting(&self, draft: &MeetingDraft) -> Result<Meeting> {
        let id = {
            let mut next = self.next_id.lock();
            *next += 1;
            format!("m-{}", *next)
        };
        let meeting = draft.clone().into_meeting(id.clone(), "org-1".into());
        self.meetings.lock().insert(id, meeting.clone());
        *self.writes.lock() += 1;
        Ok(meeting)
    }

    async fn update_meeting(&self, meeting: &Meeting) -> Result<Meeting> {
        let mut meetings = self.meetings.lock();
        if !meetings.contains_key(&meeting.id) {
            return Err(ConveneError::NotFound(format!("meeting {}", meeting.id)));
        }
        meetings.insert(meeting.id.clone(), meeting.clone());
        *self.writes.lock() += 1;
        Ok(meeting.clone())
    }

    async fn delete_meeting(&self, id: &str) -> Result<()> {
        self.meetings
            .lock()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ConveneError::NotFound(format!("meeting {id}")))
    }
}
