//! Meeting endpoints as a `MeetingRepository`

use std::collections::BTreeSet;

use async_trait::async_trait;
use convene_core::{MeetingRepository, ScheduleByParticipant};
use convene_domain::{ConveneError, Meeting, MeetingDraft, Result, UserId};
use tracing::{debug, instrument};
use urlencoding::encode;

use super::client::ApiClient;

/// Remote meeting store behind the authenticated API
#[derive(Clone)]
pub struct RemoteMeetingRepository {
    client: ApiClient,
}

impl RemoteMeetingRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

fn meeting_path(id: &str) -> String {
    format!("/meetings/{}", encode(id))
}

fn schedules_path(participant_ids: &BTreeSet<UserId>) -> String {
    let joined = participant_ids.iter().map(|id| encode(id).into_owned()).collect::<Vec<_>>().join(",");
    format!("/meetings/scheduled?participants={joined}")
}

#[async_trait]
impl MeetingRepository for RemoteMeetingRepository {
    #[instrument(skip(self))]
    async fn list_meetings(&self) -> Result<Vec<Meeting>> {
        let meetings: Vec<Meeting> = self.client.get("/meetings").await?;
        debug!(count = meetings.len(), "meetings listed");
        Ok(meetings)
    }

    #[instrument(skip(self))]
    async fn get_meeting(&self, id: &str) -> Result<Meeting> {
        Ok(self.client.get(&meeting_path(id)).await?)
    }

    #[instrument(skip(self), fields(participants = participant_ids.len()))]
    async fn participant_schedules(
        &self,
        participant_ids: &BTreeSet<UserId>,
    ) -> Result<ScheduleByParticipant> {
        if participant_ids.is_empty() {
            return Ok(ScheduleByParticipant::new());
        }

        let schedules: ScheduleByParticipant =
            self.client.get(&schedules_path(participant_ids)).await?;
        Ok(schedules)
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    async fn create_meeting(&self, draft: &MeetingDraft) -> Result<Meeting> {
        let created: Meeting = self.client.post("/meetings", draft).await?;
        debug!(meeting_id = %created.id, "meeting created");
        Ok(created)
    }

    #[instrument(skip(self, meeting), fields(meeting_id = %meeting.id))]
    async fn update_meeting(&self, meeting: &Meeting) -> Result<Meeting> {
        Ok(self.client.put(&meeting_path(&meeting.id), meeting).await?)
    }

    #[instrument(skip(self))]
    async fn delete_meeting(&self, id: &str) -> Result<()> {
        self.client.delete(&meeting_path(id)).await.map_err(ConveneError::from)
    }
}
