//! Rendering of command results

use std::fmt::Write as _;

use convene_domain::{ConflictResult, Meeting, User};
use serde::Serialize;

/// Result of one command, printable as text or JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Meeting(Meeting),
    Meetings(Vec<Meeting>),
    User(User),
    Users(Vec<User>),
    Check(ConflictResult),
    Done { message: String },
}

impl Outcome {
    pub fn done(message: impl Into<String>) -> Self {
        Self::Done { message: message.into() }
    }

    /// # Errors
    /// Fails only if JSON serialization fails.
    pub fn render(&self, json: bool) -> Result<String, serde_json::Error> {
        if json {
            serde_json::to_string_pretty(self)
        } else {
            Ok(self.text())
        }
    }

    fn text(&self) -> String {
        match self {
            Self::Meeting(meeting) => meeting_details(meeting),
            Self::Meetings(meetings) if meetings.is_empty() => "No meetings.".to_string(),
            Self::Meetings(meetings) => {
                meetings.iter().map(meeting_line).collect::<Vec<_>>().join("\n")
            }
            Self::User(user) => user_line(user),
            Self::Users(users) if users.is_empty() => "No users.".to_string(),
            Self::Users(users) => users.iter().map(user_line).collect::<Vec<_>>().join("\n"),
            Self::Check(ConflictResult::Clear) => "No conflicts.".to_string(),
            Self::Check(ConflictResult::Conflicts(ids)) => {
                format!("Conflicts with: {}", ids.join(", "))
            }
            Self::Done { message } => message.clone(),
        }
    }
}

fn slot(meeting: &Meeting) -> String {
    format!(
        "{} -> {}",
        meeting.interval.start().format("%Y-%m-%d %H:%M"),
        meeting.interval.end().format("%H:%M %Z")
    )
}

fn meeting_line(meeting: &Meeting) -> String {
    format!("{}  {}  [{}]  {}", meeting.id, slot(meeting), meeting.status, meeting.title)
}

fn meeting_details(meeting: &Meeting) -> String {
    let mut out = meeting_line(meeting);
    if let Some(description) = &meeting.description {
        let _ = write!(out, "\n  {description}");
    }
    let _ = write!(out, "\n  organizer: {}", meeting.organizer_id);
    let participants = meeting.participant_ids.iter().cloned().collect::<Vec<_>>().join(", ");
    let _ = write!(out, "\n  participants: {participants}");
    out
}

fn user_line(user: &User) -> String {
    format!("{}  {} <{}>  ({})", user.id, user.name, user.email, user.role)
}
