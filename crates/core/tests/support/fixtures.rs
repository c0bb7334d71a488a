//! Users, intervals and meetings used across scheduling tests.

use chrono::{DateTime, TimeZone, Utc};
use convene_domain::{Meeting, MeetingDraft, MeetingStatus, Role, TimeInterval, User};

pub fn organizer() -> User {
    User {
        id: "org-1".into(),
        name: "Olivia Organizer".into(),
        email: "olivia@example.com".into(),
        role: Role::Organizer,
    }
}

pub fn participant(id: &str) -> User {
    User {
        id: id.into(),
        name: format!("Participant {id}"),
        email: format!("{id}@example.com"),
        role: Role::Participant,
    }
}

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, hour, minute, 0).unwrap()
}

pub fn interval(start: (u32, u32), end: (u32, u32)) -> TimeInterval {
    TimeInterval::new(at(start.0, start.1), at(end.0, end.1)).unwrap()
}

pub fn meeting(id: &str, participants: &[&str], start: (u32, u32), end: (u32, u32)) -> Meeting {
    Meeting {
        id: id.into(),
        organizer_id: "org-1".into(),
        title: format!("Meeting {id}"),
        description: None,
        participant_ids: participants.iter().map(|p| p.to_string()).collect(),
        interval: interval(start, end),
        status: MeetingStatus::Scheduled,
    }
}

pub fn draft(title: &str, participants: &[&str], start: (u32, u32), end: (u32, u32)) -> MeetingDraft {
    MeetingDraft {
        title: title.into(),
        description: None,
        participant_ids: participants.iter().map(|p| p.to_string()).collect(),
        interval: interval(start, end),
    }
}
