//! Domain types and models

pub mod conflict;
pub mod interval;
pub mod meeting;
pub mod user;

pub use conflict::ConflictResult;
pub use interval::TimeInterval;
pub use meeting::{Meeting, MeetingChanges, MeetingDraft, MeetingStatus};
pub use user::{Role, User};

/// Opaque, stable meeting identity.
pub type MeetingId = String;

/// Opaque, stable user identity.
pub type UserId = String;
