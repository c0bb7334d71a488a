//! User identity and roles

use serde::{Deserialize, Serialize};

use super::UserId;
use crate::impl_domain_status_conversions;

/// Role attached to an account at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May create, modify and delete meetings and manage assignments.
    Organizer,
    /// Read-only visibility into assigned meetings.
    Participant,
}

impl_domain_status_conversions!(Role {
    Organizer => "organizer",
    Participant => "participant",
});

impl Role {
    pub fn can_manage_meetings(self) -> bool {
        matches!(self, Self::Organizer)
    }
}

/// Authenticated user profile returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn is_organizer(&self) -> bool {
        self.role.can_manage_meetings()
    }
}
