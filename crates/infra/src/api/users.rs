//! User directory endpoints

use convene_domain::{Role, User};
use tracing::{debug, instrument};

use super::client::ApiClient;
use super::errors::ApiError;

/// Read access to registered users; organizers pick participants from it.
#[derive(Clone)]
pub struct UsersApi {
    client: ApiClient,
}

impl UsersApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let users: Vec<User> = self.client.get("/users").await?;
        debug!(count = users.len(), "users listed");
        Ok(users)
    }

    /// Users holding the participant role, sorted by name.
    pub async fn participants(&self) -> Result<Vec<User>, ApiError> {
        let mut users: Vec<User> =
            self.list_users().await?.into_iter().filter(|u| u.role == Role::Participant).collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }
}
