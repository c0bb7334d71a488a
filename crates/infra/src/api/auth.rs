//! Authentication endpoints
//!
//! Login and registration issue a credential pair that is handed to the
//! session; `HttpRefreshClient` is the session's refresh collaborator.

use async_trait::async_trait;
use convene_common::auth::{CredentialPair, RefreshClient, RefreshError};
use convene_domain::{Role, User};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use super::client::{join_url, read_envelope, ApiClient};
use super::envelope::decode_data;
use super::errors::ApiError;
use crate::http::HttpClient;

/// `POST /auth/login` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /auth/register` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Payload returned by login and registration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthPayload {
    fn into_parts(self) -> (User, CredentialPair) {
        (self.user, CredentialPair::new(self.access_token, self.refresh_token))
    }
}

/// Refresh collaborator backed by `POST /auth/refresh`.
///
/// Bypasses the session so a refresh is never itself subject to
/// refresh-and-retry.
#[derive(Clone)]
pub struct HttpRefreshClient {
    http: HttpClient,
    url: String,
}

impl HttpRefreshClient {
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self { http, url: join_url(base_url, "/auth/refresh") }
    }
}

#[async_trait]
impl RefreshClient for HttpRefreshClient {
    async fn refresh(&self, refresh_token: &str) -> Result<CredentialPair, RefreshError> {
        let request = self
            .http
            .request(Method::POST, &self.url)
            .json(&json!({ "refreshToken": refresh_token }));

        let response = self
            .http
            .send(request)
            .await
            .map_err(|e| RefreshError::Transport(e.to_string()))?;

        let data = read_envelope(response, &self.url).await.map_err(refresh_error)?;
        decode_data::<CredentialPair>(data, "refresh").map_err(refresh_error)
    }
}

fn refresh_error(err: ApiError) -> RefreshError {
    match err {
        ApiError::Auth(message)
        | ApiError::Forbidden(message)
        | ApiError::NotFound(message)
        | ApiError::Validation(message)
        | ApiError::Rejected(message) => RefreshError::Rejected(message),
        other => RefreshError::Transport(other.to_string()),
    }
}

/// Account operations
#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Sign in and establish the session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Auth` for bad credentials, `ApiError::Storage` if
    /// the new pair cannot be persisted.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let request = LoginRequest { email: email.to_string(), password: password.to_string() };
        let payload: AuthPayload = self.client.post_public("/auth/login", &request).await?;
        self.adopt(payload).await
    }

    /// Create an account and establish the session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected`/`ApiError::Validation` when the server
    /// refuses the registration.
    #[instrument(skip(self, request), fields(email = %request.email, role = %request.role))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        let payload: AuthPayload = self.client.post_public("/auth/register", request).await?;
        self.adopt(payload).await
    }

    async fn adopt(&self, payload: AuthPayload) -> Result<User, ApiError> {
        let (user, credentials) = payload.into_parts();
        self.client.session().establish(credentials).await?;
        info!(user_id = %user.id, role = %user.role, "signed in");
        Ok(user)
    }

    /// Revoke the refresh credential server-side and clear the session.
    ///
    /// The revocation is best effort: the local session is cleared even if
    /// the server cannot be reached.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Storage` if the credential store cannot be cleared.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        if let Some(credentials) = self.client.session().credentials() {
            let body = json!({ "refreshToken": credentials.refresh_token });
            let revoked = self.client.execute_public(Method::POST, "/auth/logout", Some(body)).await;
            if let Err(err) = revoked {
                warn!(error = %err, "server-side logout failed");
            }
        } else {
            debug!("no active session to revoke");
        }

        self.client.session().clear().await?;
        Ok(())
    }

    /// Profile of the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Auth` when there is no usable session.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.client.get("/auth/me").await
    }
}
