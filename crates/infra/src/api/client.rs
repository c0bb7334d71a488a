//! API client with session-aware authorization
//!
//! Every authenticated request goes through the session coordinator: the
//! current access token is attached as a bearer credential, a 401 response
//! triggers (or joins) a single refresh, and the request is retried exactly
//! once with the refreshed token.

use std::sync::Arc;
use std::time::Duration;

use convene_common::auth::{Authorized, CredentialStore, SessionTokenCoordinator};
use convene_domain::Config;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use super::auth::HttpRefreshClient;
use super::envelope::{decode_data, ApiEnvelope};
use super::errors::ApiError;
use crate::http::HttpClient;

/// Session coordinator wired to the HTTP refresh endpoint and any
/// credential store.
pub type Session = SessionTokenCoordinator<HttpRefreshClient, dyn CredentialStore>;

/// JSON API client bound to one session
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(http: HttpClient, base_url: impl Into<String>, session: Session) -> Self {
        Self { http, base_url: trim_base(base_url.into()), session }
    }

    /// Build the client, its refresh endpoint and session from
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the base URL is invalid or the HTTP
    /// client cannot be built.
    pub fn from_config(config: &Config, store: Arc<dyn CredentialStore>) -> Result<Self, ApiError> {
        Url::parse(&config.api.base_url).map_err(|e| {
            ApiError::Config(format!("invalid API base URL '{}': {e}", config.api.base_url))
        })?;

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;

        let refresh = HttpRefreshClient::new(http.clone(), &config.api.base_url);
        let session = Session::new(refresh, store)
            .with_refresh_timeout(config.session.refresh_timeout_secs.map(Duration::from_secs));

        Ok(Self::new(http, &config.api.base_url, session))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Execute an authenticated GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let data = self.execute(Method::GET, path, None).await?;
        decode_data(data, path)
    }

    /// Execute an authenticated POST request
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let data = self.execute(Method::POST, path, Some(to_json(body)?)).await?;
        decode_data(data, path)
    }

    /// Execute an authenticated PUT request
    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let data = self.execute(Method::PUT, path, Some(to_json(body)?)).await?;
        decode_data(data, path)
    }

    /// Execute an authenticated DELETE request; any payload is ignored
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, None).await.map(|_| ())
    }

    /// POST without credentials (login, registration)
    pub async fn post_public<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let data = self.execute_public(Method::POST, path, Some(to_json(body)?)).await?;
        decode_data(data, path)
    }

    #[instrument(skip_all, fields(method = %method, path = %path))]
    pub(crate) async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Option<Value>, ApiError> {
        let url = self.url(path);

        let response = self
            .session
            .authorized(|token| {
                let mut request = self.http.request(method.clone(), &url).bearer_auth(token);
                if let Some(body) = &body {
                    request = request.json(body);
                }
                send_once(&self.http, request)
            })
            .await?;

        read_envelope(response, &url).await
    }

    #[instrument(skip_all, fields(method = %method, path = %path))]
    pub(crate) async fn execute_public(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Option<Value>, ApiError> {
        let url = self.url(path);
        let mut request = self.http.request(method, &url);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = self.http.send(request).await?;
        read_envelope(response, &url).await
    }
}

async fn send_once(
    http: &HttpClient,
    request: RequestBuilder,
) -> Result<Authorized<Response>, ApiError> {
    let response = http.send(request).await?;
    if response.status() == StatusCode::UNAUTHORIZED {
        debug!(url = %response.url(), "access token rejected");
        return Ok(Authorized::Rejected);
    }
    Ok(Authorized::Completed(response))
}

/// Read a response body and unwrap its envelope.
pub(crate) async fn read_envelope(response: Response, url: &str) -> Result<Option<Value>, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(format!("failed to read response from {url}: {e}")))?;

    if !status.is_success() {
        return Err(ApiError::from_status(status, url, &body));
    }

    // 204 and friends
    if body.trim().is_empty() {
        return Ok(None);
    }

    let envelope: ApiEnvelope<Value> = serde_json::from_str(&body)
        .map_err(|e| ApiError::Decode(format!("{url} returned malformed JSON: {e}")))?;
    envelope.into_result()
}

pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn trim_base(mut base_url: String) -> String {
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}

fn to_json<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(format!("Failed to serialize body: {e}")))
}

#[cfg(test)]
mod tests {
    use convene_common::testing::MockCredentialStore;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> ApiClient {
        let mut config = Config::default();
        config.api.base_url = format!("{}/api/", server.uri());
        let store: Arc<dyn CredentialStore> = Arc::new(MockCredentialStore::new());
        ApiClient::from_config(&config, store).unwrap()
    }

    #[test]
    fn join_url_normalizes_slashes() {
        assert_eq!(join_url("http://h/api/", "/meetings"), "http://h/api/meetings");
        assert_eq!(join_url("http://h/api", "meetings"), "http://h/api/meetings");
    }

    #[test]
    fn rejects_invalid_base_url() {
        let mut config = Config::default();
        config.api.base_url = "not a url".into();
        let store: Arc<dyn CredentialStore> = Arc::new(MockCredentialStore::new());

        assert!(matches!(ApiClient::from_config(&config, store), Err(ApiError::Config(_))));
    }

    #[tokio::test]
    async fn unauthenticated_session_sends_nothing() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let result: Result<Value, ApiError> = client.get("/meetings").await;

        assert!(matches!(result, Err(ApiError::Auth(_))));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn public_post_unwraps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/echo"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"success": true, "data": {"n": 1}})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let value: Value = client.post_public("/echo", &serde_json::json!({})).await.unwrap();

        assert_eq!(value["n"], 1);
    }

    #[tokio::test]
    async fn bearer_token_is_attached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ping"))
            .and(header("authorization", "Bearer token-a"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true, "data": "pong"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .session()
            .establish(convene_common::auth::CredentialPair::new("token-a", "refresh-a"))
            .await
            .unwrap();

        let pong: String = client.get("/ping").await.unwrap();
        assert_eq!(pong, "pong");
    }
}
