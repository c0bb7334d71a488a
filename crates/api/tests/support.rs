use convene_app::AppContext;
use convene_common::auth::CredentialPair;
use convene_domain::{Config, CredentialBackend};
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Application context wired to a mock API server and a throwaway
/// credential file.
pub struct TestContext {
    pub server: MockServer,
    pub ctx: AppContext,
    /// Keep temporary directory alive for the lifetime of the context.
    pub temp_dir: TempDir,
}

pub fn test_config(server: &MockServer, temp_dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.api.base_url = format!("{}/api", server.uri());
    config.session.credential_backend = CredentialBackend::File;
    config.session.credential_path =
        temp_dir.path().join("credentials.json").to_string_lossy().into_owned();
    config
}

/// Fresh context with no session.
pub async fn setup_test_context() -> TestContext {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temporary directory");
    let ctx = AppContext::new(test_config(&server, &temp_dir)).expect("failed to build context");
    TestContext { server, ctx, temp_dir }
}

/// Fresh context signed in as `user_id` with the given role.
pub async fn signed_in_as(user_id: &str, role: &str) -> TestContext {
    let test = setup_test_context().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ok(user_json(user_id, role)))
        .mount(&test.server)
        .await;
    test.ctx
        .api
        .session()
        .establish(CredentialPair::new("access", "refresh"))
        .await
        .expect("failed to establish session");
    test
}

pub fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": data}))
}

pub fn user_json(id: &str, role: &str) -> Value {
    json!({"id": id, "name": id, "email": format!("{id}@example.com"), "role": role})
}

pub fn meeting_json(id: &str, participants: &[&str], start: &str, end: &str) -> Value {
    json!({
        "id": id,
        "organizerId": "org",
        "title": format!("Meeting {id}"),
        "participantIds": participants,
        "startTime": start,
        "endTime": end,
        "status": "SCHEDULED"
    })
}
