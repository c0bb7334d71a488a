//! Integration tests for the authenticated API path: bearer tokens, the
//! shared refresh on 401 and response classification, against a mock
//! server.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use convene_common::auth::{CredentialPair, CredentialStore, SessionState};
use convene_common::testing::MockCredentialStore;
use convene_core::MeetingRepository;
use convene_domain::{Config, ConveneError, MeetingDraft, TimeInterval};
use convene_infra::{ApiClient, RemoteMeetingRepository};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    server: MockServer,
    store: Arc<MockCredentialStore>,
    client: ApiClient,
    meetings: RemoteMeetingRepository,
}

async fn harness() -> Harness {
    let server = MockServer::start().await;
    let mut config = Config::default();
    config.api.base_url = format!("{}/api", server.uri());
    config.session.refresh_timeout_secs = Some(5);

    let store = Arc::new(MockCredentialStore::new());
    let dyn_store: Arc<dyn CredentialStore> = store.clone();
    let client = ApiClient::from_config(&config, dyn_store).unwrap();
    client.session().establish(CredentialPair::new("stale", "r-1")).await.unwrap();

    let meetings = RemoteMeetingRepository::new(client.clone());
    Harness { server, store, client, meetings }
}

fn meeting_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "organizerId": "org",
        "title": "Planning",
        "participantIds": ["alice"],
        "startTime": "2025-03-14T10:00:00Z",
        "endTime": "2025-03-14T11:00:00Z",
        "status": "SCHEDULED"
    })
}

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": data}))
}

async fn mount_refresh(server: &MockServer, response: ResponseTemplate, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({"refreshToken": "r-1"})))
        .respond_with(response)
        .expect(expected)
        .mount(server)
        .await;
}

/// Validates the core refresh scenario: several requests rejected while one
/// refresh is in flight share that refresh and all succeed on retry.
#[tokio::test]
async fn concurrent_rejections_share_one_refresh() {
    let h = harness().await;
    Mock::given(method("GET"))
        .and(path("/api/meetings"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/meetings"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ok(json!([meeting_json("m-1")])))
        .mount(&h.server)
        .await;
    mount_refresh(
        &h.server,
        ok(json!({"accessToken": "fresh", "refreshToken": "r-2"}))
            .set_delay(Duration::from_millis(200)),
        1,
    )
    .await;

    let results = futures::future::join_all((0..5).map(|_| h.meetings.list_meetings())).await;

    for result in results {
        assert_eq!(result.unwrap()[0].id, "m-1");
    }
    assert_eq!(h.client.session().refresh_count(), 1);
    assert_eq!(h.store.current(), Some(CredentialPair::new("fresh", "r-2")));
}

/// Validates that a failed refresh rejects every waiting request, clears the
/// stored credentials and leaves the session failed.
#[tokio::test]
async fn failed_refresh_clears_credentials() {
    let h = harness().await;
    Mock::given(method("GET"))
        .and(path("/api/meetings"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;
    mount_refresh(
        &h.server,
        ResponseTemplate::new(401)
            .set_body_json(json!({"success": false, "message": "refresh token revoked"}))
            .set_delay(Duration::from_millis(100)),
        1,
    )
    .await;

    let results = futures::future::join_all((0..3).map(|_| h.meetings.list_meetings())).await;

    for result in results {
        assert!(matches!(result, Err(ConveneError::Authentication(_))));
    }
    assert_eq!(h.store.current(), None);
    assert!(matches!(h.client.session().state(), SessionState::Failed(_)));
}

/// Validates that a request rejected again after its retry fails without a
/// second refresh.
#[tokio::test]
async fn second_rejection_is_terminal() {
    let h = harness().await;
    Mock::given(method("GET"))
        .and(path("/api/meetings/m-1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&h.server)
        .await;
    mount_refresh(&h.server, ok(json!({"accessToken": "fresh", "refreshToken": "r-2"})), 1).await;

    let err = h.meetings.get_meeting("m-1").await.unwrap_err();

    assert!(matches!(err, ConveneError::Authentication(_)));
    assert_eq!(h.client.session().refresh_count(), 1);
}

/// Validates that server failures unrelated to authorization are surfaced
/// unchanged and never trigger a refresh.
#[tokio::test]
async fn server_errors_do_not_refresh() {
    let h = harness().await;
    Mock::given(method("GET"))
        .and(path("/api/meetings"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&h.server)
        .await;
    mount_refresh(&h.server, ResponseTemplate::new(500), 0).await;

    let err = h.meetings.list_meetings().await.unwrap_err();

    assert!(matches!(err, ConveneError::Transient(_)));
    assert_eq!(h.client.session().state(), SessionState::Valid);
}

/// Validates that a server-side conflict surfaces every conflicting id.
#[tokio::test]
async fn conflict_response_carries_ids() {
    let h = harness().await;
    Mock::given(method("POST"))
        .and(path("/api/meetings"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "success": false,
            "message": "Scheduling conflict",
            "data": {"conflictingMeetingIds": ["m-7", "m-9"]}
        })))
        .mount(&h.server)
        .await;

    let interval = TimeInterval::new(
        "2025-03-14T10:00:00Z".parse().unwrap(),
        "2025-03-14T11:00:00Z".parse().unwrap(),
    )
    .unwrap();
    let draft = MeetingDraft {
        title: "Planning".into(),
        description: None,
        participant_ids: ["alice".to_string()].into_iter().collect(),
        interval,
    };

    let err = h.meetings.create_meeting(&draft).await.unwrap_err();

    assert_eq!(err, ConveneError::Conflict(vec!["m-7".into(), "m-9".into()]));
}

/// Validates that `{"success": false}` on a 200 surfaces the server message.
#[tokio::test]
async fn unsuccessful_envelope_is_an_error() {
    let h = harness().await;
    Mock::given(method("DELETE"))
        .and(path("/api/meetings/m-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "Meeting already started"})),
        )
        .mount(&h.server)
        .await;

    let err = h.meetings.delete_meeting("m-1").await.unwrap_err();

    assert!(matches!(err, ConveneError::Validation(msg) if msg.contains("already started")));
}

/// Validates the participant schedule query and its empty short-circuit.
#[tokio::test]
async fn participant_schedules_query() {
    let h = harness().await;
    Mock::given(method("GET"))
        .and(path("/api/meetings/scheduled"))
        .and(query_param("participants", "alice,bob"))
        .respond_with(ok(json!({"alice": [meeting_json("m-1")], "bob": []})))
        .expect(1)
        .mount(&h.server)
        .await;

    let both: BTreeSet<String> = ["bob".to_string(), "alice".to_string()].into_iter().collect();
    let schedules = h.meetings.participant_schedules(&both).await.unwrap();
    assert_eq!(schedules["alice"][0].id, "m-1");
    assert!(schedules["bob"].is_empty());

    let none = h.meetings.participant_schedules(&BTreeSet::new()).await.unwrap();
    assert!(none.is_empty());
}
