use std::sync::Arc;
use std::time::Duration;

use film_fusion::auth::{
    AuthError, AuthStatus, EngineState, HttpQrAuth, QrAuthApi, QrCodeRequest, QrLoginEngine,
};
use film_fusion::mock::{MockAuthServer, MockPhases};
use serde_json::json;

fn fast_phases() -> MockPhases {
    MockPhases {
        scan_after: Duration::from_millis(60),
        confirm_after: Duration::from_millis(120),
        expire_after: Duration::from_secs(60),
    }
}

#[tokio::test]
async fn qrcode_rejects_missing_fields() {
    let server = MockAuthServer::start().await.expect("start mock");
    let response: serde_json::Value = reqwest::Client::new()
        .post(format!("{}/api/auth/115/qrcode", server.uri()))
        .json(&json!({"client_id": "", "name": "My Drive"}))
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json");
    assert_eq!(response["code"], 1001);
    assert!(response["data"].is_null());
}

#[tokio::test]
async fn status_rejects_missing_session_id() {
    let server = MockAuthServer::start().await.expect("start mock");
    let response: serde_json::Value = reqwest::Client::new()
        .post(format!("{}/api/auth/115/status", server.uri()))
        .json(&json!({}))
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json");
    assert_eq!(response["code"], 1002);
}

#[tokio::test]
async fn session_walks_through_the_phases() {
    let server = MockAuthServer::start_with_phases(fast_phases())
        .await
        .expect("start mock");
    let api = HttpQrAuth::new(server.uri());

    let session = api
        .request_code(&QrCodeRequest::new("app123", "My Drive"))
        .await
        .expect("request code");
    assert!(session.session_id.starts_with("session_"));
    assert!(session.qr_code_data.contains("client_id=app123"));

    let status = api.poll_once(&session.session_id).await.expect("poll");
    assert_eq!(status, AuthStatus::WaitingScan);

    tokio::time::sleep(Duration::from_millis(80)).await;
    let status = api.poll_once(&session.session_id).await.expect("poll");
    assert_eq!(status, AuthStatus::ScanSuccess);

    tokio::time::sleep(Duration::from_millis(60)).await;
    let status = api.poll_once(&session.session_id).await.expect("poll");
    assert_eq!(status, AuthStatus::LoginSuccess);
}

#[tokio::test]
async fn session_past_the_expiry_threshold_reports_cancelled() {
    let server = MockAuthServer::start_with_phases(MockPhases {
        scan_after: Duration::from_millis(5),
        confirm_after: Duration::from_millis(10),
        expire_after: Duration::from_millis(40),
    })
    .await
    .expect("start mock");
    let api = HttpQrAuth::new(server.uri());

    let session = api
        .request_code(&QrCodeRequest::new("app123", "My Drive"))
        .await
        .expect("request code");
    tokio::time::sleep(Duration::from_millis(60)).await;
    let status = api.poll_once(&session.session_id).await.expect("poll");
    assert_eq!(status, AuthStatus::Cancelled);
}

// Wire-compat quirk inherited from the original backend mock: an unknown
// session id is reported as waiting, not as an error.
#[tokio::test]
async fn unknown_session_reports_waiting() {
    let server = MockAuthServer::start().await.expect("start mock");
    let api = HttpQrAuth::new(server.uri());
    let status = api.poll_once("no-such-session").await.expect("poll");
    assert_eq!(status, AuthStatus::WaitingScan);
}

#[tokio::test]
async fn complete_requires_a_session_id() {
    let server = MockAuthServer::start().await.expect("start mock");
    let response = reqwest::Client::new()
        .post(format!("{}/api/auth/115/complete", server.uri()))
        .json(&json!({}))
        .send()
        .await
        .expect("send");
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("json");
    assert_eq!(body["error"], "session_id is required");

    let api = HttpQrAuth::new(server.uri());
    assert!(matches!(
        api.finalize("", None).await,
        Err(AuthError::Http { status: 400, .. })
    ));
}

#[tokio::test]
async fn complete_allocates_ids_and_echoes_existing_ones() {
    let server = MockAuthServer::start().await.expect("start mock");
    let api = HttpQrAuth::new(server.uri());

    let first = api.finalize("session_1_1", None).await.expect("finalize");
    let second = api.finalize("session_1_2", None).await.expect("finalize");
    assert_eq!(first.storage_id, 1);
    assert_eq!(second.storage_id, 2);
    assert_eq!(first.expires_in, 7200);

    let updated = api
        .finalize("session_1_3", Some(42))
        .await
        .expect("finalize");
    assert_eq!(updated.storage_id, 42);
}

#[tokio::test]
async fn engine_confirms_and_finalizes_against_the_mock() {
    let server = MockAuthServer::start_with_phases(fast_phases())
        .await
        .expect("start mock");
    let engine = QrLoginEngine::new(Arc::new(HttpQrAuth::new(server.uri())))
        .with_poll_interval(Duration::from_millis(25));

    engine
        .start(QrCodeRequest::new("app123", "My Drive"))
        .await
        .expect("start");

    let mut states = engine.subscribe_state();
    tokio::time::timeout(
        Duration::from_secs(5),
        states.wait_for(|state| *state == EngineState::Confirmed),
    )
    .await
    .expect("confirmation within deadline")
    .expect("engine alive");

    let credential = engine.finalize(None).await.expect("finalize");
    assert_eq!(credential.access_token, "mock-access-token");
    assert_eq!(engine.state(), EngineState::Idle);
}
