//! Embeddable mock of the 115 authorization endpoints.
//!
//! Status is derived from wall-clock time elapsed since the timestamp
//! embedded in the session id, so a flow driven against this server walks
//! through waiting → scanned → confirmed → cancelled on its own. Phase
//! thresholds are configurable so tests can run the whole ladder in
//! milliseconds. This is demo/test scaffolding: the wire contract (four
//! status values polled by session id) is the only part a real backend must
//! honor, not the timing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tokio::task::JoinHandle;

/// Elapsed-time thresholds separating the simulated phases.
#[derive(Debug, Clone, Copy)]
pub struct MockPhases {
    /// Before this: `WAITING_SCAN`.
    pub scan_after: Duration,
    /// Between `scan_after` and this: `SCAN_SUCCESS`.
    pub confirm_after: Duration,
    /// Between `confirm_after` and this: `LOGIN_SUCCESS`; after: `CANCELLED`.
    pub expire_after: Duration,
}

impl Default for MockPhases {
    fn default() -> Self {
        Self {
            scan_after: Duration::from_secs(10),
            confirm_after: Duration::from_secs(20),
            expire_after: Duration::from_secs(300),
        }
    }
}

struct MockState {
    phases: MockPhases,
    next_session_seq: AtomicU64,
    next_storage_id: AtomicI64,
}

/// Build the mock router; useful for embedding into an existing axum app.
pub fn router(phases: MockPhases) -> Router {
    let state = Arc::new(MockState {
        phases,
        next_session_seq: AtomicU64::new(1),
        next_storage_id: AtomicI64::new(1),
    });
    Router::new()
        .route("/api/auth/115/qrcode", post(qrcode))
        .route("/api/auth/115/status", post(status))
        .route("/api/auth/115/complete", post(complete))
        .with_state(state)
}

/// Mock server bound to an ephemeral local port.
///
/// # Example
/// ```no_run
/// use film_fusion::mock::MockAuthServer;
///
/// # async fn example() -> std::io::Result<()> {
/// let server = MockAuthServer::start().await?;
/// println!("mock backend at {}", server.uri());
/// # Ok(())
/// # }
/// ```
pub struct MockAuthServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl MockAuthServer {
    pub async fn start() -> std::io::Result<Self> {
        Self::start_with_phases(MockPhases::default()).await
    }

    pub async fn start_with_phases(phases: MockPhases) -> std::io::Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = router(phases);
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(Self { addr, handle })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn uri(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockAuthServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

#[derive(Deserialize)]
struct QrCodeBody {
    #[serde(default)]
    client_id: String,
    #[serde(default)]
    name: String,
}

async fn qrcode(State(state): State<Arc<MockState>>, Json(body): Json<QrCodeBody>) -> Json<serde_json::Value> {
    if body.client_id.is_empty() || body.name.is_empty() {
        return Json(json!({
            "code": 1001,
            "message": "client_id and name are required",
            "data": null
        }));
    }
    let seq = state.next_session_seq.fetch_add(1, Ordering::SeqCst);
    let session_id = format!("session_{}_{seq}", now_millis());
    let qr_code_data = format!(
        "https://115.com/web/oauth/authorize?client_id={}&session_id={session_id}&response_type=code&scope=basic",
        body.client_id
    );
    Json(json!({
        "code": 0,
        "message": "qr code generated",
        "data": {
            "qr_code_data": qr_code_data,
            "session_id": session_id
        }
    }))
}

#[derive(Deserialize)]
struct StatusBody {
    #[serde(default)]
    session_id: String,
}

async fn status(State(state): State<Arc<MockState>>, Json(body): Json<StatusBody>) -> Json<serde_json::Value> {
    if body.session_id.is_empty() {
        return Json(json!({
            "code": 1002,
            "message": "session_id is required",
            "data": null
        }));
    }

    // An id that doesn't carry a parsable timestamp (including an entirely
    // unknown session) reports WAITING_SCAN, matching the original mock. A
    // production backend should return a distinct not-found error instead.
    let created_millis = body
        .session_id
        .split('_')
        .nth(1)
        .and_then(|raw| raw.parse::<u64>().ok())
        .unwrap_or_else(now_millis);
    let elapsed = Duration::from_millis(now_millis().saturating_sub(created_millis));

    let phases = state.phases;
    let (status, message) = if elapsed < phases.scan_after {
        (0, "waiting for scan")
    } else if elapsed < phases.confirm_after {
        (1, "scanned, awaiting confirmation")
    } else if elapsed < phases.expire_after {
        (2, "login confirmed")
    } else {
        (-2, "login cancelled")
    };

    Json(json!({
        "code": 0,
        "message": message,
        "data": { "status": status }
    }))
}

#[derive(Deserialize)]
struct CompleteBody {
    #[serde(default)]
    session_id: String,
    storage_id: Option<i64>,
}

async fn complete(State(state): State<Arc<MockState>>, Json(body): Json<CompleteBody>) -> Response {
    if body.session_id.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "session_id is required" })),
        )
            .into_response();
    }
    // storage_id present means update that record; absent mints a new id.
    let storage_id = body
        .storage_id
        .unwrap_or_else(|| state.next_storage_id.fetch_add(1, Ordering::SeqCst));
    Json(json!({
        "message": "authorization complete, configuration saved",
        "storage_id": storage_id,
        "access_token": "mock-access-token",
        "refresh_token": "mock-refresh-token",
        "expires_in": 7200
    }))
    .into_response()
}
