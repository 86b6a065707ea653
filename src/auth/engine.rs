use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use super::api::QrAuthApi;
use super::error::AuthError;
use super::session::{QrCodeRequest, QrSession, StoredCredential};
use super::status::AuthStatus;

/// Fixed delay between status polls. The next poll is scheduled after the
/// previous response resolves, not on a wall-clock grid.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Countdown budget for one authorization attempt.
pub const DEFAULT_COUNTDOWN_SECS: u64 = 300;

/// Observable state of one authorization flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineState {
    /// No session. Also the state after cancel or a finalized flow.
    Idle,
    /// Session created, polling active. `status` is the last non-terminal
    /// status reported by the backend.
    AwaitingScan { status: AuthStatus },
    /// Backend reported login success; `finalize` is now permitted.
    Confirmed,
    /// Countdown reached zero before confirmation. Requires a fresh `start`.
    Expired,
    /// Backend reported the user cancelled the login.
    Cancelled,
}

impl EngineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Expired | Self::Cancelled)
    }
}

struct Flow {
    session: QrSession,
    stop: Arc<AtomicBool>,
}

/// Drives the QR authorization handshake: create session, poll status on a
/// fixed cadence, enforce the countdown, surface terminal transitions.
///
/// One engine instance owns one flow at a time; both the "add storage" and
/// the re-login path use the same engine, differing only in the `storage_id`
/// passed to [`finalize`](Self::finalize). State is observable through a
/// watch channel, the remaining countdown seconds through a second one.
///
/// Timer discipline: each flow holds exactly two tasks, the poll loop and a
/// one-second countdown ticker. Both exit through a shared stop flag that
/// every teardown path sets — [`dispose`](Self::dispose) is the single entry
/// point, invoked from cancel, restart, successful finalize, and `Drop`.
/// Cancellation is cooperative: an in-flight poll is allowed to complete and
/// its result is discarded once the flag is set, so a stale response can
/// never resurrect an ended flow.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use film_fusion::auth::{HttpQrAuth, QrCodeRequest, QrLoginEngine};
///
/// # async fn example() -> Result<(), film_fusion::auth::AuthError> {
/// let engine = QrLoginEngine::new(Arc::new(HttpQrAuth::new("http://127.0.0.1:8000")));
/// let session = engine.start(QrCodeRequest::new("app123", "My Drive")).await?;
/// println!("scan: {}", session.qr_code_data);
/// # Ok(())
/// # }
/// ```
pub struct QrLoginEngine {
    api: Arc<dyn QrAuthApi>,
    poll_interval: Duration,
    countdown_secs: u64,
    state_tx: Arc<watch::Sender<EngineState>>,
    countdown_tx: Arc<watch::Sender<u64>>,
    in_flight: Arc<AtomicBool>,
    flow: Mutex<Option<Flow>>,
}

impl QrLoginEngine {
    pub fn new(api: Arc<dyn QrAuthApi>) -> Self {
        Self {
            api,
            poll_interval: DEFAULT_POLL_INTERVAL,
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
            state_tx: Arc::new(watch::Sender::new(EngineState::Idle)),
            countdown_tx: Arc::new(watch::Sender::new(DEFAULT_COUNTDOWN_SECS)),
            in_flight: Arc::new(AtomicBool::new(false)),
            flow: Mutex::new(None),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_countdown(mut self, secs: u64) -> Self {
        self.countdown_secs = secs;
        self.countdown_tx.send_replace(secs);
        self
    }

    /// Current state snapshot.
    pub fn state(&self) -> EngineState {
        self.state_tx.borrow().clone()
    }

    /// Watch state transitions.
    pub fn subscribe_state(&self) -> watch::Receiver<EngineState> {
        self.state_tx.subscribe()
    }

    /// Seconds left on the active countdown.
    pub fn remaining_secs(&self) -> u64 {
        *self.countdown_tx.borrow()
    }

    /// Watch the countdown tick.
    pub fn subscribe_countdown(&self) -> watch::Receiver<u64> {
        self.countdown_tx.subscribe()
    }

    /// The active session, if a flow has been started.
    pub fn session(&self) -> Option<QrSession> {
        self.flow
            .lock()
            .ok()
            .and_then(|guard| guard.as_ref().map(|flow| flow.session.clone()))
    }

    /// Begin a flow: create a session and start the poll loop and countdown.
    ///
    /// Empty `client_id` or `name` is rejected locally before any network
    /// call. Starting while a previous flow is active (or in a terminal
    /// state) disposes it first, so retry-after-expiry is a plain `start`.
    pub async fn start(&self, request: QrCodeRequest) -> Result<QrSession, AuthError> {
        if request.client_id.trim().is_empty() {
            return Err(AuthError::MissingField("client_id"));
        }
        if request.name.trim().is_empty() {
            return Err(AuthError::MissingField("name"));
        }

        self.cancel();
        let session = self.api.request_code(&request).await?;
        tracing::debug!(session_id = %session.session_id, "authorization session created");

        let stop = Arc::new(AtomicBool::new(false));
        self.state_tx.send_replace(EngineState::AwaitingScan {
            status: AuthStatus::WaitingScan,
        });
        self.countdown_tx.send_replace(self.countdown_secs);

        tokio::spawn(poll_loop(
            Arc::clone(&self.api),
            session.session_id.clone(),
            self.poll_interval,
            Arc::clone(&stop),
            Arc::clone(&self.in_flight),
            Arc::clone(&self.state_tx),
        ));
        tokio::spawn(countdown_loop(
            self.countdown_secs,
            Arc::clone(&stop),
            Arc::clone(&self.state_tx),
            Arc::clone(&self.countdown_tx),
        ));

        if let Ok(mut guard) = self.flow.lock() {
            *guard = Some(Flow {
                session: session.clone(),
                stop,
            });
        }
        Ok(session)
    }

    /// Exchange the confirmed session for durable credentials.
    ///
    /// Rejected locally, with zero network calls, unless the flow is
    /// [`EngineState::Confirmed`]. Pass `storage_id` to update an existing
    /// record (re-login); leave it out to create a new one. On success the
    /// flow is closed; on failure the state stays `Confirmed` for a retry.
    pub async fn finalize(&self, storage_id: Option<i64>) -> Result<StoredCredential, AuthError> {
        if self.state() != EngineState::Confirmed {
            return Err(AuthError::NotConfirmed);
        }
        let session_id = self
            .session()
            .map(|session| session.session_id)
            .ok_or(AuthError::NotConfirmed)?;
        let credential = self.api.finalize(&session_id, storage_id).await?;
        self.cancel();
        Ok(credential)
    }

    /// Stop the flow and return to [`EngineState::Idle`].
    pub fn cancel(&self) {
        self.dispose();
        self.state_tx.send_replace(EngineState::Idle);
        self.countdown_tx.send_replace(self.countdown_secs);
    }

    /// Idempotent teardown: set the stop flag ending both timer tasks and
    /// discard the session. Does not touch the published state.
    pub fn dispose(&self) {
        if let Ok(mut guard) = self.flow.lock() {
            if let Some(flow) = guard.take() {
                flow.stop.store(true, Ordering::SeqCst);
            }
        }
    }
}

impl Drop for QrLoginEngine {
    fn drop(&mut self) {
        self.dispose();
    }
}

async fn poll_loop(
    api: Arc<dyn QrAuthApi>,
    session_id: String,
    interval: Duration,
    stop: Arc<AtomicBool>,
    in_flight: Arc<AtomicBool>,
    state_tx: Arc<watch::Sender<EngineState>>,
) {
    loop {
        tokio::time::sleep(interval).await;
        if stop.load(Ordering::SeqCst) {
            break;
        }
        if in_flight.swap(true, Ordering::SeqCst) {
            // A previous poll has not resolved; keep the cadence and retry.
            continue;
        }
        let result = api.poll_once(&session_id).await;
        in_flight.store(false, Ordering::SeqCst);
        // Checked again after the await: an expiry or teardown that happened
        // while this poll was in flight wins, and the response is discarded.
        if stop.load(Ordering::SeqCst) {
            break;
        }
        match result {
            Ok(status @ (AuthStatus::WaitingScan | AuthStatus::ScanSuccess)) => {
                state_tx.send_replace(EngineState::AwaitingScan { status });
            }
            Ok(AuthStatus::LoginSuccess) => {
                if !stop.swap(true, Ordering::SeqCst) {
                    state_tx.send_replace(EngineState::Confirmed);
                }
                break;
            }
            Ok(AuthStatus::Cancelled) => {
                if !stop.swap(true, Ordering::SeqCst) {
                    tracing::warn!(%session_id, "login cancelled by the remote user");
                    state_tx.send_replace(EngineState::Cancelled);
                }
                break;
            }
            Err(error) => {
                // Transient failures never surface mid-flow; the countdown
                // bounds how long this can go on.
                tracing::warn!(%session_id, %error, "status poll failed; retrying on the same cadence");
            }
        }
    }
}

async fn countdown_loop(
    secs: u64,
    stop: Arc<AtomicBool>,
    state_tx: Arc<watch::Sender<EngineState>>,
    countdown_tx: Arc<watch::Sender<u64>>,
) {
    let mut remaining = secs;
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // interval yields immediately on the first tick
    ticker.tick().await;
    loop {
        ticker.tick().await;
        remaining = remaining.saturating_sub(1);
        // Checked between the tick and the publish: a cancel that lands
        // while a tick is due must not overwrite the reset countdown with
        // this stale value.
        if stop.load(Ordering::SeqCst) {
            break;
        }
        countdown_tx.send_replace(remaining);
        if remaining == 0 {
            // The swap decides between this and a concurrent poll result;
            // exactly one side publishes a terminal state.
            if !stop.swap(true, Ordering::SeqCst) {
                tracing::warn!("authorization session expired before confirmation");
                state_tx.send_replace(EngineState::Expired);
            }
            break;
        }
    }
}
