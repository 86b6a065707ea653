#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use film_fusion::auth::{
    AuthError, AuthStatus, QrAuthApi, QrCodeRequest, QrSession, StoredCredential,
};

/// One scripted poll outcome.
pub enum PollScript {
    Status(AuthStatus),
    NetworkError,
}

/// Test double for [`QrAuthApi`] that replays a scripted sequence of poll
/// outcomes and counts every call, including how many polls overlap.
pub struct ScriptedQrAuth {
    script: Mutex<VecDeque<PollScript>>,
    fallback: AuthStatus,
    poll_delay: Duration,
    create_calls: AtomicUsize,
    poll_calls: AtomicUsize,
    finalize_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedQrAuth {
    pub fn new(script: Vec<PollScript>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: AuthStatus::WaitingScan,
            poll_delay: Duration::ZERO,
            create_calls: AtomicUsize::new(0),
            poll_calls: AtomicUsize::new(0),
            finalize_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Status reported once the script is exhausted.
    pub fn with_fallback(mut self, fallback: AuthStatus) -> Self {
        self.fallback = fallback;
        self
    }

    /// Simulated network latency for each poll.
    pub fn with_poll_delay(mut self, delay: Duration) -> Self {
        self.poll_delay = delay;
        self
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn poll_calls(&self) -> usize {
        self.poll_calls.load(Ordering::SeqCst)
    }

    pub fn finalize_calls(&self) -> usize {
        self.finalize_calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QrAuthApi for ScriptedQrAuth {
    async fn request_code(&self, request: &QrCodeRequest) -> Result<QrSession, AuthError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        Ok(QrSession {
            qr_code_data: format!("https://mock/qr?client_id={}", request.client_id),
            session_id: "session_test_1".to_string(),
        })
    }

    async fn poll_once(&self, _session_id: &str) -> Result<AuthStatus, AuthError> {
        self.poll_calls.fetch_add(1, Ordering::SeqCst);
        let pending = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(pending, Ordering::SeqCst);
        if !self.poll_delay.is_zero() {
            tokio::time::sleep(self.poll_delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let step = self.script.lock().expect("script lock").pop_front();
        match step {
            Some(PollScript::Status(status)) => Ok(status),
            Some(PollScript::NetworkError) => {
                Err(AuthError::Network("simulated connection reset".to_string()))
            }
            None => Ok(self.fallback),
        }
    }

    async fn finalize(
        &self,
        _session_id: &str,
        storage_id: Option<i64>,
    ) -> Result<StoredCredential, AuthError> {
        self.finalize_calls.fetch_add(1, Ordering::SeqCst);
        Ok(StoredCredential {
            storage_id: storage_id.unwrap_or(901),
            access_token: "scripted-access".to_string(),
            refresh_token: "scripted-refresh".to_string(),
            expires_in: 7200,
        })
    }
}
