use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::AuthError;
use super::session::{QrCodeRequest, QrSession, StoredCredential};
use super::status::AuthStatus;
use super::store::SessionStore;

const QRCODE_PATH: &str = "/api/auth/115/qrcode";
const STATUS_PATH: &str = "/api/auth/115/status";
const COMPLETE_PATH: &str = "/api/auth/115/complete";

/// Wire access to the three authorization endpoints.
///
/// The polling engine depends on this seam instead of concrete HTTP so tests
/// can script status sequences and count calls.
#[async_trait]
pub trait QrAuthApi: Send + Sync {
    /// Create an authorization session and return the scannable payload.
    async fn request_code(&self, request: &QrCodeRequest) -> Result<QrSession, AuthError>;

    /// Report the current status of a session. Stateless for the caller;
    /// the engine serializes calls so at most one is ever in flight.
    async fn poll_once(&self, session_id: &str) -> Result<AuthStatus, AuthError>;

    /// Exchange a confirmed session for durable credentials. `storage_id`
    /// present means update that record; absent means create a new one.
    async fn finalize(
        &self,
        session_id: &str,
        storage_id: Option<i64>,
    ) -> Result<StoredCredential, AuthError>;
}

/// HTTP implementation of [`QrAuthApi`] against the Film Fusion backend.
///
/// # Example
/// ```no_run
/// use film_fusion::auth::HttpQrAuth;
///
/// let api = HttpQrAuth::new("http://127.0.0.1:8000");
/// ```
pub struct HttpQrAuth {
    client: reqwest::Client,
    qrcode_url: String,
    status_url: String,
    complete_url: String,
    session_store: Option<Arc<dyn SessionStore>>,
}

impl HttpQrAuth {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        let base = base.trim_end_matches('/');
        Self {
            client: reqwest::Client::new(),
            qrcode_url: format!("{base}{QRCODE_PATH}"),
            status_url: format!("{base}{STATUS_PATH}"),
            complete_url: format!("{base}{COMPLETE_PATH}"),
            session_store: None,
        }
    }

    /// Attach a session store; its token is sent as a Bearer header.
    pub fn with_session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    pub fn with_qrcode_url(mut self, url: impl Into<String>) -> Self {
        self.qrcode_url = url.into();
        self
    }

    pub fn with_status_url(mut self, url: impl Into<String>) -> Self {
        self.status_url = url.into();
        self
    }

    pub fn with_complete_url(mut self, url: impl Into<String>) -> Self {
        self.complete_url = url.into();
        self
    }

    fn bearer(&self) -> Option<String> {
        let store = self.session_store.as_ref()?;
        let session = match store.load() {
            Ok(session) => session?,
            Err(error) => {
                tracing::warn!(%error, "session store read failed; sending the request unauthenticated");
                return None;
            }
        };
        if session.is_expired() {
            tracing::warn!("stored session token is expired; sending the request unauthenticated");
            return None;
        }
        Some(session.token)
    }

    async fn post_enveloped<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, AuthError> {
        let mut request = self.client.post(url).json(body);
        if let Some(token) = self.bearer() {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::Http {
                status: status.as_u16(),
                message,
            });
        }
        let envelope: Envelope<T> = response.json().await?;
        if envelope.code != 0 {
            return Err(AuthError::Api {
                code: envelope.code,
                message: envelope.message,
            });
        }
        envelope
            .data
            .ok_or_else(|| AuthError::InvalidResponse("response data is empty".to_string()))
    }
}

#[async_trait]
impl QrAuthApi for HttpQrAuth {
    async fn request_code(&self, request: &QrCodeRequest) -> Result<QrSession, AuthError> {
        tracing::debug!(client_id = %request.client_id, "requesting authorization qr code");
        self.post_enveloped(&self.qrcode_url, request).await
    }

    async fn poll_once(&self, session_id: &str) -> Result<AuthStatus, AuthError> {
        let data: StatusData = self
            .post_enveloped(&self.status_url, &StatusBody { session_id })
            .await?;
        AuthStatus::from_wire(data.status)
    }

    async fn finalize(
        &self,
        session_id: &str,
        storage_id: Option<i64>,
    ) -> Result<StoredCredential, AuthError> {
        tracing::debug!(%session_id, ?storage_id, "finalizing authorization session");
        let mut request = self.client.post(&self.complete_url).json(&CompleteBody {
            session_id,
            storage_id,
        });
        if let Some(token) = self.bearer() {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            // The complete endpoint reports failures as plain HTTP with an
            // `{error}` body rather than the envelope.
            let message = match response.json::<CompleteError>().await {
                Ok(body) => body.error,
                Err(_) => String::new(),
            };
            return Err(AuthError::Http {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: i64,
    message: String,
    data: Option<T>,
}

#[derive(Serialize)]
struct StatusBody<'a> {
    session_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct StatusData {
    status: i64,
}

#[derive(Serialize)]
struct CompleteBody<'a> {
    session_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    storage_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct CompleteError {
    #[serde(default)]
    error: String,
}
