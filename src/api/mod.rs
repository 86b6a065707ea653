//! Typed client for the Film Fusion REST API.

pub mod cloud_path;
pub mod cloud_storage;
pub mod match_rule;
pub mod media;
pub mod pickcode_cache;
pub mod scan_task;
pub mod strm;
pub mod types;
pub mod user;

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::{HttpQrAuth, MemorySessionStore, QrLoginEngine, SessionStore};
use crate::config::FusionConfig;
use crate::error::{FusionError, Result};
use self::types::ApiResponse;

/// HTTP client for the Film Fusion backend.
///
/// One shared `reqwest::Client`; the bearer token comes from a
/// [`SessionStore`], refreshed by [`login`](Self::login) and usable across
/// clones. Resource methods live in the per-resource modules
/// (`cloud_storage`, `cloud_path`, `match_rule`, `media`, `pickcode_cache`,
/// `scan_task`, `strm`, `user`).
#[derive(Clone)]
pub struct FusionClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl FusionClient {
    pub fn new(config: FusionConfig) -> Self {
        let session: Arc<dyn SessionStore> = match &config.token {
            Some(token) => Arc::new(MemorySessionStore::with_token(token.clone())),
            None => Arc::new(MemorySessionStore::new()),
        };
        Self::with_session_store(config, session)
    }

    pub fn with_session_store(config: FusionConfig, session: Arc<dyn SessionStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session_store(&self) -> Arc<dyn SessionStore> {
        Arc::clone(&self.session)
    }

    /// Wire client for the three 115 authorization endpoints, sharing this
    /// client's base URL and session store.
    pub fn qr_auth(&self) -> HttpQrAuth {
        HttpQrAuth::new(self.base_url.as_str()).with_session_store(Arc::clone(&self.session))
    }

    /// Fresh polling engine for one QR authorization flow.
    pub fn qr_login_engine(&self) -> QrLoginEngine {
        QrLoginEngine::new(Arc::new(self.qr_auth()))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn builder(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut request = self.http.request(method, self.url(path));
        match self.session.load() {
            Ok(Some(session)) if !session.is_expired() => {
                request = request.bearer_auth(session.token);
            }
            Ok(Some(_)) => {
                tracing::warn!("stored session token is expired; sending the request unauthenticated");
            }
            Ok(None) => {}
            Err(error) => {
                tracing::warn!(%error, "session store read failed; sending the request unauthenticated");
            }
        }
        request
    }

    async fn execute<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FusionError::http(status.as_u16(), body));
        }
        let envelope: ApiResponse<T> = response.json().await?;
        envelope.into_result()
    }

    /// Like [`execute`](Self::execute) but tolerates `data: null` on success;
    /// used for deletes and toggles whose payload carries no information.
    async fn execute_unit(&self, request: reqwest::RequestBuilder) -> Result<()> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FusionError::http(status.as_u16(), body));
        }
        let envelope: ApiResponse<serde_json::Value> = response.json().await?;
        if envelope.code != 0 {
            return Err(FusionError::Api {
                code: envelope.code,
                message: envelope.message,
            });
        }
        Ok(())
    }

    pub(crate) async fn get<Q: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        tracing::debug!(%path, "GET");
        self.execute(self.builder(Method::GET, path).query(query))
            .await
    }

    pub(crate) async fn get_bare<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!(%path, "GET");
        self.execute(self.builder(Method::GET, path)).await
    }

    pub(crate) async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T> {
        tracing::debug!(%method, %path, "request");
        self.execute(self.builder(method, path).json(body)).await
    }

    pub(crate) async fn send_json_unit<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<()> {
        tracing::debug!(%method, %path, "request");
        self.execute_unit(self.builder(method, path).json(body))
            .await
    }

    pub(crate) async fn send_empty<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
    ) -> Result<T> {
        tracing::debug!(%method, %path, "request");
        self.execute(self.builder(method, path)).await
    }

    pub(crate) async fn send_empty_unit(&self, method: Method, path: &str) -> Result<()> {
        tracing::debug!(%method, %path, "request");
        self.execute_unit(self.builder(method, path)).await
    }

    pub(crate) async fn send_multipart_unit(
        &self,
        method: Method,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<()> {
        tracing::debug!(%method, %path, "multipart request");
        self.execute_unit(self.builder(method, path).multipart(form))
            .await
    }
}

#[derive(Serialize)]
pub(crate) struct IdsBody<'a> {
    pub ids: &'a [i64],
}
