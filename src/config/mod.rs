//! Client configuration (explicit values > environment).

use std::env;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

const ENV_BASE_URL: &str = "FILM_FUSION_BASE_URL";
const ENV_TOKEN: &str = "FILM_FUSION_TOKEN";

/// Connection settings for [`FusionClient`](crate::api::FusionClient).
///
/// # Example
/// ```
/// use film_fusion::config::FusionConfig;
///
/// let config = FusionConfig::new("http://media-box.local:8000").with_token("bearer");
/// ```
#[derive(Debug, Clone)]
pub struct FusionConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl FusionConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Read `FILM_FUSION_BASE_URL` / `FILM_FUSION_TOKEN`, loading a `.env`
    /// file first when present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self {
            base_url: env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            token: env::var(ENV_TOKEN).ok(),
        }
    }

    /// Seed the session store with a fixed bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
