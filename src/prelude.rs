//! Common imports for SDK users.

pub use crate::api::types::{
    CloudPath, CloudStorage, LoginParams, MatchRule, Media, Page, PickcodeCache, ScanTask, User,
};
pub use crate::api::FusionClient;
pub use crate::auth::{
    AuthStatus, EngineState, HttpQrAuth, QrCodeRequest, QrLoginEngine, QrSession, StoredCredential,
};
pub use crate::config::FusionConfig;
pub use crate::error::{FusionError, Result};
