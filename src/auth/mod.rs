//! 115 QR authorization: wire client, polling engine, and session-token storage.

pub mod api;
pub mod engine;
pub mod error;
pub mod session;
pub mod status;
pub mod store;

pub use api::{HttpQrAuth, QrAuthApi};
pub use engine::{EngineState, QrLoginEngine};
pub use error::AuthError;
pub use session::{QrCodeRequest, QrSession, StoredCredential};
pub use status::AuthStatus;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, SessionToken};
