use serde::{Deserialize, Serialize};

/// Input for requesting an authorization QR code.
#[derive(Debug, Clone, Serialize)]
pub struct QrCodeRequest {
    pub client_id: String,
    pub name: String,
}

impl QrCodeRequest {
    pub fn new(client_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            name: name.into(),
        }
    }
}

/// One in-progress authorization attempt.
///
/// `qr_code_data` is an opaque payload rendered into a scannable code; the
/// client displays it and never parses it. The session lives only as long as
/// the flow that created it.
#[derive(Debug, Clone, Deserialize)]
pub struct QrSession {
    pub qr_code_data: String,
    pub session_id: String,
}

/// Durable credentials returned when a confirmed session is finalized.
///
/// `storage_id` identifies the stored record: the id that was supplied on the
/// finalize call (re-authorization), or a freshly minted one (new storage).
#[derive(Debug, Clone, Deserialize)]
pub struct StoredCredential {
    pub storage_id: i64,
    pub access_token: String,
    pub refresh_token: String,
    /// Access-token lifetime in seconds.
    pub expires_in: u64,
}
