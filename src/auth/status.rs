use super::error::AuthError;

/// Authorization status reported by the 115 status endpoint.
///
/// The wire value is a bare integer (`0`, `1`, `2`, `-2`); it is converted
/// into this enum immediately on receipt so nothing downstream matches on
/// raw numbers. The happy path advances `WaitingScan → ScanSuccess →
/// LoginSuccess`, but the poll cadence may skip `ScanSuccess`, and
/// `Cancelled` can arrive from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    WaitingScan,
    ScanSuccess,
    LoginSuccess,
    Cancelled,
}

impl AuthStatus {
    /// Convert the wire integer, rejecting codes outside the closed set.
    pub fn from_wire(value: i64) -> Result<Self, AuthError> {
        match value {
            0 => Ok(Self::WaitingScan),
            1 => Ok(Self::ScanSuccess),
            2 => Ok(Self::LoginSuccess),
            -2 => Ok(Self::Cancelled),
            other => Err(AuthError::UnknownStatus(other)),
        }
    }

    pub fn as_wire(self) -> i64 {
        match self {
            Self::WaitingScan => 0,
            Self::ScanSuccess => 1,
            Self::LoginSuccess => 2,
            Self::Cancelled => -2,
        }
    }

    /// Whether this status ends the polling loop.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::LoginSuccess | Self::Cancelled)
    }
}
