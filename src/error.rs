use thiserror::Error;

/// Failure taxonomy for everything the client does against the backend.
///
/// Expiry of a stall hold is deliberately not represented here: it is a
/// client-detected state transition surfaced through [`crate::store::LockNotice`],
/// not an error.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caught before any network call (empty selection, active hold, ...).
    #[error("{0}")]
    Validation(String),

    /// The backend refused the request, e.g. a stall was taken concurrently.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A 401 response. Stored credentials have already been cleared.
    #[error("session expired, please sign in again")]
    SessionExpired,

    /// Network-level failure. The operation is left retryable by the user.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered 2xx but the payload did not match expectations.
    #[error("unexpected response payload: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Rejected { status, .. } if *status == 409)
    }
}
