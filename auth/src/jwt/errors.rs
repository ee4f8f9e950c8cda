use thiserror::Error;

/// Error type for JWT operations.
///
/// Verification failures are kept distinct for logging; callers at the HTTP
/// boundary collapse them into a single rejection.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to read key file {path}: {reason}")]
    KeyUnreadable { path: String, reason: String },

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}
