use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures are reported in the order they are checked:
/// structure, then signature, then expiry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature does not match")]
    BadSignature,

    #[error("Token is expired")]
    Expired,
}
