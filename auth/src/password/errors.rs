use thiserror::Error;

/// Error type for password operations.
///
/// A wrong password is not an error: `verify` reports it as `Ok(false)`.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Invalid hashing parameters: {0}")]
    InvalidParameters(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is unreadable: {0}")]
    MalformedHash(String),
}
