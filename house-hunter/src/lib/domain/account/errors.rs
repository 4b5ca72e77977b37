use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role '{0}' (expected 'seeker' or 'owner')")]
    Unknown(String),
}

/// Error for plaintext password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must not be empty")]
    Empty,
}

/// Top-level error for all account and session operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Input validation errors (automatically converted via #[from])
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    // Domain-level errors
    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    /// Unknown email and wrong password are deliberately the same error.
    #[error("Invalid credentials")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    PasswordHashing(String),

    #[error("Token issuing failed: {0}")]
    TokenIssuing(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Corrupt account record: {0}")]
    CorruptRecord(String),
}
