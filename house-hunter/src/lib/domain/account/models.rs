use std::fmt;
use std::str::FromStr;

use auth::SessionClaims;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::PasswordPolicyError;
use crate::domain::account::errors::RoleError;

/// Account aggregate entity.
///
/// Created by registration and never modified afterwards.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub full_name: String,
    pub role: Role,
    pub phone_number: String,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type, the unique identity key of an account.
///
/// Normalized by trimming surrounding whitespace and lowercasing, so
/// `A@X.com` and `a@x.com` name the same account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalize and validate an email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: impl AsRef<str>) -> Result<Self, EmailError> {
        let normalized = email.as_ref().trim().to_lowercase();

        email_address::EmailAddress::from_str(&normalized)
            .map(|_| EmailAddress(normalized))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Marketplace role of an account.
///
/// Recorded at registration and copied into session tokens; no operation
/// grants or denies access based on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Seeker,
    Owner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Seeker => "seeker",
            Role::Owner => "owner",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "seeker" => Ok(Role::Seeker),
            "owner" => Ok(Role::Owner),
            _ => Err(RoleError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plaintext password as received from a client.
///
/// Never printed: `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// # Errors
    /// * `Empty` - Password is the empty string
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(****)")
    }
}

/// Command to register a new account with validated fields
#[derive(Debug)]
pub struct RegisterCommand {
    pub full_name: String,
    pub role: Role,
    pub phone_number: String,
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `full_name` - Display name, not unique
    /// * `role` - Marketplace role
    /// * `phone_number` - Opaque contact data
    /// * `email` - Normalized email address
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(
        full_name: String,
        role: Role,
        phone_number: String,
        email: EmailAddress,
        password: Password,
    ) -> Self {
        Self {
            full_name,
            role,
            phone_number,
            email,
            password,
        }
    }
}

/// A signed session token and the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub claims: SessionClaims,
}
