use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by a session token.
///
/// The role is a snapshot taken at issue time; later changes to the account
/// are not reflected until a new token is issued.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Normalized email of the authenticated principal
    pub email: String,

    /// Role at issue time
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Claims issued now, expiring after `ttl`.
    pub fn issue(email: impl Into<String>, role: impl Into<String>, ttl: Duration) -> Self {
        Self::issued_at(email, role, Utc::now(), ttl)
    }

    /// Claims issued at an explicit instant, expiring after `ttl`.
    pub fn issued_at(
        email: impl Into<String>,
        role: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            email: email.into(),
            role: role.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    /// Same identity, new issue time and expiry.
    pub fn renewed(&self, ttl: Duration) -> Self {
        Self::issue(self.email.clone(), self.role.clone(), ttl)
    }

    /// A token is expired from its `exp` second onwards.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
