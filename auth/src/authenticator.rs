use chrono::Duration;

use crate::jwt::SessionClaims;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Password hashed once at construction so that lookups for unknown
/// accounts still pay for a full verification.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Authentication coordinator combining password verification and token issuing.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    token_ttl: Duration,
    decoy_hash: Option<String>,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
    /// Claims embedded in `access_token`
    pub claims: SessionClaims,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self::with_hasher(PasswordHasher::new(), jwt_secret, token_ttl)
    }

    /// Create an authenticator around an explicitly configured hasher.
    pub fn with_hasher(
        password_hasher: PasswordHasher,
        jwt_secret: &[u8],
        token_ttl: Duration,
    ) -> Self {
        let decoy_hash = password_hasher.hash(DECOY_PASSWORD).ok();

        Self {
            password_hasher,
            token_codec: TokenCodec::new(jwt_secret),
            token_ttl,
            decoy_hash,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Empty password or hashing failure
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token for `email`/`role`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unreadable
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        email: &str,
        role: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let claims = SessionClaims::issue(email, role, self.token_ttl);
        let access_token = self.token_codec.sign(&claims)?;

        Ok(AuthenticationResult {
            access_token,
            claims,
        })
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Runs one verification against the decoy hash first, so the caller
    /// spends the same hashing work as for a wrong password.
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        if let Some(decoy_hash) = &self.decoy_hash {
            let _ = self.password_hasher.verify(password, decoy_hash);
        }
        AuthenticationError::InvalidCredentials
    }

    /// Issue a token for an identity that was already authenticated,
    /// with a fresh expiry.
    pub fn reissue(&self, claims: &SessionClaims) -> Result<AuthenticationResult, TokenError> {
        let claims = claims.renewed(self.token_ttl);
        let access_token = self.token_codec.sign(&claims)?;

        Ok(AuthenticationResult {
            access_token,
            claims,
        })
    }

    /// Validate and decode a session token.
    ///
    /// # Errors
    /// * `TokenError` - Token is malformed, wrongly signed or expired
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.token_codec.verify(token)
    }
}
