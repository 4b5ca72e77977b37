//! Authentication utilities library
//!
//! Provides the credential and session primitives used by the service:
//! - Password hashing (Argon2id, salted PHC strings)
//! - Signed, time-bounded session tokens (HS256 JWT)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other_password", &hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{default_ttl, SessionClaims, TokenCodec};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = SessionClaims::issue("a@x.com", "seeker", default_ttl());
//! let token = codec.sign(&claims).unwrap();
//! assert_eq!(codec.verify(&token).unwrap(), claims);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{default_ttl, Authenticator};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", default_ttl());
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, "a@x.com", "owner").unwrap();
//!
//! // Gate: validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.email, "a@x.com");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::default_ttl;
pub use jwt::SessionClaims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
