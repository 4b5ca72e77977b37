use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::errors::TokenError;

/// Lifetime of a freshly issued session token.
pub fn default_ttl() -> Duration {
    Duration::hours(1)
}

/// Signs and verifies compact session tokens (HS256 JWT).
///
/// The secret is fixed for the codec's lifetime. Verification is pure
/// computation over the token bytes and the secret.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a codec with a symmetric signing secret.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Serialize and sign claims into a single opaque string.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn sign(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token against the current time.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token against an explicit Unix timestamp.
    ///
    /// Claims are returned only when the token is well formed, its signature
    /// matches and `now` is before its expiry.
    ///
    /// # Errors
    /// * `Malformed` - Token structure, header or payload could not be decoded
    /// * `BadSignature` - Signature does not match this codec's secret
    /// * `Expired` - `now` is at or past the embedded expiry
    pub fn verify_at(&self, token: &str, now: i64) -> Result<SessionClaims, TokenError> {
        self.decode_unverified(token)?;

        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against `now` with zero leeway.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed(e.to_string()),
            })?
            .claims;

        if claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Structural pass: three segments, a readable header and a payload that
    /// deserializes into claims. The signature is not looked at.
    fn decode_unverified(&self, token: &str) -> Result<SessionClaims, TokenError> {
        if token.split('.').count() != 3 {
            return Err(TokenError::Malformed(
                "expected three dot-separated segments".to_string(),
            ));
        }

        decode_header(token).map_err(|e| TokenError::Malformed(e.to_string()))?;

        let mut validation = Validation::new(self.algorithm);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::Malformed(e.to_string()))
    }
}
