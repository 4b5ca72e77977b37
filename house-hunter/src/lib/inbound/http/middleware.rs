use auth::Authenticator;
use auth::SessionClaims;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use http::header::AUTHORIZATION;
use http::HeaderMap;
use thiserror::Error;

use crate::domain::account::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the verified session into downstream handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub claims: SessionClaims,
}

/// Why a request was stopped at the session gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Missing token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidOrExpiredToken,
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::MissingToken => ApiError::Unauthorized(err.to_string()),
            SessionError::InvalidOrExpiredToken => ApiError::Forbidden(err.to_string()),
        }
    }
}

/// Middleware that validates the session token and attaches its claims
/// to the request
pub async fn require_session<AS: AuthServicePort>(
    State(state): State<AppState<AS>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = resolve_session(req.headers(), &state.authenticator)?;

    req.extensions_mut().insert(AuthenticatedUser { claims });

    Ok(next.run(req).await)
}

/// Extract the token from the headers and verify it.
pub fn resolve_session(
    headers: &HeaderMap,
    authenticator: &Authenticator,
) -> Result<SessionClaims, SessionError> {
    let token = extract_token(headers)?;

    authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Session token rejected");
        SessionError::InvalidOrExpiredToken
    })
}

/// The header carries the raw token; a `Bearer ` prefix is tolerated.
fn extract_token(headers: &HeaderMap) -> Result<&str, SessionError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(SessionError::MissingToken)?;

    let value = header
        .to_str()
        .map_err(|_| SessionError::InvalidOrExpiredToken)?;

    let token = value.strip_prefix("Bearer ").unwrap_or(value);
    if token.is_empty() {
        return Err(SessionError::MissingToken);
    }

    Ok(token)
}
