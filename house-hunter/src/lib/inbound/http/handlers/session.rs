//! Handlers behind the session gate.
//!
//! Each receives the verified claims through the `AuthenticatedUser` request
//! extension; none of them looks at the role.

use auth::SessionClaims;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::login::TokenResponseData;
use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::account::ports::AuthServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityResponseData {
    pub message: String,
    pub user: SessionClaims,
}

pub async fn protected(
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiSuccess<IdentityResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        IdentityResponseData {
            message: "This is a protected route".to_string(),
            user: user.claims,
        },
    )
}

pub async fn secured_endpoint(
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiSuccess<IdentityResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        IdentityResponseData {
            message: "Access granted".to_string(),
            user: user.claims,
        },
    )
}

/// Issue a fresh token for the caller's identity.
pub async fn reissue_token<AS: AuthServicePort>(
    State(state): State<AppState<AS>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    state
        .auth_service
        .reissue(&user.claims)
        .map_err(ApiError::from)
        .map(|session| {
            ApiSuccess::new(
                StatusCode::OK,
                TokenResponseData {
                    token: session.token,
                },
            )
        })
}

/// Sessions are stateless: the token stays valid until it expires.
pub async fn logout(Extension(user): Extension<AuthenticatedUser>) -> ApiSuccess<MessageData> {
    tracing::info!(role = %user.claims.role, "Logout acknowledged");
    ApiSuccess::new(StatusCode::OK, MessageData::new("Logged out"))
}
