use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::account::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Unknown email and wrong password produce the same 401 response.
pub async fn login<AS: AuthServicePort>(
    State(state): State<AppState<AS>>,
    ApiJson(body): ApiJson<LoginRequestBody>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    state
        .auth_service
        .login(&body.email, &body.password)
        .await
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

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub token: String,
}
