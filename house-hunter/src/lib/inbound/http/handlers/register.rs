use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::PasswordPolicyError;
use crate::domain::account::errors::RoleError;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Password;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn register<AS: AuthServicePort>(
    State(state): State<AppState<AS>>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::CREATED,
                MessageData::new("User registered successfully"),
            )
        })
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    full_name: String,
    role: String,
    phone_number: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid role: {0}")]
    Role(#[from] RoleError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let role = self.role.parse()?;
        let email = EmailAddress::new(&self.email)?;
        let password = Password::new(self.password)?;
        Ok(RegisterCommand::new(
            self.full_name,
            role,
            self.phone_number,
            email,
            password,
        ))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
