use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::Account;
use crate::domain::account::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_users<AS: AuthServicePort>(
    State(state): State<AppState<AS>>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    state
        .auth_service
        .list_accounts()
        .await
        .map_err(ApiError::from)
        .map(|accounts| {
            ApiSuccess::new(
                StatusCode::OK,
                accounts.iter().map(UserData::from).collect(),
            )
        })
}

/// Public view of an account. The password hash has no field here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub full_name: String,
    pub role: String,
    pub phone_number: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for UserData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            full_name: account.full_name.clone(),
            role: account.role.to_string(),
            phone_number: account.phone_number.clone(),
            email: account.email.to_string(),
            created_at: account.created_at,
        }
    }
}
