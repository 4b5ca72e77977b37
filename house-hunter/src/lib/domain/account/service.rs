use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::SessionClaims;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::IssuedSession;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::ports::AuthServicePort;
use crate::domain::account::ports::CredentialStore;

/// Domain service implementation for registration and login.
///
/// Concrete implementation of AuthServicePort with dependency injection.
pub struct AuthService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    authenticator: Arc<Authenticator>,
}

impl<CS> AuthService<CS>
where
    CS: CredentialStore,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Account persistence implementation
    /// * `authenticator` - Password hashing and token signing
    pub fn new(store: Arc<CS>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            store,
            authenticator,
        }
    }
}

#[async_trait]
impl<CS> AuthServicePort for AuthService<CS>
where
    CS: CredentialStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError> {
        // Fast path only: the store's unique constraint is authoritative.
        if self.store.find_by_email(&command.email).await?.is_some() {
            tracing::info!(role = %command.role, "Registration rejected: email already exists");
            return Err(AccountError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())
            .map_err(|e| AccountError::PasswordHashing(e.to_string()))?;

        let account = Account {
            id: AccountId::new(),
            full_name: command.full_name,
            role: command.role,
            phone_number: command.phone_number,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created = self.store.insert(account).await?;

        tracing::info!(
            account_id = %created.id,
            role = %created.role,
            "Account registered"
        );

        Ok(created)
    }

    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AccountError> {
        let email = EmailAddress::new(email).map_err(|_| AccountError::InvalidCredentials)?;

        let Some(account) = self.store.find_by_email(&email).await? else {
            self.authenticator.reject_unknown_account(password);
            return Err(AccountError::InvalidCredentials);
        };

        let result = self
            .authenticator
            .authenticate(
                password,
                &account.password_hash,
                account.email.as_str(),
                account.role.as_str(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AccountError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => {
                    AccountError::CorruptRecord(format!("account {}: {}", account.id, err))
                }
                AuthenticationError::TokenError(err) => AccountError::TokenIssuing(err.to_string()),
            })?;

        tracing::debug!(account_id = %account.id, "Session issued");

        Ok(IssuedSession {
            token: result.access_token,
            claims: result.claims,
        })
    }

    fn reissue(&self, claims: &SessionClaims) -> Result<IssuedSession, AccountError> {
        let result = self
            .authenticator
            .reissue(claims)
            .map_err(|e| AccountError::TokenIssuing(e.to_string()))?;

        Ok(IssuedSession {
            token: result.access_token,
            claims: result.claims,
        })
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError> {
        self.store.list_all().await
    }
}
