use async_trait::async_trait;
use auth::SessionClaims;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::IssuedSession;
use crate::domain::account::models::RegisterCommand;

/// Port for registration, login and session issuing.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated command containing profile fields and password
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `PasswordHashing` - Password could not be hashed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError>;

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `email` - Raw email as submitted (normalized internally)
    /// * `password` - Plaintext password
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `TokenIssuing` - Token could not be signed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AccountError>;

    /// Issue a new token for an already verified session, with a fresh expiry.
    ///
    /// # Errors
    /// * `TokenIssuing` - Token could not be signed
    fn reissue(&self, claims: &SessionClaims) -> Result<IssuedSession, AccountError>;

    /// List every registered account.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError>;
}

/// Durable storage of accounts keyed by normalized email.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve an account by exact match on normalized email.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;

    /// Persist a new account.
    ///
    /// Uniqueness of the email must be enforced by the store itself, atomically
    /// with the write: of two concurrent inserts for one email, exactly one
    /// succeeds.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve all accounts.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Account>, AccountError>;
}
