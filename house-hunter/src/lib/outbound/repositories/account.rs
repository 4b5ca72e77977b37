use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Role;
use crate::domain::account::ports::CredentialStore;

/// Name of the unique constraint on `accounts.email`.
const EMAIL_UNIQUE_CONSTRAINT: &str = "accounts_email_key";

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    full_name: String,
    role: String,
    phone_number: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = move |e: String| AccountError::CorruptRecord(format!("account {id}: {e}"));

        let role = row
            .role
            .parse::<Role>()
            .map_err(|e| corrupt(e.to_string()))?;
        let email = EmailAddress::new(&row.email).map_err(|e| corrupt(e.to_string()))?;

        Ok(Account {
            id: AccountId(id),
            full_name: row.full_name,
            role,
            phone_number: row.phone_number,
            email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, full_name, role, phone_number, email, password_hash, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn insert(&self, account: Account) -> Result<Account, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, full_name, role, phone_number, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(account.id.0)
        .bind(&account.full_name)
        .bind(account.role.as_str())
        .bind(&account.phone_number)
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return AccountError::EmailAlreadyExists(account.email.to_string());
                }
            }
            AccountError::DatabaseError(e.to_string())
        })?;

        Ok(account)
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, full_name, role, phone_number, email, password_hash, created_at
            FROM accounts
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Account::try_from).collect()
    }
}
