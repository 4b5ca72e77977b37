#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use auth::default_ttl;
use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenCodec;
use house_hunter::domain::account::errors::AccountError;
use house_hunter::domain::account::models::Account;
use house_hunter::domain::account::models::EmailAddress;
use house_hunter::domain::account::ports::CredentialStore;
use house_hunter::domain::account::service::AuthService;
use house_hunter::inbound::http::router::create_router;
use serde_json::json;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;
use tokio::sync::Barrier;
use tokio::sync::Mutex;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Credential store kept in memory.
///
/// The uniqueness check and the write happen under one lock, like a unique
/// index would enforce them.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    accounts: Mutex<Vec<Account>>,
}

impl InMemoryCredentialStore {
    pub async fn count_with_email(&self, email: &str) -> usize {
        self.accounts
            .lock()
            .await
            .iter()
            .filter(|a| a.email.as_str() == email)
            .count()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        Ok(self
            .accounts
            .lock()
            .await
            .iter()
            .find(|a| &a.email == email)
            .cloned())
    }

    async fn insert(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.lock().await;
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(AccountError::EmailAlreadyExists(account.email.to_string()));
        }
        accounts.push(account.clone());
        Ok(account)
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        Ok(self.accounts.lock().await.clone())
    }
}

/// Store whose lookups all wait until `parties` callers are inside
/// `find_by_email`, so concurrent registrations all pass the pre-check.
pub struct RacingCredentialStore<CS = InMemoryCredentialStore> {
    pub inner: CS,
    barrier: Barrier,
}

impl RacingCredentialStore {
    pub fn new(parties: usize) -> Self {
        Self::wrapping(InMemoryCredentialStore::default(), parties)
    }
}

impl<CS: CredentialStore> RacingCredentialStore<CS> {
    pub fn wrapping(inner: CS, parties: usize) -> Self {
        Self {
            inner,
            barrier: Barrier::new(parties),
        }
    }
}

#[async_trait]
impl<CS: CredentialStore> CredentialStore for RacingCredentialStore<CS> {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let found = self.inner.find_by_email(email).await?;
        self.barrier.wait().await;
        Ok(found)
    }

    async fn insert(&self, account: Account) -> Result<Account, AccountError> {
        self.inner.insert(account).await
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        self.inner.list_all().await
    }
}

/// Store that fails every call the way an unreachable database would.
pub struct UnavailableCredentialStore;

pub const UNAVAILABLE_DETAIL: &str = "pool timed out while connecting to 10.1.2.3:5432";

#[async_trait]
impl CredentialStore for UnavailableCredentialStore {
    async fn find_by_email(&self, _: &EmailAddress) -> Result<Option<Account>, AccountError> {
        Err(AccountError::DatabaseError(UNAVAILABLE_DETAIL.to_string()))
    }

    async fn insert(&self, _: Account) -> Result<Account, AccountError> {
        Err(AccountError::DatabaseError(UNAVAILABLE_DETAIL.to_string()))
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        Err(AccountError::DatabaseError(UNAVAILABLE_DETAIL.to_string()))
    }
}

/// Authenticator with a cheap work factor so tests stay fast.
pub fn test_authenticator() -> Arc<Authenticator> {
    Arc::new(Authenticator::with_hasher(
        PasswordHasher::with_params(1024, 1, 1).expect("valid params"),
        JWT_SECRET,
        default_ttl(),
    ))
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_codec: TokenCodec,
}

impl TestApp {
    /// Spawn the application with an empty in-memory store
    pub async fn spawn() -> (Self, Arc<InMemoryCredentialStore>) {
        let store = Arc::new(InMemoryCredentialStore::default());
        let app = Self::spawn_with_store(Arc::clone(&store)).await;
        (app, store)
    }

    /// Spawn the application in a background task on top of `store`
    pub async fn spawn_with_store<CS: CredentialStore>(store: Arc<CS>) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = test_authenticator();
        let auth_service = Arc::new(AuthService::new(store, Arc::clone(&authenticator)));
        let router = create_router(auth_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_codec: TokenCodec::new(JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request carrying a raw session token
    pub fn get_with_token(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).header(reqwest::header::AUTHORIZATION, token)
    }

    /// Helper to make POST request carrying a raw session token
    pub fn post_with_token(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).header(reqwest::header::AUTHORIZATION, token)
    }

    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/register")
            .json(&json!({
                "fullName": "Alice Tenant",
                "role": "seeker",
                "phoneNumber": "+1 555 0100",
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/login")
            .json(&json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register and log in, returning the session token
    pub async fn signed_in(&self, email: &str, password: &str) -> String {
        self.register(email, password).await;
        let body: serde_json::Value = self
            .login(email, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");
        body["token"]
            .as_str()
            .expect("login response should carry a token")
            .to_string()
    }
}

/// Throwaway Postgres database with migrations applied
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    admin_url: String,
}

impl TestDb {
    /// Create a uniquely named database on the server at `DATABASE_URL`.
    ///
    /// Returns `None` when `DATABASE_URL` is not set so the suite still runs
    /// on machines without Postgres.
    pub async fn try_new() -> Option<Self> {
        let Ok(admin_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping Postgres-backed test");
            return None;
        };

        let db_name = format!(
            "test_house_hunter_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&admin_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = admin_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            admin_url,
        })
    }

    pub async fn count_with_email(&self, email: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count accounts")
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Database cleanup happens asynchronously
        let db_name = self.db_name.clone();
        let admin_url = self.admin_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&admin_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}
