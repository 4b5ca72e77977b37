mod common;

use std::sync::Arc;

use chrono::Duration;
use chrono::Utc;
use common::RacingCredentialStore;
use common::TestApp;
use common::TestDb;
use house_hunter::domain::account::errors::AccountError;
use house_hunter::domain::account::models::Account;
use house_hunter::domain::account::models::AccountId;
use house_hunter::domain::account::models::EmailAddress;
use house_hunter::domain::account::models::Role;
use house_hunter::domain::account::ports::CredentialStore;
use house_hunter::outbound::repositories::PostgresCredentialStore;
use reqwest::StatusCode;

fn account(email: &str, full_name: &str) -> Account {
    Account {
        id: AccountId::new(),
        full_name: full_name.to_string(),
        role: Role::Owner,
        phone_number: "+1 555 0199".to_string(),
        email: EmailAddress::new(email).expect("valid email"),
        password_hash: "$argon2id$v=19$m=1024,t=1,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_insert_and_find_by_email() {
    let Some(db) = TestDb::try_new().await else {
        return;
    };
    let store = PostgresCredentialStore::new(db.pool.clone());

    let created = store
        .insert(account("olive@example.com", "Olive Owner"))
        .await
        .expect("Failed to insert account");

    let found = store
        .find_by_email(&EmailAddress::new("OLIVE@example.com ").unwrap())
        .await
        .expect("Failed to query account")
        .expect("account should exist");

    assert_eq!(found.id, created.id);
    assert_eq!(found.full_name, "Olive Owner");
    assert_eq!(found.role, Role::Owner);
    assert_eq!(found.password_hash, created.password_hash);

    let missing = store
        .find_by_email(&EmailAddress::new("nobody@example.com").unwrap())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_duplicate_insert_maps_to_email_already_exists() {
    let Some(db) = TestDb::try_new().await else {
        return;
    };
    let store = PostgresCredentialStore::new(db.pool.clone());

    store
        .insert(account("dup@example.com", "First"))
        .await
        .expect("Failed to insert account");

    let result = store.insert(account("dup@example.com", "Second")).await;

    assert!(matches!(
        result,
        Err(AccountError::EmailAlreadyExists(email)) if email == "dup@example.com"
    ));
    assert_eq!(db.count_with_email("dup@example.com").await, 1);
}

#[tokio::test]
async fn test_concurrent_inserts_keep_one_row() {
    let Some(db) = TestDb::try_new().await else {
        return;
    };
    let store = PostgresCredentialStore::new(db.pool.clone());

    let (first, second) = tokio::join!(
        store.insert(account("race@example.com", "First")),
        store.insert(account("race@example.com", "Second"))
    );

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        results
            .iter()
            .filter(|r| matches!(r, Err(AccountError::EmailAlreadyExists(_))))
            .count(),
        1
    );
    assert_eq!(db.count_with_email("race@example.com").await, 1);
}

#[tokio::test]
async fn test_concurrent_registrations_over_http_keep_one_row() {
    let Some(db) = TestDb::try_new().await else {
        return;
    };
    let store = RacingCredentialStore::wrapping(PostgresCredentialStore::new(db.pool.clone()), 2);
    let app = TestApp::spawn_with_store(Arc::new(store)).await;

    let (first, second) = tokio::join!(
        app.register("race@x.com", "p1"),
        app.register("race@x.com", "p2")
    );

    let mut statuses = [first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::BAD_REQUEST]);
    assert_eq!(db.count_with_email("race@x.com").await, 1);
}

#[tokio::test]
async fn test_schema_rejects_unnormalized_email() {
    let Some(db) = TestDb::try_new().await else {
        return;
    };

    let result = sqlx::query(
        r#"
        INSERT INTO accounts (id, full_name, role, phone_number, email, password_hash)
        VALUES ($1, 'Raw Insert', 'seeker', '+1 555 0000', ' Mixed@Example.com', 'x')
        "#,
    )
    .bind(uuid::Uuid::new_v4())
    .execute(&db.pool)
    .await;

    let err = result.expect_err("unnormalized email should violate the check");
    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.constraint(), Some("accounts_email_normalized"));
}

#[tokio::test]
async fn test_list_all_in_creation_order() {
    let Some(db) = TestDb::try_new().await else {
        return;
    };
    let store = PostgresCredentialStore::new(db.pool.clone());

    let mut older = account("older@example.com", "Older");
    older.created_at = Utc::now() - Duration::minutes(5);
    store.insert(account("newer@example.com", "Newer")).await.unwrap();
    store.insert(older).await.unwrap();

    let listed = store.list_all().await.expect("Failed to list accounts");

    let emails: Vec<&str> = listed.iter().map(|a| a.email.as_str()).collect();
    assert_eq!(emails, ["older@example.com", "newer@example.com"]);
}
