//! Integration tests against a live PostgreSQL instance.
//!
//! These exercise the real store and transaction scope. They are ignored
//! by default; to run them:
//! 1. Start PostgreSQL and point DB_* (or DATABASE_URL) at it
//! 2. Run: cargo test -- --ignored

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use user_directory::config::Config;
use user_directory::domain::{CreateUser, UpdateUser};
use user_directory::errors::AppError;
use user_directory::infra::{Database, Persistence, UnitOfWork, UserRepository, UserStore};
use user_directory::with_transaction;

static EMAIL_SEQ: AtomicU32 = AtomicU32::new(0);

/// Emails unique across tests and across repeated runs of the same binary.
fn unique_email(tag: &str) -> String {
    let n = EMAIL_SEQ.fetch_add(1, Ordering::SeqCst);
    format!("{}-{}-{}@example.com", tag, std::process::id(), n)
}

async fn connect() -> Database {
    let config = Config::from_env();
    Database::connect(&config)
        .await
        .expect("PostgreSQL must be reachable for ignored tests")
}

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_create_then_find_by_id_round_trip() {
    let db = connect().await;
    let store = UserStore::new(db.get_connection());

    let created = store
        .create(CreateUser {
            name: "Round Trip".to_string(),
            email: unique_email("roundtrip"),
        })
        .await
        .unwrap();

    assert!(created.id > 0);

    let fetched = store.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);

    store.delete(created.id).await.unwrap();
}

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_find_by_id_absent_returns_none() {
    let db = connect().await;
    let store = UserStore::new(db.get_connection());

    let result = store.find_by_id(i64::MAX).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_duplicate_email_is_a_conflict() {
    let db = connect().await;
    let store = UserStore::new(db.get_connection());
    let email = unique_email("conflict");

    let first = store
        .create(CreateUser {
            name: "First".to_string(),
            email: email.clone(),
        })
        .await
        .unwrap();

    let second = store
        .create(CreateUser {
            name: "Second".to_string(),
            email: email.clone(),
        })
        .await;
    assert!(matches!(second.unwrap_err(), AppError::Conflict(_)));

    // The first row is unaffected by the failed insert.
    let fetched = store.find_by_id(first.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "First");
    assert_eq!(fetched.email, email);

    store.delete(first.id).await.unwrap();
}

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_delete_is_idempotent() {
    let db = connect().await;
    let store = UserStore::new(db.get_connection());

    let created = store
        .create(CreateUser {
            name: "To Delete".to_string(),
            email: unique_email("delete"),
        })
        .await
        .unwrap();

    assert!(store.delete(created.id).await.is_ok());
    // Second delete of the same id is silently successful.
    assert!(store.delete(created.id).await.is_ok());
    // As is deleting an id that never existed.
    assert!(store.delete(i64::MAX).await.is_ok());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_update_patches_only_given_fields() {
    let db = connect().await;
    let store = UserStore::new(db.get_connection());
    let email = unique_email("patch");

    let created = store
        .create(CreateUser {
            name: "Before".to_string(),
            email: email.clone(),
        })
        .await
        .unwrap();

    let updated = store
        .update(
            created.id,
            UpdateUser {
                name: Some("After".to_string()),
                email: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "After");
    assert_eq!(updated.email, email);
    assert_eq!(updated.created_at, created.created_at);

    store.delete(created.id).await.unwrap();
}

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_update_absent_id_is_not_found() {
    let db = connect().await;
    let store = UserStore::new(db.get_connection());

    let result = store
        .update(
            i64::MAX,
            UpdateUser {
                name: Some("Nobody".to_string()),
                email: None,
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_transaction_commits_on_success() {
    let db = connect().await;
    let uow = Persistence::new(db.get_connection());
    let email = unique_email("commit");

    let created = with_transaction!(uow, |ctx| {
        ctx.users()
            .create(CreateUser {
                name: "Committed".to_string(),
                email,
            })
            .await
    })
    .unwrap();

    let store = UserStore::new(db.get_connection());
    let fetched = store.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);

    store.delete(created.id).await.unwrap();
}

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_transaction_rolls_back_on_error() {
    let db = connect().await;
    let uow = Persistence::new(db.get_connection());
    let email = unique_email("rollback");

    let first_id = Arc::new(Mutex::new(None::<i64>));
    let captured = first_id.clone();

    let result: Result<(), AppError> = with_transaction!(uow, |ctx| {
        let repo = ctx.users();
        let first = repo
            .create(CreateUser {
                name: "Txn One".to_string(),
                email: email.clone(),
            })
            .await?;
        captured.lock().unwrap().replace(first.id);

        // Same email violates the unique constraint and poisons the scope.
        repo.create(CreateUser {
            name: "Txn Two".to_string(),
            email: email.clone(),
        })
        .await?;
        Ok(())
    });

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));

    // The first write happened inside the failed scope and must be gone.
    let id = first_id.lock().unwrap().take().expect("first insert ran");
    let store = UserStore::new(db.get_connection());
    assert!(store.find_by_id(id).await.unwrap().is_none());
}
