//! Integration tests for the API surface.
//!
//! These tests use an in-memory user service to exercise the service
//! contract and the HTTP error/response shapes without requiring a
//! database connection. Live-database coverage lives in
//! `repository_test.rs` (run with `--ignored`).

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::Utc;

use user_directory::domain::{CreateUser, UpdateUser, User, UserResponse};
use user_directory::errors::{AppError, AppResult};
use user_directory::services::UserService;

// =============================================================================
// In-memory service for testing
// =============================================================================

/// In-memory user service mirroring the store's contract: ids are
/// server-assigned and sequential, emails are unique, update on an absent
/// id fails, delete is idempotent.
struct InMemoryUserService {
    rows: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl InMemoryUserService {
    fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserService for InMemoryUserService {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn get_user(&self, id: i64) -> AppResult<User> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn create_user(&self, data: CreateUser) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == data.email) {
            return Err(AppError::conflict("user"));
        }
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: data.name,
            email: data.email,
            created_at: Utc::now(),
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: i64, patch: UpdateUser) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(email) = &patch.email {
            if rows.iter().any(|u| u.email == *email && u.id != id) {
                return Err(AppError::conflict("user"));
            }
        }
        let user = rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound)?;
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        Ok(user.clone())
    }

    async fn delete_user(&self, id: i64) -> AppResult<()> {
        self.rows.lock().unwrap().retain(|u| u.id != id);
        Ok(())
    }
}

// =============================================================================
// Service contract tests
// =============================================================================

#[tokio::test]
async fn test_create_then_get_returns_equal_row() {
    let service = InMemoryUserService::new();

    let created = service
        .create_user(CreateUser {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
        })
        .await
        .unwrap();

    let fetched = service.get_user(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_duplicate_email_scenario() {
    let service = InMemoryUserService::new();

    // First create succeeds with server-assigned fields.
    let first = service
        .create_user(CreateUser {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(first.id, 1);
    assert_eq!(first.name, "Ann");
    assert_eq!(first.email, "ann@x.com");

    // Second create with the same email is a conflict.
    let second = service
        .create_user(CreateUser {
            name: "Ann2".to_string(),
            email: "ann@x.com".to_string(),
        })
        .await;
    assert!(matches!(second.unwrap_err(), AppError::Conflict(_)));

    // The first row is unaffected and is the only row.
    let all = service.list_users().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], first);
}

#[tokio::test]
async fn test_get_absent_user_is_not_found() {
    let service = InMemoryUserService::new();
    let result = service.get_user(12345).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_update_retains_unpatched_fields() {
    let service = InMemoryUserService::new();
    let created = service
        .create_user(CreateUser {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
        })
        .await
        .unwrap();

    let updated = service
        .update_user(
            created.id,
            UpdateUser {
                name: Some("Ann Q.".to_string()),
                email: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Ann Q.");
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn test_update_absent_user_is_not_found() {
    let service = InMemoryUserService::new();
    let result = service
        .update_user(
            999,
            UpdateUser {
                name: Some("Nobody".to_string()),
                email: None,
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let service = InMemoryUserService::new();
    let created = service
        .create_user(CreateUser {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
        })
        .await
        .unwrap();

    assert!(service.delete_user(created.id).await.is_ok());
    assert!(service.delete_user(created.id).await.is_ok());
    assert!(service.list_users().await.unwrap().is_empty());
}

// =============================================================================
// Error Type Tests
// =============================================================================

#[tokio::test]
async fn test_app_error_status_codes() {
    use axum::response::IntoResponse;

    let not_found = AppError::NotFound;
    let response = not_found.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let conflict = AppError::conflict("user");
    let response = conflict.into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let validation = AppError::validation("invalid field");
    let response = validation.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let internal = AppError::internal("server error");
    let response = internal.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_app_error_types() {
    let not_found = AppError::NotFound;
    let conflict = AppError::conflict("user");
    let validation = AppError::validation("invalid field");

    assert!(matches!(not_found, AppError::NotFound));
    assert!(matches!(conflict, AppError::Conflict(_)));
    assert!(matches!(validation, AppError::Validation(_)));
}

// =============================================================================
// Response Helper Tests
// =============================================================================

#[tokio::test]
async fn test_created_response_status() {
    use axum::response::IntoResponse;
    use user_directory::types::Created;

    let response = Created(serde_json::json!({"id": 1})).into_response();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_no_content_response_status() {
    use axum::response::IntoResponse;
    use user_directory::types::NoContent;

    let response = NoContent.into_response();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// =============================================================================
// Domain Model Tests
// =============================================================================

#[tokio::test]
async fn test_user_response_preserves_fields() {
    let user = User {
        id: 9,
        name: "Ann".to_string(),
        email: "ann@x.com".to_string(),
        created_at: Utc::now(),
    };

    let response = UserResponse::from(user.clone());
    assert_eq!(response.id, user.id);
    assert_eq!(response.name, user.name);
    assert_eq!(response.email, user.email);
    assert_eq!(response.created_at, user.created_at);
}
