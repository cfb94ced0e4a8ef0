//! User service - the typed seam between the HTTP layer and the store.
//!
//! Adds no business logic beyond the not-found policy on reads; each call
//! maps onto exactly one repository operation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{CreateUser, UpdateUser, User};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get user by ID; fails with NotFound when absent
    async fn get_user(&self, id: i64) -> AppResult<User>;

    /// Create a new user
    async fn create_user(&self, data: CreateUser) -> AppResult<User>;

    /// Apply a partial patch; fails with NotFound when the id is absent
    async fn update_user(&self, id: i64, patch: UpdateUser) -> AppResult<User>;

    /// Delete a user; deleting an absent id succeeds silently
    async fn delete_user(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.uow.users().find_all().await
    }

    async fn get_user(&self, id: i64) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_user(&self, data: CreateUser) -> AppResult<User> {
        self.uow.users().create(data).await
    }

    async fn update_user(&self, id: i64, patch: UpdateUser) -> AppResult<User> {
        self.uow.users().update(id, patch).await
    }

    async fn delete_user(&self, id: i64) -> AppResult<()> {
        self.uow.users().delete(id).await
    }
}
