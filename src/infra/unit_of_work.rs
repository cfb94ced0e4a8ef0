//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and manages the transaction lifecycle:
//! statements issued through one `TransactionContext` run on a single
//! borrowed connection and commit or roll back together.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::sync::Arc;

use super::repositories::{queries, UserRepository, UserStore};
use crate::domain::{CreateUser, UpdateUser, User};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Note: the generic `transaction` method makes this trait non-object-safe;
/// consumers stay generic over it. For testing, mock at the repository or
/// service level.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed when the closure succeeds; any error
    /// rolls back every write issued inside the scope and propagates to the
    /// caller unchanged.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get user repository for this transaction
    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(UserStore::new(db.clone()));
        Self { db, user_repo }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-scoped user repository.
///
/// Executes the same statements as `UserStore`, but on the borrowed
/// transaction connection, so writes are atomic with the enclosing scope.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// All rows, ordered by id
    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        queries::find_all(self.txn).await
    }

    /// Zero-or-one row; an absent id is not an error
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        queries::find_by_id(self.txn, id).await
    }

    /// Insert one row, returning it with the server-assigned fields
    pub async fn create(&self, data: CreateUser) -> AppResult<User> {
        queries::create(self.txn, data).await
    }

    /// Apply a partial patch; fails with NotFound when the id is absent
    pub async fn update(&self, id: i64, patch: UpdateUser) -> AppResult<User> {
        queries::update(self.txn, id, patch).await
    }

    /// Delete by id; deleting an absent id succeeds silently
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        queries::delete(self.txn, id).await
    }
}

/// Simpler API for executing transactional operations.
///
/// This helper macro reduces boilerplate when using transactions.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
