//! User repository - pooled data access for the users table.
//!
//! Each operation borrows one connection from the pool, executes a single
//! statement, and returns the connection when the future completes. The
//! transaction-scoped variant in `unit_of_work` runs the same query bodies
//! against a borrowed transaction instead.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::domain::{CreateUser, UpdateUser, User};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All rows, ordered by id
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Zero-or-one row; an absent id is not an error
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Insert one row, returning it with the server-assigned fields
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    /// Apply a partial patch; fails with NotFound when the id is absent
    async fn update(&self, id: i64, patch: UpdateUser) -> AppResult<User>;

    /// Delete by id; deleting an absent id succeeds silently
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Pool-backed implementation of `UserRepository`.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create a new store over the shared pool handle
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        queries::find_all(&self.db).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        queries::find_by_id(&self.db, id).await
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        queries::create(&self.db, data).await
    }

    async fn update(&self, id: i64, patch: UpdateUser) -> AppResult<User> {
        queries::update(&self.db, id, patch).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        queries::delete(&self.db, id).await
    }
}

/// Query bodies shared by the pooled store and the transaction-scoped
/// repository. Generic over `ConnectionTrait` so the same statement runs
/// against either a pool handle or a live transaction.
pub(crate) mod queries {
    use sea_orm::ActiveValue::{Set, Unchanged};
    use sea_orm::{
        ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, QueryOrder, SqlErr,
    };

    use crate::domain::{CreateUser, UpdateUser, User};
    use crate::errors::{AppError, AppResult};
    use crate::infra::repositories::entities::user::{self, Entity as UserEntity};

    pub(crate) async fn find_all<C: ConnectionTrait>(conn: &C) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(conn)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    pub(crate) async fn find_by_id<C: ConnectionTrait>(
        conn: &C,
        id: i64,
    ) -> AppResult<Option<User>> {
        let model = UserEntity::find_by_id(id)
            .one(conn)
            .await
            .map_err(AppError::from)?;

        Ok(model.map(User::from))
    }

    pub(crate) async fn create<C: ConnectionTrait>(conn: &C, data: CreateUser) -> AppResult<User> {
        // id and created_at stay NotSet so the database assigns them.
        let active = user::ActiveModel {
            name: Set(data.name),
            email: Set(data.email),
            ..Default::default()
        };

        let model = active.insert(conn).await.map_err(classify_write_err)?;
        Ok(User::from(model))
    }

    pub(crate) async fn update<C: ConnectionTrait>(
        conn: &C,
        id: i64,
        patch: UpdateUser,
    ) -> AppResult<User> {
        // Nothing to write; existence is still required.
        if patch.is_empty() {
            return find_by_id(conn, id).await?.ok_or(AppError::NotFound);
        }

        // Single UPDATE carrying only the patched columns.
        let mut active = user::ActiveModel {
            id: Unchanged(id),
            ..Default::default()
        };
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(email) = patch.email {
            active.email = Set(email);
        }

        let model = active.update(conn).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => AppError::NotFound,
            other => classify_write_err(other),
        })?;

        Ok(User::from(model))
    }

    pub(crate) async fn delete<C: ConnectionTrait>(conn: &C, id: i64) -> AppResult<()> {
        // Rows-affected is deliberately ignored: delete is idempotent.
        UserEntity::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    /// Unique-constraint violations become conflicts; everything else
    /// surfaces as a database error.
    fn classify_write_err(e: DbErr) -> AppError {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("user"),
            _ => AppError::Database(e),
        }
    }
}
