//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User domain entity, one fully populated row.
///
/// `id` and `created_at` are assigned by the database and never change
/// after insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// User creation data transfer object (the insertable shape).
///
/// Omits the server-assigned fields (`id`, `created_at`).
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct CreateUser {
    /// User display name
    #[schema(example = "Ann Example")]
    pub name: String,
    /// Contact email, unique across all users
    #[schema(example = "ann@example.com")]
    pub email: String,
}

/// User update data transfer object; any subset of the mutable fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct UpdateUser {
    /// New display name
    #[schema(example = "Ann Q. Example")]
    pub name: Option<String>,
    /// New contact email
    #[schema(example = "ann.q@example.com")]
    pub email: Option<String>,
}

impl UpdateUser {
    /// True when the patch carries no fields.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

/// User response (the HTTP representation of a row)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = 1)]
    pub id: i64,
    /// User display name
    #[schema(example = "Ann Example")]
    pub name: String,
    /// Contact email
    #[schema(example = "ann@example.com")]
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}
