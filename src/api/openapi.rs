//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::user_handler;
use crate::domain::{CreateUser, UpdateUser, UserResponse};

/// OpenAPI documentation for the User Directory API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Directory API",
        version = "0.1.0",
        description = "A user directory REST API with Axum, SeaORM, and clean architecture",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "API Support", email = "support@example.com")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        user_handler::list_users,
        user_handler::get_user,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
    ),
    components(
        schemas(
            CreateUser,
            UpdateUser,
            UserResponse,
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
        )
    ),
    tags(
        (name = "Users", description = "User directory CRUD operations")
    )
)]
pub struct ApiDoc;
