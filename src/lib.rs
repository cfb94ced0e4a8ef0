//! User Directory - A CRUD API over a single users table
//!
//! This crate provides a layered Axum + SeaORM service: a bounded
//! connection pool, a declarative entity schema, a dependency-injected
//! repository/unit-of-work seam, and a thin HTTP handler layer.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities
//! - **services**: Application use cases over the persistence seam
//! - **infra**: Infrastructure concerns (pool, repositories, transactions)
//! - **api**: HTTP handlers and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{CreateUser, UpdateUser, User};
pub use errors::{AppError, AppResult};
