//! Infrastructure layer - External systems integration
//!
//! This module handles the external system concerns:
//! - Database connection pool and migrations
//! - Repositories
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{UserRepository, UserStore};
pub use unit_of_work::{Persistence, TransactionContext, TxUserRepository, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
