//! Application services layer - Use cases over the persistence seam.
//!
//! Services depend on abstractions (traits) for dependency inversion and
//! use the Unit of Work for repository access and transaction management.

pub mod container;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use user_service::{UserManager, UserService};
