//! Application state - Dependency injection container.
//!
//! Built once at startup and cloned into every handler; all services are
//! injected through constructors, never looked up ambiently.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{ServiceContainer, Services, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Database connection pool
    pub database: Arc<Database>,
    /// Internal service container (only with from_database)
    service_container: Option<Arc<Services>>,
}

impl AppState {
    /// Create application state from the database pool.
    ///
    /// This is the recommended way to create AppState as it uses
    /// the ServiceContainer for centralized service management.
    pub fn from_database(database: Arc<Database>) -> Self {
        let container = Arc::new(Services::from_connection(database.get_connection()));

        Self {
            user_service: container.users(),
            database,
            service_container: Some(container),
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(user_service: Arc<dyn UserService>, database: Arc<Database>) -> Self {
        Self {
            user_service,
            database,
            service_container: None,
        }
    }

    /// Get the service container for centralized service access.
    ///
    /// Returns `Some` only if created via `from_database()`.
    pub fn services(&self) -> Option<&Arc<Services>> {
        self.service_container.as_ref()
    }
}
