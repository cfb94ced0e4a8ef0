//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Database
// =============================================================================

/// Default database host (for development)
pub const DEFAULT_DB_HOST: &str = "localhost";

/// Default database port
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Default database user (for development)
pub const DEFAULT_DB_USER: &str = "postgres";

/// Default database password (for development)
pub const DEFAULT_DB_PASSWORD: &str = "postgres";

/// Default database name
pub const DEFAULT_DB_NAME: &str = "user_directory";

/// Maximum number of pooled connections
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Connections kept open while the pool is idle
pub const DEFAULT_DB_MIN_CONNECTIONS: u32 = 1;

/// Seconds to wait for a new connection before giving up
pub const DB_CONNECT_TIMEOUT_SECONDS: u64 = 8;

// =============================================================================
// Validation
// =============================================================================

/// Minimum display name length requirement
pub const MIN_NAME_LENGTH: u64 = 1;

/// Maximum display name length (matches the column bound)
pub const MAX_NAME_LENGTH: u64 = 100;

/// Maximum email length (matches the column bound)
pub const MAX_EMAIL_LENGTH: u64 = 255;
