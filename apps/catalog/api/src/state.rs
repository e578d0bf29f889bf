//! Application state management.
//!
//! This module defines the shared application state passed to request
//! handlers. Handlers themselves are stateless; the state only carries the
//! configuration and the database connection pool they are wired up with.

/// Shared application state.
///
/// This struct is cloned for each handler (inexpensive Arc clones).
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
}
