//! Shared state for the HTTP layer.

use std::sync::Arc;

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::db::{open_database, DatabaseError};

/// Shared context for all API routes.
///
/// Holds only immutable configuration. Each request opens its own
/// connection through `open_db()`, dropped when the handler returns.
#[derive(Clone)]
pub struct ApiContext {
    pub config: Arc<AppConfig>,
}

impl ApiContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Open a connection to the configured database.
    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        open_database(&self.config.database_path)
    }
}
