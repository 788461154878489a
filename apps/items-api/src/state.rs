//! Shared application state passed to route builders and handlers.

use sea_orm::DatabaseConnection;

use crate::config::Config;

/// Cloned per handler; the connection is a shared pool.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(config: Config, db: DatabaseConnection) -> Self {
        Self { config, db }
    }
}
