//! Items API routes
//!
//! Wires the items domain to the PostgreSQL pool.

use axum::Router;
use domain_items::{ItemService, PgItemRepository, handlers};

use crate::state::AppState;

/// Create items router
pub fn router(state: &AppState) -> Router {
    let repository = PgItemRepository::new(state.db.clone());
    let service = ItemService::with_policy(repository, state.config.items);

    handlers::router(service)
}
