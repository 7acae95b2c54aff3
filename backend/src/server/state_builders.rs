//! Builders for the HTTP state over the configured storage.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use worklog::domain::PasswordHasher;
use worklog::inbound::http::state::HttpState;
use worklog::outbound::in_memory::InMemoryStore;
use worklog::outbound::persistence::{
    DbPool, DieselDepartmentRepository, DieselJobRepository, DieselUserRepository,
};

use super::ServerConfig;

fn diesel_state(pool: &DbPool) -> HttpState {
    HttpState::from_repositories(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselJobRepository::new(pool.clone())),
        Arc::new(DieselDepartmentRepository::new(pool.clone())),
        PasswordHasher::default(),
    )
}

fn in_memory_state() -> HttpState {
    let store = Arc::new(InMemoryStore::default());
    HttpState::from_repositories(
        store.clone(),
        store.clone(),
        store,
        PasswordHasher::default(),
    )
}

/// Build the handler state, preferring PostgreSQL when a pool is configured.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            diesel_state(pool)
        }
        None => {
            warn!("no database configured; records are kept in memory and lost on exit");
            in_memory_state()
        }
    };
    web::Data::new(state)
}
