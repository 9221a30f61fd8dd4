//! Builders wiring repositories into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use user_service::domain::UserService;
use user_service::domain::ports::UserRepository;
use user_service::inbound::http::state::HttpState;
use user_service::outbound::memory::InMemoryUserRepository;
use user_service::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

fn state_over<R>(repository: R) -> HttpState
where
    R: UserRepository + 'static,
{
    HttpState::from_service(Arc::new(UserService::new(Arc::new(repository))))
}

/// Build the HTTP state, backed by PostgreSQL when a pool is configured and
/// by process memory otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL user repository");
            state_over(DieselUserRepository::new(pool.clone()))
        }
        None => {
            warn!("no database configured; users are kept in memory and lost on restart");
            state_over(InMemoryUserRepository::default())
        }
    };
    web::Data::new(state)
}
