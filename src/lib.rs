pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod openapi;
pub mod rate_limit; // in-memory rate limiting
pub mod repo;
pub mod routes;
pub mod security;
pub mod seed;

use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::rate_limit::{InMemoryRateLimiter, RateLimiterFacade};
use crate::repo::inmem::InMemRepo;

// Re-export commonly used items for tests / external users
pub use routes::{config, AppState};
pub use security::SecurityHeaders;

/// Builds a fresh store (admin account plus optional sample data) and the
/// shared handler state around it.
pub async fn init_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    let repo = InMemRepo::new();
    seed::seed_admin(&repo, &cfg.admin_username, &cfg.admin_password).await?;
    if cfg.seed_sample_data {
        seed::seed_sample_data(&repo).await;
    }

    let tokens = TokenService::new(&cfg.jwt_secret, cfg.token_ttl);
    let mut state = AppState::new(Arc::new(repo), tokens);
    if let Some(limits) = &cfg.rate_limit {
        state = state.with_rate_limiter(RateLimiterFacade::new(InMemoryRateLimiter::new(), limits.clone()));
    }
    Ok(state)
}
