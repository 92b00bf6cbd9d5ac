pub mod app;
pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use sqlx::PgPool;

use crate::config::synthetic::SyntheticMetrics;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: config::AppConfig,
    /// Placeholder dashboard figures, `None` when disabled by configuration.
    pub synthetic: Option<SyntheticMetrics>,
}

impl AppState {
    pub fn new(db: PgPool, config: config::AppConfig) -> Self {
        let synthetic = SyntheticMetrics::from_flag(config.synthetic_metrics);
        Self {
            db,
            config,
            synthetic,
        }
    }
}
