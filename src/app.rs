//! Router assembly: admin and public dashboard groups plus health probes.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use axum_server::Handle;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::routes::{dashboard, health, public};
use crate::AppState;

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.frontend_url);

    let admin_routes: Router<AppState> = Router::new()
        .route("/dashboard-stats", get(dashboard::stats))
        .route("/dashboard-cards", get(dashboard::cards))
        .route("/pending-approvals", get(dashboard::pending_approvals))
        .route("/engineers", get(dashboard::engineers))
        .route("/shops", get(dashboard::shops))
        .route("/ads", get(dashboard::ads));

    let public_routes: Router<AppState> = Router::new()
        .route("/counts", get(public::counts))
        .route("/simple-counts", get(public::simple_counts));

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api/v1/admin", admin_routes)
        .nest("/api/v1/public", public_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Allow the admin frontend origin with credentials so the token cookie is sent.
fn cors_layer(frontend_url: &str) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    match frontend_url.parse::<HeaderValue>() {
        Ok(origin) => base.allow_origin(origin).allow_credentials(true),
        Err(e) => {
            tracing::warn!(frontend_url, error = %e, "Invalid FRONTEND_URL, CORS origin not set");
            base
        }
    }
}

/// Time open connections get to finish once shutdown starts.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Wait for `signal`, then gracefully stop the server behind `handle`.
pub async fn shutdown_on<F>(handle: Handle<SocketAddr>, signal: F)
where
    F: Future<Output = ()>,
{
    signal.await;
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}
