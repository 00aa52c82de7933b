//! careboard-server library crate
//!
//! Exposes `build_app`, `config`, and the search/state seams for
//! integration tests. The actual binary entrypoint is in `main.rs`.

pub mod ai;
pub mod config;
mod error;
mod middleware;
mod routes;
pub mod search;
pub mod state;
pub mod users;

use axum::{Extension, Router, middleware as axum_mw, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use middleware::ApiKeyAuth;
use search::SearchBackend;
use state::AppState;

/// Build the full application router with all routes and middleware.
///
/// Extracted from `main()` so integration tests can construct the app
/// without binding to a TCP port or reaching a live index.
pub fn build_app<B>(state: AppState<B>, config: &Config) -> Router
where
    B: SearchBackend + Clone + Send + Sync + 'static,
{
    // Create auth state
    let auth = ApiKeyAuth::new(config.api_key.clone());

    // Create rate limiter
    let rate_limiter = middleware::create_rate_limiter(config.rate_limit_rps);

    // Protected routes (require auth)
    let protected_routes = Router::new()
        .nest("/api", routes::api_routes::<B>())
        .layer(axum_mw::from_fn(middleware::auth::auth_middleware))
        .layer(Extension(auth))
        .layer(axum_mw::from_fn(middleware::rate_limit_middleware))
        .layer(Extension(rate_limiter));

    // Install Prometheus metrics recorder.
    // Use build_recorder() + set_global_recorder() so that repeated calls
    // (e.g. in integration tests) don't panic — the second install is
    // silently ignored and we still get a valid handle for /metrics.
    let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
    let prometheus_handle = recorder.handle();
    let _ = metrics::set_global_recorder(recorder);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(routes::health::check::<B>))
        .route("/metrics", get(routes::metrics::get))
        .nest("/auth", routes::auth_routes::<B>())
        .layer(Extension(prometheus_handle));

    // Build CORS layer
    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Build application
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .layer(axum_mw::from_fn(middleware::audit_middleware))
        .layer(axum_mw::from_fn(middleware::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum_mw::from_fn(middleware::metrics_middleware))
}
