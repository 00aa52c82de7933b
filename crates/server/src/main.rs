//! careboard-server: patient search and reporting HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use careboard_server::ai::InterpreterClient;
use careboard_server::config::Config;
use careboard_server::search::ElasticClient;
use careboard_server::state::AppState;
use careboard_server::users::InMemoryUserStore;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = Config::from_env();

    // Build the search index client
    let search = ElasticClient::new(
        config.search_url.clone(),
        config.search_api_key.clone(),
        config.search_index.clone(),
        config.outbound_timeout,
    )
    .expect("Failed to build search client");

    // Build the interpreter client (None if no key configured)
    let interpreter = config.interpreter_api_key.as_ref().map(|key| {
        InterpreterClient::new(
            key.clone(),
            config.interpreter_model.clone(),
            config.interpreter_url.clone(),
            config.outbound_timeout,
        )
        .expect("Failed to build interpreter client")
    });

    // Log startup info
    if config.api_key.is_some() {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!("API key authentication disabled (no API_KEY env var)");
    }
    if interpreter.is_some() {
        tracing::info!("Interpreter configured, natural-language search enabled");
    } else {
        tracing::warn!("INTERPRETER_API_KEY not set, relying on fallback extraction only");
    }
    tracing::info!(
        index = %config.search_index,
        "Search index: {}",
        config.search_url
    );
    tracing::info!("Rate limiting: {} requests/second", config.rate_limit_rps);

    let state = AppState {
        search,
        interpreter,
        users: Arc::new(InMemoryUserStore::new()),
    };

    // Build application
    let app = careboard_server::build_app(state, &config);

    // Start server
    let addr: SocketAddr = config.bind_address.parse().expect("Invalid bind address");
    tracing::info!("Starting careboard server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server shutdown complete");
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
