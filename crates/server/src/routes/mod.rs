pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod health;
pub mod metrics;
pub mod patients;
pub mod search;

use axum::{
    Router,
    routing::{get, post},
};

use crate::search::SearchBackend;
use crate::state::AppState;

/// Build the API routes (behind API-key auth)
pub fn api_routes<B>() -> Router<AppState<B>>
where
    B: SearchBackend + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/dashboard", get(dashboard::report::<B>))
        .route("/patients", get(patients::list::<B>))
        .route("/search", post(search::run::<B>))
        .route("/chat", post(chat::reply::<B>))
}

/// Build the public auth routes
pub fn auth_routes<B>() -> Router<AppState<B>>
where
    B: SearchBackend + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/signup", post(auth::signup::<B>))
        .route("/login", post(auth::login::<B>))
}
