//! Health check endpoint

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use careboard_core::StructuredQuery;

use crate::search::SearchBackend;
use crate::state::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// GET /health - Probe search-index reachability and report server health
pub async fn check<B>(State(state): State<AppState<B>>) -> impl IntoResponse
where
    B: SearchBackend + Clone + Send + Sync + 'static,
{
    match state.search.search(&StructuredQuery::match_all().to_body()).await {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                reason: None,
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Health check search failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    reason: Some(format!("Search index unreachable: {}", e)),
                }),
            )
        }
    }
}
