//! Patient listing endpoint

use axum::{Json, extract::State};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::search::{self, SearchBackend};
use crate::state::AppState;

#[derive(Serialize)]
pub struct PatientsResponse {
    pub patients: Vec<JsonValue>,
}

/// GET /api/patients - Full record listing via a match-all search.
pub async fn list<B>(State(state): State<AppState<B>>) -> Json<PatientsResponse>
where
    B: SearchBackend + Clone + Send + Sync + 'static,
{
    let patients = search::fetch_all(&state.search).await;
    Json(PatientsResponse { patients })
}
