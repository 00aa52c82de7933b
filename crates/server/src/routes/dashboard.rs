//! Dashboard reporting endpoint

use axum::{Json, extract::State};
use chrono::Local;
use serde::Serialize;
use serde_json::Value as JsonValue;

use careboard_core::AggregateReport;

use crate::search::{self, SearchBackend};
use crate::state::AppState;

#[derive(Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub report: AggregateReport,
    pub patients: Vec<JsonValue>,
}

/// GET /api/dashboard - Aggregate statistics over the full record set.
///
/// Fetches everything with a match-all query and computes the report as of
/// now. An unreachable index degrades to an all-zero report.
pub async fn report<B>(State(state): State<AppState<B>>) -> Json<DashboardResponse>
where
    B: SearchBackend + Clone + Send + Sync + 'static,
{
    let records = search::fetch_all(&state.search).await;
    let report = AggregateReport::compute(&records, Local::now().date_naive());

    Json(DashboardResponse {
        report,
        patients: records,
    })
}
