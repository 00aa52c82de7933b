//! Search endpoint: the full interpretation pipeline
//!
//! Control flow for free-text queries: interpretation gateway → filter
//! extraction → query building → search execution. Structured fields in
//! the request bypass the extractor entirely. No failure along the way is
//! fatal; the response always carries a (possibly empty) result list.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use careboard_core::{FilterKey, FilterSet, StructuredQuery, extract_filters};

use crate::ai::interpret;
use crate::search::{self, SearchBackend};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub disease: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub last_report: Option<String>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: Option<String>,
    pub filters: FilterSet,
    pub results: Vec<JsonValue>,
}

/// POST /api/search
pub async fn run<B>(
    State(state): State<AppState<B>>,
    Json(body): Json<SearchRequest>,
) -> Json<SearchResponse>
where
    B: SearchBackend + Clone + Send + Sync + 'static,
{
    let filters = match structured_filters(&body) {
        Some(filters) => filters,
        None => interpreted_filters(&state, body.query.as_deref().unwrap_or("")).await,
    };

    tracing::info!(filters = %serde_json::to_string(&filters).unwrap_or_default(), "Search filters resolved");

    let query = StructuredQuery::from_filters(&filters);
    let results = search::execute(&state.search, &query).await;

    Json(SearchResponse {
        query: body.query,
        filters,
        results,
    })
}

/// Build filters from structured request fields, when any is present.
/// These bypass the interpreter and extractor completely.
fn structured_filters(body: &SearchRequest) -> Option<FilterSet> {
    let disease = non_empty(&body.disease);
    let status = non_empty(&body.status);
    let last_report = non_empty(&body.last_report);

    if disease.is_none() && status.is_none() && last_report.is_none() {
        return None;
    }

    let mut filters = FilterSet::new();
    if let Some(disease) = disease {
        filters.set_if_absent(FilterKey::Disease, disease);
    }
    if let Some(status) = status {
        match status.trim().to_lowercase().as_str() {
            "abnormal sugar" => filters.set_if_absent(FilterKey::SugarCondition, "abnormal"),
            "abnormal bp" => filters.set_if_absent(FilterKey::BpCondition, "high"),
            other => tracing::debug!(status = other, "Unrecognized status filter ignored"),
        }
    }
    if let Some(last_report) = last_report {
        filters.set_if_absent(FilterKey::DateRange, last_report);
    }
    Some(filters)
}

/// Run the gateway and extractor over a free-text query. Interpreter
/// failure or absence leaves extraction to run over empty text, which
/// yields an empty filter set and thus a match-everything search.
async fn interpreted_filters<B>(state: &AppState<B>, raw_query: &str) -> FilterSet {
    let raw_query = raw_query.trim();
    if raw_query.is_empty() {
        return FilterSet::new();
    }

    let text = match &state.interpreter {
        Some(client) => match interpret::interpret_query(client, raw_query).await {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(error = %error, "Interpreter call failed, falling back to heuristics");
                String::new()
            }
        },
        None => {
            tracing::debug!("No interpreter configured, falling back to heuristics");
            String::new()
        }
    };

    extract_filters(&text)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
