//! Search execution against the document index
//!
//! [`SearchBackend`] is the seam between the pipeline and the index, so
//! the executor can be exercised without a live cluster. [`execute`]
//! enforces the degradation contract: an unreachable or failing index
//! yields an empty result list, never an error to the caller, because the
//! consuming views must always render.

use reqwest::StatusCode;
use serde_json::Value as JsonValue;
use thiserror::Error;

use careboard_core::StructuredQuery;

pub mod client;

pub use client::ElasticClient;

/// Failures talking to the search index.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("search index returned {status}: {body}")]
    Index { status: StatusCode, body: String },
}

/// A document store that accepts a JSON query body and returns matched
/// document bodies in index order.
pub trait SearchBackend {
    fn search(
        &self,
        body: &JsonValue,
    ) -> impl Future<Output = Result<Vec<JsonValue>, SearchError>> + Send;
}

/// Run a structured query, degrading to an empty result set on failure.
/// Result order is the index's order; no client-side resort.
pub async fn execute<B: SearchBackend>(backend: &B, query: &StructuredQuery) -> Vec<JsonValue> {
    match backend.search(&query.to_body()).await {
        Ok(records) => records,
        Err(error) => {
            tracing::error!(error = %error, "Search failed, returning empty result set");
            Vec::new()
        }
    }
}

/// Fetch the full unfiltered record set, used by reporting and listing.
pub async fn fetch_all<B: SearchBackend>(backend: &B) -> Vec<JsonValue> {
    execute(backend, &StructuredQuery::match_all()).await
}
