//! HTTP client for the search index

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::{SearchBackend, SearchError};

/// Client for one index of an Elasticsearch-compatible document store.
#[derive(Clone)]
pub struct ElasticClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    index: String,
}

/// Standard hit-list envelope returned by `_search`.
#[derive(Deserialize)]
struct SearchResponse {
    hits: Hits,
}

#[derive(Deserialize)]
struct Hits {
    hits: Vec<Hit>,
}

#[derive(Deserialize)]
struct Hit {
    #[serde(rename = "_source")]
    source: JsonValue,
}

impl ElasticClient {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        index: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: reqwest::Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            index,
        })
    }

    async fn post_search(&self, body: &JsonValue) -> Result<Vec<JsonValue>, SearchError> {
        let url = format!("{}/{}/_search", self.base_url, self.index);

        let mut request = self.http.post(&url).json(body);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("ApiKey {key}"));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Index { status, body });
        }

        let envelope: SearchResponse = response.json().await?;
        Ok(envelope.hits.hits.into_iter().map(|h| h.source).collect())
    }
}

impl SearchBackend for ElasticClient {
    async fn search(&self, body: &JsonValue) -> Result<Vec<JsonValue>, SearchError> {
        self.post_search(body).await
    }
}
