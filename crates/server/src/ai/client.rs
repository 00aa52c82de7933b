//! HTTP client for the external natural-language interpreter
//!
//! Speaks a messages-style completion API: a fixed system instruction plus
//! one user message in, a single text block out. One attempt per call, no
//! internal retry; every failure surfaces as a typed [`GatewayError`] so
//! callers can degrade instead of aborting the request.

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

/// Failure signals from the interpreter call.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("interpreter request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("interpreter returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("interpreter response contained no text")]
    EmptyResponse,
}

/// Client for the interpreter's messages endpoint.
#[derive(Clone)]
pub struct InterpreterClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl InterpreterClient {
    /// Build a client. `timeout` bounds the whole outbound call so a hung
    /// interpreter degrades instead of stalling the request.
    pub fn new(
        api_key: String,
        model: String,
        url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: reqwest::Client::builder().timeout(timeout).build()?,
            url: url.unwrap_or_else(|| DEFAULT_URL.to_string()),
            api_key,
            model,
        })
    }

    /// Send one system+user exchange, return the interpreter's text output.
    pub async fn message(&self, system: &str, user: &str) -> Result<String, GatewayError> {
        let request = ApiRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system,
            messages: [Message {
                role: "user",
                content: user,
            }],
        };

        let response = self
            .http
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GatewayError::Api { status, message });
        }

        let body: ApiResponse = response.json().await?;
        body.content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or(GatewayError::EmptyResponse)
    }
}
