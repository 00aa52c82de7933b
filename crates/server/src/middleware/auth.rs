use axum::{
    Json,
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ErrorBody;

/// Header carrying the client's API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// API Key authentication state
#[derive(Clone)]
pub struct ApiKeyAuth {
    api_key: Option<String>,
}

impl ApiKeyAuth {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }
}

/// Reject requests without the configured API key. A server configured
/// without a key lets everything through.
pub async fn auth_middleware(request: Request<Body>, next: Next) -> Response {
    let expected = request
        .extensions()
        .get::<ApiKeyAuth>()
        .and_then(|auth| auth.api_key.clone());

    if let Some(expected) = expected {
        let provided = request
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok());

        if provided != Some(expected.as_str()) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody::new("Invalid or missing API key")),
            )
                .into_response();
        }
    }

    next.run(request).await
}
