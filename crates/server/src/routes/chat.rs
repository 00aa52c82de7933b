//! Health-assistant chat endpoint

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::ai::interpret;
use crate::search::SearchBackend;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /api/chat - Single-shot assistant completion.
///
/// Gateway failures degrade to a canned reply rather than an error status;
/// the consuming view always has something to render.
pub async fn reply<B>(
    State(state): State<AppState<B>>,
    Json(body): Json<ChatRequest>,
) -> Json<ChatResponse>
where
    B: SearchBackend + Clone + Send + Sync + 'static,
{
    let response = match &state.interpreter {
        Some(client) => match interpret::chat_reply(client, &body.message).await {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(error = %error, "Chat completion failed");
                "The assistant is unavailable right now. Please try again later.".to_string()
            }
        },
        None => "The assistant is not configured on this server.".to_string(),
    };

    Json(ChatResponse { response })
}
