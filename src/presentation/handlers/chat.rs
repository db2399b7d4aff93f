use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};

use crate::application::ports::{DocumentWriter, FileLoader, LlmClient, TextSplitter};
use crate::application::services::{Attachment, ChatError, ChatRequest};
use crate::domain::ConversationTurn;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error_response::error_response;

#[derive(Debug, Default, Deserialize)]
pub struct ChatPayload {
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, rename = "fileB64")]
    pub file_b64: Option<String>,
    #[serde(default, rename = "fileName")]
    pub file_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub assistant: String,
}

#[tracing::instrument(skip(state, payload))]
pub async fn chat_handler<L, F, T, W>(
    State(state): State<AppState<L, F, T, W>>,
    payload: Result<Json<ChatPayload>, JsonRejection>,
) -> Response
where
    L: LlmClient + 'static,
    F: FileLoader + 'static + ?Sized,
    T: TextSplitter + 'static + ?Sized,
    W: DocumentWriter + 'static + ?Sized,
{
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected chat payload");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let attachment = match decode_attachment(&payload) {
        Ok(attachment) => attachment,
        Err(e) => {
            tracing::warn!(error = %e, "Attachment is not valid base64");
            return error_response(StatusCode::BAD_REQUEST, format!("file error: {e}"));
        }
    };

    let text = payload.text.unwrap_or_default();
    tracing::debug!(prompt = %sanitize_prompt(&text), "Processing chat request");

    let request = ChatRequest {
        history: payload.history,
        text,
        attachment,
    };

    match state.chat_service.reply(request).await {
        Ok(assistant) => (StatusCode::OK, Json(ChatResponse { assistant })).into_response(),
        Err(ChatError::EmptyInput) => {
            tracing::warn!("Chat request with no input text");
            error_response(StatusCode::BAD_REQUEST, "No input text")
        }
        Err(e @ ChatError::Extraction(_)) => {
            tracing::warn!(error = %e, "Attachment extraction failed");
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e) => {
            tracing::error!(error = %e, "Chat request failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Chat failed: {}", e),
            )
        }
    }
}

/// An attachment is only considered when both the payload and the file name are present.
fn decode_attachment(payload: &ChatPayload) -> Result<Option<Attachment>, base64::DecodeError> {
    let (Some(encoded), Some(file_name)) = (
        payload.file_b64.as_deref().filter(|s| !s.is_empty()),
        payload.file_name.as_deref().filter(|s| !s.is_empty()),
    ) else {
        return Ok(None);
    };

    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let data = general_purpose::STANDARD.decode(compact)?;

    Ok(Some(Attachment {
        file_name: file_name.to_string(),
        data,
    }))
}
