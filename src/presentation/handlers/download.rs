use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};

use crate::application::ports::{DocumentWriter, FileLoader, LlmClient, TextSplitter};
use crate::application::services::ExportError;
use crate::presentation::state::AppState;

use super::error_response::error_response;

#[derive(Debug, Default, Deserialize)]
pub struct DownloadPayload {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, rename = "fileName")]
    pub file_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DownloadResponse {
    pub b64: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
}

#[tracing::instrument(skip(state, payload))]
pub async fn download_handler<L, F, T, W>(
    State(state): State<AppState<L, F, T, W>>,
    payload: Result<Json<DownloadPayload>, JsonRejection>,
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
            tracing::warn!(error = %rejection, "Rejected download payload");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let content = payload.content.unwrap_or_default();

    match state
        .export_service
        .export(&content, payload.file_name.as_deref())
    {
        Ok(exported) => (
            StatusCode::OK,
            Json(DownloadResponse {
                b64: general_purpose::STANDARD.encode(&exported.bytes),
                file_name: exported.file_name,
            }),
        )
            .into_response(),
        Err(ExportError::EmptyContent) => {
            tracing::warn!("Download request with empty content");
            error_response(StatusCode::BAD_REQUEST, "No content")
        }
        Err(e) => {
            tracing::error!(error = %e, "Document export failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Export failed: {}", e),
            )
        }
    }
}
