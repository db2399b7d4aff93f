use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{DocumentWriter, FileLoader, LlmClient, TextSplitter};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{chat_handler, download_handler, health_handler};
use crate::presentation::state::AppState;

pub fn create_router<L, F, T, W>(state: AppState<L, F, T, W>) -> Router
where
    L: LlmClient + 'static,
    F: FileLoader + 'static + ?Sized,
    T: TextSplitter + 'static + ?Sized,
    W: DocumentWriter + 'static + ?Sized,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Uploads arrive base64-encoded inside the JSON body.
    let body_limit = DefaultBodyLimit::max(state.settings.server.max_body_bytes());

    Router::new()
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler::<L, F, T, W>))
        .route("/download", post(download_handler::<L, F, T, W>))
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
