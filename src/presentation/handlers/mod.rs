mod chat;
mod download;
mod error_response;
mod health;

pub use chat::{ChatPayload, ChatResponse, chat_handler};
pub use download::{DownloadPayload, DownloadResponse, download_handler};
pub use error_response::ErrorResponse;
pub use health::health_handler;
