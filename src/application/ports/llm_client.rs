use async_trait::async_trait;

use crate::domain::ConversationTurn;

/// Opaque text-completion service: ordered turns in, generated text out.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, turns: &[ConversationTurn]) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
