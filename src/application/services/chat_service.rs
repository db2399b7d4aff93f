use std::sync::Arc;

use crate::application::ports::{FileLoader, FileLoaderError, LlmClient, LlmClientError, TextSplitter};
use crate::domain::{ConversationTurn, Document, MessageRole};

use super::{SummarizationError, SummarizationService};

/// A file uploaded alongside a chat message.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub history: Vec<ConversationTurn>,
    pub text: String,
    pub attachment: Option<Attachment>,
}

pub struct ChatService<L, F, T>
where
    L: LlmClient,
    F: FileLoader + ?Sized,
    T: TextSplitter + ?Sized,
{
    llm_client: Arc<L>,
    file_loader: Arc<F>,
    summarization_service: Arc<SummarizationService<L, T>>,
    system_prompt: String,
}

impl<L, F, T> ChatService<L, F, T>
where
    L: LlmClient,
    F: FileLoader + ?Sized,
    T: TextSplitter + ?Sized,
{
    pub fn new(
        llm_client: Arc<L>,
        file_loader: Arc<F>,
        summarization_service: Arc<SummarizationService<L, T>>,
        system_prompt: String,
    ) -> Self {
        Self {
            llm_client,
            file_loader,
            summarization_service,
            system_prompt,
        }
    }

    /// Answers the latest user input. An attachment is extracted and
    /// summarised, and its summary replaces the typed text.
    #[tracing::instrument(
        skip(self, request),
        fields(
            history_len = request.history.len(),
            has_attachment = request.attachment.is_some(),
        )
    )]
    pub async fn reply(&self, request: ChatRequest) -> Result<String, ChatError> {
        let mut text = request.text.trim().to_string();

        if let Some(attachment) = request.attachment {
            text = self.summarize_attachment(attachment).await?;
        }

        if text.is_empty() {
            return Err(ChatError::EmptyInput);
        }

        let turns = self.build_turns(request.history, text);
        let answer = self.llm_client.complete(&turns).await?;

        tracing::info!(turns = turns.len(), "Chat completion successful");
        Ok(answer.trim().to_string())
    }

    /// The configured system prompt first, then the caller's history, then the new user turn.
    pub fn build_turns(&self, history: Vec<ConversationTurn>, text: String) -> Vec<ConversationTurn> {
        let mut turns = Vec::with_capacity(history.len() + 2);
        turns.push(ConversationTurn::system(self.system_prompt.clone()));

        for turn in history {
            if turn.role == MessageRole::System {
                tracing::debug!("Dropping caller-supplied system turn");
                continue;
            }
            turns.push(turn);
        }

        turns.push(ConversationTurn::user(text));
        turns
    }

    async fn summarize_attachment(&self, attachment: Attachment) -> Result<String, ChatError> {
        let document = Document::new(attachment.file_name, attachment.data.len() as u64);

        let extracted = self
            .file_loader
            .extract_text(&attachment.data, &document)
            .await
            .map_err(ChatError::Extraction)?;

        tracing::debug!(
            filename = %document.filename,
            content_type = document.content_type.as_mime(),
            size_bytes = document.size_bytes,
            chars = extracted.len(),
            "Attachment text extracted"
        );

        match self.summarization_service.summarize(&extracted).await {
            Ok(summary) => Ok(summary),
            Err(SummarizationError::EmptyInput) => Ok(String::new()),
            Err(e) => Err(ChatError::Summarization(e)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("no input text")]
    EmptyInput,
    #[error("file error: {0}")]
    Extraction(FileLoaderError),
    #[error("summarisation: {0}")]
    Summarization(SummarizationError),
    #[error("completion: {0}")]
    Completion(#[from] LlmClientError),
}
