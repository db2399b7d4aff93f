use std::sync::Arc;

use futures::future::BoxFuture;

use crate::application::ports::{LlmClient, LlmClientError, TextSplitter};
use crate::domain::ConversationTurn;

use super::count_tokens;

/// Reduces long text to a short overview through a map-then-merge sequence
/// of completion calls.
///
/// Each chunk is summarised on its own, the partial summaries are joined and,
/// if the joined text is still over the splitter's budget, summarised again
/// one level deeper. A last call merges everything into one overview.
pub struct SummarizationService<L, T>
where
    L: LlmClient,
    T: TextSplitter + ?Sized,
{
    llm_client: Arc<L>,
    text_splitter: Arc<T>,
    max_recursion_depth: usize,
}

impl<L, T> SummarizationService<L, T>
where
    L: LlmClient,
    T: TextSplitter + ?Sized,
{
    pub fn new(llm_client: Arc<L>, text_splitter: Arc<T>, max_recursion_depth: usize) -> Self {
        Self {
            llm_client,
            text_splitter,
            max_recursion_depth,
        }
    }

    #[tracing::instrument(skip(self, text), fields(input_tokens = count_tokens(text)))]
    pub async fn summarize(&self, text: &str) -> Result<String, SummarizationError> {
        if count_tokens(text) == 0 {
            return Err(SummarizationError::EmptyInput);
        }

        let summary = self.summarize_at_depth(text, 0).await?;
        tracing::info!(summary_tokens = count_tokens(&summary), "Summarisation complete");
        Ok(summary)
    }

    fn summarize_at_depth<'a>(
        &'a self,
        text: &'a str,
        depth: usize,
    ) -> BoxFuture<'a, Result<String, SummarizationError>> {
        Box::pin(async move {
            let mut partials = Vec::new();

            for chunk in self.text_splitter.split(text) {
                tracing::debug!(
                    depth,
                    chunk_index = chunk.index,
                    chunk_tokens = chunk.token_count,
                    "Summarising chunk"
                );
                partials.push(self.ask(chunk_prompt(&chunk.text)).await?);
            }

            let mut combined = partials.join("\n\n");
            let combined_tokens = count_tokens(&combined);

            if combined_tokens > self.text_splitter.token_budget() {
                if depth >= self.max_recursion_depth {
                    tracing::warn!(
                        depth,
                        combined_tokens,
                        "Merged summary still over budget at maximum depth"
                    );
                    return Err(SummarizationError::RecursionLimitExceeded {
                        max_depth: self.max_recursion_depth,
                        tokens: combined_tokens,
                    });
                }

                tracing::debug!(depth, combined_tokens, "Merged summary over budget, reducing again");
                combined = self.summarize_at_depth(&combined, depth + 1).await?;
            }

            self.ask(merge_prompt(&combined)).await
        })
    }

    async fn ask(&self, prompt: String) -> Result<String, SummarizationError> {
        let turns = [ConversationTurn::user(prompt)];
        let reply = self.llm_client.complete(&turns).await?;
        Ok(reply.trim().to_string())
    }
}

fn chunk_prompt(chunk: &str) -> String {
    format!("Summarise clearly:\n\n{chunk}\n\nSummary:")
}

fn merge_prompt(combined: &str) -> String {
    format!(
        "Merge and refine these summaries into one concise overview:\n\n{combined}\n\nFinal summary (plain text, no markdown):"
    )
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizationError {
    #[error("no text to summarise")]
    EmptyInput,
    #[error("completion: {0}")]
    Completion(#[from] LlmClientError),
    #[error("summary still has {tokens} tokens after {max_depth} reduction passes")]
    RecursionLimitExceeded { max_depth: usize, tokens: usize },
}
