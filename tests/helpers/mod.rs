#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use replydesk::application::ports::{LlmClient, LlmClientError};
use replydesk::application::services::{ChatService, SummarizationService};
use replydesk::domain::ConversationTurn;
use replydesk::infrastructure::text_processing::{CompositeFileLoader, WordChunker};

pub const TEST_SYSTEM_PROMPT: &str = "You are a test assistant.";

type Responder = dyn Fn(&[ConversationTurn]) -> Result<String, LlmClientError> + Send + Sync;

/// Completion client that records every call and answers through a closure.
pub struct ScriptedLlmClient {
    responder: Box<Responder>,
    calls: Mutex<Vec<Vec<ConversationTurn>>>,
}

impl ScriptedLlmClient {
    pub fn new(
        responder: impl Fn(&[ConversationTurn]) -> Result<String, LlmClientError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(reply: &str) -> Self {
        let reply = reply.to_string();
        Self::new(move |_| Ok(reply.clone()))
    }

    pub fn calls(&self) -> Vec<Vec<ConversationTurn>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn complete(&self, turns: &[ConversationTurn]) -> Result<String, LlmClientError> {
        self.calls.lock().unwrap().push(turns.to_vec());
        (self.responder)(turns)
    }
}

/// Last turn's content, which for summarisation calls is the whole prompt.
pub fn prompt_of(turns: &[ConversationTurn]) -> &str {
    turns.last().map(|t| t.content.as_str()).unwrap_or_default()
}

pub fn is_merge_prompt(turns: &[ConversationTurn]) -> bool {
    prompt_of(turns).starts_with("Merge and refine")
}

pub fn numbered_words(count: usize) -> String {
    (1..=count)
        .map(|i| format!("word{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn summarization_service(
    llm_client: Arc<ScriptedLlmClient>,
    token_budget: usize,
    max_recursion_depth: usize,
) -> SummarizationService<ScriptedLlmClient, WordChunker> {
    SummarizationService::new(
        llm_client,
        Arc::new(WordChunker::new(token_budget)),
        max_recursion_depth,
    )
}

pub fn chat_service(
    llm_client: Arc<ScriptedLlmClient>,
    token_budget: usize,
) -> ChatService<ScriptedLlmClient, CompositeFileLoader, WordChunker> {
    let summarizer = Arc::new(summarization_service(
        Arc::clone(&llm_client),
        token_budget,
        2,
    ));

    ChatService::new(
        llm_client,
        Arc::new(CompositeFileLoader::standard()),
        summarizer,
        TEST_SYSTEM_PROMPT.to_string(),
    )
}

/// Builds a DOCX with one paragraph per entry; each entry is a list of `(text, bold)` runs.
pub fn build_docx(paragraphs: &[&[(&str, bool)]]) -> Vec<u8> {
    let docx = paragraphs.iter().fold(docx_rs::Docx::new(), |docx, runs| {
        let paragraph = runs
            .iter()
            .fold(docx_rs::Paragraph::new(), |paragraph, (text, bold)| {
                let run = docx_rs::Run::new().add_text(*text);
                paragraph.add_run(if *bold { run.bold() } else { run })
            });
        docx.add_paragraph(paragraph)
    });

    let mut buffer = std::io::Cursor::new(Vec::new());
    docx.build().pack(&mut buffer).unwrap();
    buffer.into_inner()
}
