use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use replydesk::application::services::{ChatService, ExportService, SummarizationService};
use replydesk::infrastructure::document::DocxWriter;
use replydesk::infrastructure::llm::OpenAiClient;
use replydesk::infrastructure::observability::{TracingConfig, init_tracing};
use replydesk::infrastructure::text_processing::{CompositeFileLoader, WordChunker};
use replydesk::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    init_tracing(
        TracingConfig::from_settings(&settings.logging, environment),
        settings.server.port,
    );

    if settings.llm.api_key.is_empty() {
        tracing::warn!("No model API key configured; completion calls will be rejected");
    }

    let llm_client = Arc::new(OpenAiClient::new(&settings.llm)?);
    let file_loader = Arc::new(CompositeFileLoader::standard());
    let text_splitter = Arc::new(WordChunker::new(settings.summarization.token_budget));

    let summarization_service = Arc::new(SummarizationService::new(
        Arc::clone(&llm_client),
        text_splitter,
        settings.summarization.max_recursion_depth,
    ));

    let chat_service = Arc::new(ChatService::new(
        Arc::clone(&llm_client),
        file_loader,
        summarization_service,
        settings.llm.system_prompt.clone(),
    ));

    let export_service = Arc::new(ExportService::new(Arc::new(DocxWriter::new())));

    tracing::info!(
        model = %settings.llm.chat_model,
        token_budget = settings.summarization.token_budget,
        "Services configured"
    );

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;

    let state = AppState {
        chat_service,
        export_service,
        settings,
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
