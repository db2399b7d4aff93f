mod document_writer;
mod file_loader;
mod llm_client;
mod text_splitter;

pub use document_writer::{DocumentWriter, DocumentWriterError};
pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use text_splitter::TextSplitter;
