use std::sync::Arc;

use crate::application::ports::{DocumentWriter, DocumentWriterError};

use super::render_markdown;

pub const DEFAULT_FILE_STEM: &str = "reply_output";

#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Turns a markdown reply into a downloadable document.
pub struct ExportService<W>
where
    W: DocumentWriter + ?Sized,
{
    document_writer: Arc<W>,
}

impl<W> ExportService<W>
where
    W: DocumentWriter + ?Sized,
{
    pub fn new(document_writer: Arc<W>) -> Self {
        Self { document_writer }
    }

    #[tracing::instrument(skip(self, content), fields(content_chars = content.len()))]
    pub fn export(
        &self,
        content: &str,
        file_name: Option<&str>,
    ) -> Result<ExportedDocument, ExportError> {
        let markdown = content.trim();
        if markdown.is_empty() {
            return Err(ExportError::EmptyContent);
        }

        let document = render_markdown(markdown);
        let bytes = self.document_writer.write(&document)?;
        let file_name = self.output_file_name(file_name);

        tracing::info!(file_name = %file_name, bytes = bytes.len(), "Document exported");
        Ok(ExportedDocument { file_name, bytes })
    }

    /// Replaces the last extension of `requested` with the writer's extension.
    pub fn output_file_name(&self, requested: Option<&str>) -> String {
        let requested = requested.map(str::trim).filter(|name| !name.is_empty());

        let stem = match requested {
            Some(name) => name.rsplit_once('.').map_or(name, |(stem, _)| stem),
            None => DEFAULT_FILE_STEM,
        };

        format!("{}.{}", stem, self.document_writer.extension())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no content")]
    EmptyContent,
    #[error(transparent)]
    Writer(#[from] DocumentWriterError),
}
