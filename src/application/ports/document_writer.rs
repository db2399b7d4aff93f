use crate::domain::RenderedDocument;

/// Serializes a rendered document into downloadable bytes.
pub trait DocumentWriter: Send + Sync {
    /// File extension of the produced format, without the leading dot.
    fn extension(&self) -> &'static str;

    fn write(&self, document: &RenderedDocument) -> Result<Vec<u8>, DocumentWriterError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentWriterError {
    #[error("document serialization failed: {0}")]
    SerializationFailed(String),
}
