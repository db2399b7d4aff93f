use std::io::Cursor;

use docx_rs::{Docx, Paragraph};

use crate::application::ports::{DocumentWriter, DocumentWriterError};
use crate::domain::{DocumentParagraph, RenderedDocument};

/// Writes each rendered paragraph as one DOCX paragraph, blocks back to back.
#[derive(Debug, Default)]
pub struct DocxWriter;

impl DocxWriter {
    pub fn new() -> Self {
        Self
    }

    fn to_docx_paragraph(paragraph: &DocumentParagraph) -> Paragraph {
        paragraph.runs.iter().fold(Paragraph::new(), |docx_paragraph, run| {
            let docx_run = docx_rs::Run::new().add_text(run.text.as_str());
            let docx_run = if run.bold { docx_run.bold() } else { docx_run };
            docx_paragraph.add_run(docx_run)
        })
    }
}

impl DocumentWriter for DocxWriter {
    fn extension(&self) -> &'static str {
        "docx"
    }

    fn write(&self, document: &RenderedDocument) -> Result<Vec<u8>, DocumentWriterError> {
        let docx = document
            .paragraphs()
            .fold(Docx::new(), |docx, paragraph| {
                docx.add_paragraph(Self::to_docx_paragraph(paragraph))
            });

        let mut buffer = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buffer)
            .map_err(|e| DocumentWriterError::SerializationFailed(e.to_string()))?;

        Ok(buffer.into_inner())
    }
}
