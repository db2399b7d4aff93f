mod chat_service;
mod export_service;
mod markdown_renderer;
mod summarization_service;
mod token_counter;

pub use chat_service::{Attachment, ChatError, ChatRequest, ChatService};
pub use export_service::{DEFAULT_FILE_STEM, ExportError, ExportService, ExportedDocument};
pub use markdown_renderer::{BULLET_GLYPH, NUMBERED_GLYPH, render_line, render_markdown};
pub use summarization_service::{SummarizationError, SummarizationService};
pub use token_counter::count_tokens;
