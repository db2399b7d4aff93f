mod chunk;
mod conversation_turn;
mod document;
mod message_role;
mod rendered_document;

pub use chunk::Chunk;
pub use conversation_turn::ConversationTurn;
pub use document::{ContentType, Document};
pub use message_role::MessageRole;
pub use rendered_document::{DocumentParagraph, ParagraphBlock, RenderedDocument, Run};
