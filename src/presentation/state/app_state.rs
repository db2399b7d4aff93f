use std::sync::Arc;

use crate::application::ports::{DocumentWriter, FileLoader, LlmClient, TextSplitter};
use crate::application::services::{ChatService, ExportService};
use crate::presentation::config::Settings;

pub struct AppState<L, F: ?Sized, T: ?Sized, W: ?Sized>
where
    L: LlmClient,
    F: FileLoader,
    T: TextSplitter,
    W: DocumentWriter,
{
    pub chat_service: Arc<ChatService<L, F, T>>,
    pub export_service: Arc<ExportService<W>>,
    pub settings: Settings,
}

impl<L, F: ?Sized, T: ?Sized, W: ?Sized> Clone for AppState<L, F, T, W>
where
    L: LlmClient,
    F: FileLoader,
    T: TextSplitter,
    W: DocumentWriter,
{
    fn clone(&self) -> Self {
        Self {
            chat_service: Arc::clone(&self.chat_service),
            export_service: Arc::clone(&self.export_service),
            settings: self.settings.clone(),
        }
    }
}
