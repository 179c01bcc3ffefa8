use std::sync::Arc;

use crate::llm_client::TextGenerator;
use crate::session::SessionRegistry;
use crate::storage::{CredentialStore, RecordStore};
use crate::views::Views;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub credentials: CredentialStore,
    pub records: RecordStore,
    /// Completion backend. Groq in production, a stub in tests.
    pub llm: Arc<dyn TextGenerator>,
    pub sessions: SessionRegistry,
    pub views: Views,
}
