use std::sync::Arc;

use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable; nothing is shared across requests beyond the generator handle.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable text generator. Production: `LlmClient`.
    pub generator: Arc<dyn TextGenerator>,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}
