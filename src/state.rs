//! Shared application state.

use crate::ai::{GeminiTextClient, TextService};
use crate::models::Config;
use std::sync::Arc;

/// Read-only state handed to every handler.
///
/// The model client is the only shared resource; it is constructed once and
/// never mutated, so invocations stay fully independent.
#[derive(Clone)]
pub struct AppState {
    pub text: Arc<dyn TextService>,
}

impl AppState {
    pub fn new(text: Arc<dyn TextService>) -> Self {
        Self { text }
    }

    /// Wire up the Gemini-backed client from configuration.
    pub fn from_config(config: &Config) -> Self {
        let client = GeminiTextClient::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
        );
        Self::new(Arc::new(client))
    }
}
