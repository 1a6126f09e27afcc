//! Chat relay — decides whether a query is sent and classifies the outcome.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::chat_client::{ChatCompletion, ChatError};

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("OpenAI API key not found. Set `OPENAI_API_KEY` in your environment or .env file.")]
    CredentialMissing,

    #[error("API Error: {0}")]
    External(#[from] ChatError),
}

/// Forwards free-text queries to the chat backend when one is configured.
#[derive(Clone)]
pub struct ChatRelay {
    backend: Option<Arc<dyn ChatCompletion>>,
}

impl ChatRelay {
    pub fn new(backend: Option<Arc<dyn ChatCompletion>>) -> Self {
        Self { backend }
    }

    pub fn disabled() -> Self {
        Self { backend: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Returns `None` for an empty query without touching the backend. Any
    /// other text, whitespace included, is forwarded verbatim.
    pub async fn relay(&self, query: &str) -> Option<Result<String, RelayError>> {
        if query.is_empty() {
            return None;
        }

        let Some(backend) = &self.backend else {
            warn!("Chat query received but no API key is configured");
            return Some(Err(RelayError::CredentialMissing));
        };

        info!("Relaying chat query ({} chars)", query.chars().count());
        let result = backend.complete(query).await.map_err(|e| {
            warn!("Chat relay failed: {e}");
            RelayError::External(e)
        });
        Some(result)
    }
}
