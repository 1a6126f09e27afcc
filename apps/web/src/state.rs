use std::sync::Arc;

use minijinja::Environment;

use crate::chat_client::ChatRelay;
use crate::config::Config;
use crate::model::ModelState;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once in `main`; `Unavailable` disables prediction.
    pub model: ModelState,
    pub chat: ChatRelay,
    pub templates: Arc<Environment<'static>>,
    pub config: Config,
}
