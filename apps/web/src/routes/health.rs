use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus which features are enabled.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "salary-web",
        "model_loaded": state.model.is_ready(),
        "model_path": state.config.model_path.display().to_string(),
        "chat_enabled": state.chat.is_enabled(),
    }))
}
