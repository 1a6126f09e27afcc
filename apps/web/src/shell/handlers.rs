//! Axum route handlers for the page and the JSON API.

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    response::Html,
    Form, Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::shell::events::{on_query, on_submit, ChatView, PredictionView, SalaryForm};
use crate::shell::page::{render_page, PageContext};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub query: String,
}

// ────────────────────────────────────────────────────────────────────────────
// HTML page
// ────────────────────────────────────────────────────────────────────────────

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render_page(&state, &PageContext::default())
}

/// POST /predict
///
/// Form submit. Re-renders the page with the estimate and chart, or with the
/// model error and no chart.
pub async fn handle_predict_form(
    State(state): State<AppState>,
    form: Result<Form<SalaryForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(form) = form?;
    let prediction = on_submit(&form, &state.model)?;
    log_prediction(&prediction);

    render_page(
        &state,
        &PageContext {
            form,
            prediction: Some(prediction),
            ..PageContext::default()
        },
    )
}

/// POST /chat
pub async fn handle_chat_form(
    State(state): State<AppState>,
    Form(chat_form): Form<ChatForm>,
) -> Result<Html<String>, AppError> {
    let chat = on_query(&chat_form.query, &state.chat).await;

    render_page(
        &state,
        &PageContext {
            query: chat_form.query,
            chat: Some(chat),
            ..PageContext::default()
        },
    )
}

// ────────────────────────────────────────────────────────────────────────────
// JSON API
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/predict
///
/// Same outcomes as the form; a missing model is a 200 with
/// `"status": "unavailable"`.
pub async fn handle_predict_api(
    State(state): State<AppState>,
    form: Result<Json<SalaryForm>, JsonRejection>,
) -> Result<Json<PredictionView>, AppError> {
    let Json(form) = form?;
    let prediction = on_submit(&form, &state.model)?;
    log_prediction(&prediction);
    Ok(Json(prediction))
}

/// POST /api/v1/chat
pub async fn handle_chat_api(
    State(state): State<AppState>,
    Json(request): Json<ChatForm>,
) -> Json<ChatView> {
    Json(on_query(&request.query, &state.chat).await)
}

fn log_prediction(prediction: &PredictionView) {
    match prediction {
        PredictionView::Estimate(rendered) => {
            info!("Predicted salary {}", rendered.formatted_salary)
        }
        PredictionView::Unavailable { message } => {
            info!("Prediction skipped: {message}")
        }
    }
}
