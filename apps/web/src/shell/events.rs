//! The two UI events as plain functions over (inputs, read-only deps).
//!
//! Handlers for the HTML page and the JSON API both go through here, so the
//! two surfaces always agree on outcomes.

use serde::{Deserialize, Serialize};

use crate::chat_client::{ChatRelay, RelayError};
use crate::encoding::{
    encode_labels, Categorical, Education, Location, Role, DEFAULT_EXPERIENCE, MAX_EXPERIENCE,
    MIN_EXPERIENCE,
};
use crate::errors::AppError;
use crate::model::ModelState;
use crate::prediction::{render_prediction, RenderedPrediction};

/// Submitted salary form. Labels are validated by the encoder, not serde,
/// so that an unknown label reports which field was wrong.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryForm {
    pub experience: u32,
    pub education: String,
    pub role: String,
    pub location: String,
}

impl Default for SalaryForm {
    fn default() -> Self {
        Self {
            experience: DEFAULT_EXPERIENCE,
            education: Education::HighSchool.label().to_string(),
            role: Role::Intern.label().to_string(),
            location: Location::India.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PredictionView {
    Estimate(RenderedPrediction),
    /// Model failed to load; no estimate and no chart.
    Unavailable { message: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChatView {
    /// Empty query: nothing sent, nothing shown.
    Idle,
    Reply { reply: String },
    CredentialMissing { message: String },
    Failed { message: String },
}

/// On-submit: encode the form and, if the model is loaded, run it.
///
/// Out-of-range or unknown inputs are request errors; a missing model is a
/// normal outcome.
pub fn on_submit(form: &SalaryForm, model: &ModelState) -> Result<PredictionView, AppError> {
    if !(MIN_EXPERIENCE..=MAX_EXPERIENCE).contains(&form.experience) {
        return Err(AppError::Validation(format!(
            "experience must be between {MIN_EXPERIENCE} and {MAX_EXPERIENCE} years, got {}",
            form.experience
        )));
    }

    let features = encode_labels(form.experience, &form.education, &form.role, &form.location)?;

    let view = match model {
        ModelState::Ready(artifact) => match render_prediction(artifact, &features) {
            Ok(rendered) => PredictionView::Estimate(rendered),
            Err(e) => PredictionView::Unavailable {
                message: e.to_string(),
            },
        },
        ModelState::Unavailable { reason } => PredictionView::Unavailable {
            message: reason.clone(),
        },
    };
    Ok(view)
}

/// On-query: relay any non-empty text to the chat backend.
pub async fn on_query(query: &str, chat: &ChatRelay) -> ChatView {
    match chat.relay(query).await {
        None => ChatView::Idle,
        Some(Ok(reply)) => ChatView::Reply { reply },
        Some(Err(e @ RelayError::CredentialMissing)) => ChatView::CredentialMissing {
            message: e.to_string(),
        },
        Some(Err(e @ RelayError::External(_))) => ChatView::Failed {
            message: e.to_string(),
        },
    }
}
