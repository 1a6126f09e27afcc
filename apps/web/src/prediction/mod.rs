//! Prediction rendering: model estimate plus the illustrative breakdown chart.

pub mod breakdown;
pub mod chart;
pub mod currency;

use serde::Serialize;

use crate::encoding::FeatureVector;
use crate::model::{ModelArtifact, ModelError};

pub use breakdown::SalaryBreakdown;
pub use currency::format_currency;

/// Everything the page or API needs to show a successful estimate.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedPrediction {
    pub predicted_salary: f64,
    pub formatted_salary: String,
    /// Heuristic components; independent of `predicted_salary`.
    pub breakdown: SalaryBreakdown,
    #[serde(skip)]
    pub chart_svg: String,
}

pub fn render_prediction(
    model: &ModelArtifact,
    features: &FeatureVector,
) -> Result<RenderedPrediction, ModelError> {
    let predicted_salary = model.predict(features)?;
    let breakdown = SalaryBreakdown::from_features(features);
    let chart_svg = chart::render_svg(&breakdown);

    Ok(RenderedPrediction {
        predicted_salary,
        formatted_salary: format_currency(predicted_salary),
        breakdown,
        chart_svg,
    })
}
