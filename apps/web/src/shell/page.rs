//! Server-side page rendering with embedded minijinja templates.

use axum::response::Html;
use minijinja::{context, Environment, Value};

use crate::encoding::{Categorical, Education, Location, Role, MAX_EXPERIENCE, MIN_EXPERIENCE};
use crate::errors::AppError;
use crate::shell::events::{ChatView, PredictionView, SalaryForm};
use crate::state::AppState;

pub const PAGE_TITLE: &str = "Employee Salary Predictor";
const INDEX_TEMPLATE: &str = "index.html";

pub fn build_templates() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template(INDEX_TEMPLATE, include_str!("../../templates/index.html"))?;
    Ok(env)
}

/// One full render of the page. Sections without output are `None`.
#[derive(Debug, Default)]
pub struct PageContext {
    pub form: SalaryForm,
    pub prediction: Option<PredictionView>,
    pub query: String,
    pub chat: Option<ChatView>,
}

pub fn render_page(state: &AppState, page: &PageContext) -> Result<Html<String>, AppError> {
    let template = state.templates.get_template(INDEX_TEMPLATE)?;

    let chart_svg = match &page.prediction {
        Some(PredictionView::Estimate(rendered)) => {
            Some(Value::from_safe_string(rendered.chart_svg.clone()))
        }
        _ => None,
    };

    let html = template.render(context! {
        title => PAGE_TITLE,
        model_error => state.model.unavailable_reason(),
        form => &page.form,
        min_experience => MIN_EXPERIENCE,
        max_experience => MAX_EXPERIENCE,
        education_options => Education::labels(),
        role_options => Role::labels(),
        location_options => Location::labels(),
        prediction => &page.prediction,
        chart_svg => chart_svg,
        query => &page.query,
        chat => &page.chat,
    })?;

    Ok(Html(html))
}
