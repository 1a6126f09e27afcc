pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::shell::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Page
        .route("/", get(handlers::handle_index))
        .route("/predict", post(handlers::handle_predict_form))
        .route("/chat", post(handlers::handle_chat_form))
        // JSON API
        .route("/api/v1/predict", post(handlers::handle_predict_api))
        .route("/api/v1/chat", post(handlers::handle_chat_api))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::chat_client::{ChatClient, ChatCompletion, ChatRelay};
    use crate::config::Config;
    use crate::model::artifact::LinearModel;
    use crate::model::{ModelArtifact, ModelState};
    use crate::shell::page::build_templates;

    fn test_state(model: ModelState, chat: ChatRelay) -> AppState {
        AppState {
            model,
            chat,
            templates: Arc::new(build_templates().unwrap()),
            config: Config::from_lookup(|_| None).unwrap(),
        }
    }

    fn ready_model() -> ModelState {
        ModelState::Ready(Arc::new(ModelArtifact::Linear(LinearModel {
            intercept: 25_000.0,
            coefficients: vec![2_000.0, 5_000.0, 5_000.0, 3_000.0],
        })))
    }

    fn missing_model() -> ModelState {
        ModelState::Unavailable {
            reason: "Model file not found! Please upload 'model.json'.".to_string(),
        }
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn json_post(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(state: AppState, request: Request<Body>) -> (StatusCode, String) {
        let response = build_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let state = test_state(ready_model(), ChatRelay::disabled());
        let (status, body) = send(state, Request::get("/").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Employee Salary Predictor"));
        assert!(body.contains(r#"name="experience""#));
        assert!(body.contains("Senior Engineer"));
        assert!(!body.contains("model-error"));
    }

    #[tokio::test]
    async fn test_index_shows_model_error_when_unavailable() {
        let state = test_state(missing_model(), ChatRelay::disabled());
        let (_, body) = send(state, Request::get("/").body(Body::empty()).unwrap()).await;
        assert!(body.contains("Model file not found! Please upload"));
        assert!(body.contains(r#"id="model-error""#));
    }

    #[tokio::test]
    async fn test_predict_form_renders_estimate_and_chart() {
        let state = test_state(ready_model(), ChatRelay::disabled());
        let (status, body) = send(
            state,
            form_post(
                "/predict",
                "experience=5&education=Master%27s&role=Manager&location=UK",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Estimated Salary: ₹66,000.00"), "{body}");
        assert!(body.contains("<svg"));
        assert!(body.contains(r#"<option value="Manager" selected>"#));
    }

    #[tokio::test]
    async fn test_predict_form_without_model_shows_error_and_no_chart() {
        let state = test_state(missing_model(), ChatRelay::disabled());
        let (status, body) = send(
            state,
            form_post(
                "/predict",
                "experience=5&education=PhD&role=Manager&location=UK",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"id="prediction-error""#));
        assert!(!body.contains("<svg"));
        assert!(!body.contains("Estimated Salary"));
    }

    #[tokio::test]
    async fn test_predict_form_out_of_range_is_bad_request() {
        let state = test_state(ready_model(), ChatRelay::disabled());
        let (status, body) = send(
            state,
            form_post(
                "/predict",
                "experience=31&education=PhD&role=Manager&location=UK",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("VALIDATION_ERROR"));
    }

    #[tokio::test]
    async fn test_predict_form_malformed_experience_is_bad_request() {
        for body in [
            "experience=-1&education=PhD&role=Manager&location=UK",
            "experience=abc&education=PhD&role=Manager&location=UK",
            "education=PhD&role=Manager&location=UK",
        ] {
            let state = test_state(ready_model(), ChatRelay::disabled());
            let (status, response) = send(state, form_post("/predict", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            let value: Value = serde_json::from_str(&response).unwrap();
            assert_eq!(value["error"]["code"], "VALIDATION_ERROR", "{body}");
        }
    }

    #[tokio::test]
    async fn test_predict_api_malformed_experience_is_bad_request() {
        for body in [
            json!({"experience": -1, "education": "PhD", "role": "Manager", "location": "UK"}),
            json!({"experience": "abc", "education": "PhD", "role": "Manager", "location": "UK"}),
            json!({"education": "PhD", "role": "Manager", "location": "UK"}),
        ] {
            let state = test_state(ready_model(), ChatRelay::disabled());
            let (status, response) = send(state, json_post("/api/v1/predict", body.clone())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            let value: Value = serde_json::from_str(&response).unwrap();
            assert_eq!(value["error"]["code"], "VALIDATION_ERROR", "{body}");
        }
    }

    #[tokio::test]
    async fn test_predict_api_returns_breakdown() {
        let state = test_state(ready_model(), ChatRelay::disabled());
        let (status, body) = send(
            state,
            json_post(
                "/api/v1/predict",
                json!({"experience": 5, "education": "Master's", "role": "Manager", "location": "UK"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["status"], "estimate");
        assert_eq!(value["predicted_salary"], 66_000.0);
        let amounts: Vec<u64> = value["breakdown"]["components"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["amount"].as_u64().unwrap())
            .collect();
        assert_eq!(amounts, vec![30_000, 10_000, 10_000, 15_000, 8_000]);
    }

    #[tokio::test]
    async fn test_predict_api_unknown_location_is_invalid_enum() {
        let state = test_state(ready_model(), ChatRelay::disabled());
        let (status, body) = send(
            state,
            json_post(
                "/api/v1/predict",
                json!({"experience": 1, "education": "PhD", "role": "Intern", "location": "Mars"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("INVALID_ENUM"));
    }

    #[tokio::test]
    async fn test_chat_form_without_key_warns() {
        let state = test_state(ready_model(), ChatRelay::disabled());
        let (status, body) = send(state, form_post("/chat", "query=hello")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"id="chat-warning""#));
    }

    #[tokio::test]
    async fn test_chat_form_relays_and_escapes_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "Managers earn <b>more</b>."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let client: Arc<dyn ChatCompletion> = Arc::new(ChatClient::new(
            "sk-test".to_string(),
            &server.uri(),
            "gpt-3.5-turbo".to_string(),
        ));

        let state = test_state(ready_model(), ChatRelay::new(Some(client)));
        let (_, body) = send(state, form_post("/chat", "query=What+do+managers+earn%3F")).await;
        assert!(body.contains("AI Response"));
        assert!(body.contains("Managers earn &lt;b&gt;more"));
        assert!(!body.contains("<b>more</b>"));
    }

    #[tokio::test]
    async fn test_chat_api_empty_query_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let client: Arc<dyn ChatCompletion> = Arc::new(ChatClient::new(
            "sk-test".to_string(),
            &server.uri(),
            "gpt-3.5-turbo".to_string(),
        ));

        let state = test_state(ready_model(), ChatRelay::new(Some(client)));
        let (status, body) = send(state, json_post("/api/v1/chat", json!({"query": ""}))).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["status"], "idle");
    }

    #[tokio::test]
    async fn test_chat_api_surfaces_external_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_json(json!({"error": {"message": "quota exceeded"}})),
            )
            .mount(&server)
            .await;
        let client: Arc<dyn ChatCompletion> = Arc::new(ChatClient::new(
            "sk-test".to_string(),
            &server.uri(),
            "gpt-3.5-turbo".to_string(),
        ));

        let state = test_state(ready_model(), ChatRelay::new(Some(client)));
        let (_, body) = send(state, json_post("/api/v1/chat", json!({"query": "hi"}))).await;
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(
            value["message"],
            "API Error: quota exceeded (status 429)"
        );
    }

    #[tokio::test]
    async fn test_health_reports_features() {
        let state = test_state(missing_model(), ChatRelay::disabled());
        let (_, body) = send(state, Request::get("/health").body(Body::empty()).unwrap()).await;
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["model_loaded"], false);
        assert_eq!(value["chat_enabled"], false);
    }
}
