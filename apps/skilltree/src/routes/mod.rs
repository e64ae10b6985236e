pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::skill_tree::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/skill-tree", post(handlers::handle_generate))
        .route(
            "/api/v1/skill-tree/pdf",
            post(handlers::handle_generate_from_pdf).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/skill-tree/html", post(handlers::handle_generate_html))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::extraction::{ExtractionCoordinator, KeywordMatcher, Lexicon, MatchScoring};

    const BOUNDARY: &str = "skilltree-test-boundary";

    fn state(max_upload_bytes: usize) -> AppState {
        let lexicon = Arc::new(Lexicon::builtin());
        let coordinator = ExtractionCoordinator::new(KeywordMatcher::new(Arc::clone(&lexicon)), None);
        AppState {
            config: Config {
                xai_api_key: None,
                xai_api_url: String::new(),
                xai_model: String::new(),
                ai_timeout: Duration::from_secs(1),
                lexicon_path: None,
                keyword_scoring: MatchScoring::default(),
                max_upload_bytes,
                port: 0,
                rust_log: "info".to_string(),
            },
            lexicon,
            coordinator: Arc::new(coordinator),
        }
    }

    fn multipart(field: &str, payload: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"resume.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(payload);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::post("/api/v1/skill-tree/pdf")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn error_code(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        json["error"]["code"].as_str().unwrap_or_default().to_string()
    }

    #[tokio::test]
    async fn test_pdf_upload_without_file_field_is_400() {
        let response = build_router(state(1024 * 1024))
            .oneshot(multipart("attachment", b"%PDF-1.4"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_pdf_upload_over_limit_is_413() {
        let response = build_router(state(1024))
            .oneshot(multipart("file", &vec![b'a'; 16 * 1024]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(error_code(response).await, "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_blank_text_is_422_on_json_and_html_routes() {
        for uri in ["/api/v1/skill-tree", "/api/v1/skill-tree/html"] {
            let response = build_router(state(1024))
                .oneshot(json_post(uri, r#"{"text": "  "}"#))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
            assert_eq!(error_code(response).await, "UNPROCESSABLE_ENTITY");
        }
    }

    #[tokio::test]
    async fn test_text_request_returns_keyword_tree() {
        let response = build_router(state(1024))
            .oneshot(json_post("/api/v1/skill-tree", r#"{"text": "Rust and Python"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["strategy"], "keyword");
        assert_eq!(json["tree"]["categories"][0]["name"], "Technical");
    }
}
