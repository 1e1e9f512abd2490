use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use tower::util::ServiceExt;

use docqa::config::AppConfig;
use docqa::error::Result;
use docqa::providers::{EmbeddingProvider, LlmClient};
use docqa::server::state::AppState;
use docqa::server::QaServer;

struct StubEmbedder;

#[async_trait]
impl EmbeddingProvider for StubEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![1.0, 0.0])
    }

    fn dimensions(&self) -> usize {
        2
    }

    fn name(&self) -> &str {
        "stub"
    }
}

struct StubLlm;

#[async_trait]
impl LlmClient for StubLlm {
    async fn generate(&self, _prompt: &str, _stop: Option<&[String]>) -> Result<String> {
        Ok("FINAL ANSWER: stub\nSOURCES:".to_string())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

fn test_router() -> axum::Router {
    let config = AppConfig::default();
    let state = AppState::with_providers(config.clone(), Arc::new(StubEmbedder), Arc::new(StubLlm));
    QaServer::with_state(config, state).build_router()
}

fn multipart_request(parts: &[(&str, Option<(&str, &str)>, &str)]) -> Request<Body> {
    let boundary = "X-DOCQA-TEST-BOUNDARY";
    let mut body = String::new();

    for (name, file_info, value) in parts {
        body.push_str(&format!("--{}\r\n", boundary));
        match file_info {
            Some((filename, content_type)) => {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    name, filename
                ));
                body.push_str(&format!("Content-Type: {}\r\n\r\n", content_type));
            }
            None => {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    name
                ));
            }
        }
        body.push_str(value);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{}--\r\n", boundary));

    Request::builder()
        .method("POST")
        .uri("/api/ask")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_responds_ok() {
    let router = test_router();

    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn reset_endpoint_reports_cleared_uploads() {
    let router = test_router();

    let response = router
        .oneshot(
            Request::post("/api/reset")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["message"].as_str().unwrap().contains("reset"));
}

#[tokio::test]
async fn ask_without_a_file_is_a_client_error() {
    let router = test_router();

    let response = router
        .oneshot(multipart_request(&[("prompt", None, "What is this?")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("file"));
}

#[tokio::test]
async fn ask_without_a_prompt_is_a_client_error() {
    let router = test_router();

    let response = router
        .oneshot(multipart_request(&[(
            "file",
            Some(("report.pdf", "application/pdf")),
            "%PDF-1.4 not really",
        )]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("prompt"));
}

#[tokio::test]
async fn ask_with_unsupported_mime_type_is_rejected_before_parsing() {
    let router = test_router();

    let response = router
        .oneshot(multipart_request(&[
            (
                "file",
                Some(("notes.docx", "application/msword")),
                "binary-ish content",
            ),
            ("prompt", None, "Summarize this"),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Unsupported file type"));
}
