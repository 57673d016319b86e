#![allow(dead_code)]

use axum::{body::Body, http::Request, Router};
use bfhl_service::config::{BfhlConfig, GeminiSettings, HttpSettings, DEFAULT_BODY_LIMIT_BYTES};
use bfhl_service::services::providers::mock::MockTextProvider;
use bfhl_service::services::providers::TextProvider;
use bfhl_service::{build_router, AppState, Application};
use http_body_util::BodyExt;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const TEST_EMAIL: &str = "ops@example.com";
pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_MODEL: &str = "gemini-2.5-flash";

pub fn test_config(gemini_base_url: &str) -> BfhlConfig {
    BfhlConfig {
        common: CoreConfig { port: 0 }, // Random port for testing
        official_email: TEST_EMAIL.to_string(),
        gemini: GeminiSettings {
            api_key: Secret::new(TEST_API_KEY.to_string()),
            model: TEST_MODEL.to_string(),
            base_url: gemini_base_url.to_string(),
            timeout_secs: 5,
        },
        http: HttpSettings {
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        },
    }
}

pub fn router_with(provider: Arc<dyn TextProvider>) -> Router {
    build_router(AppState::new(test_config("http://127.0.0.1:9"), provider))
}

pub fn router() -> Router {
    router_with(Arc::new(MockTextProvider::answering("Paris.")))
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Drive one request through the router; return status and parsed body.
pub async fn send(app: Router, request: Request<Body>) -> (u16, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status().as_u16();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    /// Spawn the real HTTP server with the Gemini provider pointed at
    /// `gemini_base_url`.
    pub async fn spawn(gemini_base_url: &str) -> Self {
        let app = Application::build(test_config(gemini_base_url))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }
}
