//! End-to-end integration tests for the QUADRAX•ML assistant service.
//!
//! These tests drive the full HTTP pipeline: CORS, request logging,
//! authentication through an identity provider, keyword routing and the
//! completion client, with the operator log written to a real daily file.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use quadrax_assistant::CompletionClient;
use quadrax_assistant::completion::{EMPTY_FALLBACK, FAILURE_FALLBACK};
use quadrax_assistant::templates;
use quadrax_core::error::{IdentityError, ProviderError};
use quadrax_core::identity::{AuthenticatedCaller, IdentityProvider};
use quadrax_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use quadrax_gateway::{GatewayState, build_router};
use quadrax_telemetry::{DailyFileSink, LogLevel, LogSink, Logger, MemorySink};
use tower::ServiceExt;

// ── Mock Provider ────────────────────────────────────────────────────────

/// A mock provider that returns scripted results in sequence.
struct ScriptedProvider {
    responses: Mutex<Vec<Result<Option<String>, ProviderError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    fn new(responses: Vec<Result<Option<String>, ProviderError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn request(&self, index: usize) -> ProviderRequest {
        self.requests.lock().unwrap()[index].clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let model = request.model.clone();
        self.requests.lock().unwrap().push(request);

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            panic!("ScriptedProvider exhausted after {} calls", self.calls());
        }
        let content = responses.remove(0)?;
        Ok(ProviderResponse {
            content,
            model,
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
        })
    }
}

// ── Mock identity service ────────────────────────────────────────────────

/// Resolves `user-<id>` tokens; `outage` simulates an unreachable service.
struct PrefixIdentity;

#[async_trait::async_trait]
impl IdentityProvider for PrefixIdentity {
    fn name(&self) -> &str {
        "e2e_identity"
    }

    async fn resolve(&self, token: &str) -> Result<Option<AuthenticatedCaller>, IdentityError> {
        if token == "outage" {
            return Err(IdentityError::Network("connection refused".into()));
        }
        Ok(token
            .strip_prefix("user-")
            .map(|id| AuthenticatedCaller::new(id.to_string())))
    }
}

// ── Harness ──────────────────────────────────────────────────────────────

struct Harness {
    app: axum::Router,
    provider: Arc<ScriptedProvider>,
    memory: MemorySink,
    log_dir: tempfile::TempDir,
}

fn harness(responses: Vec<Result<Option<String>, ProviderError>>) -> Harness {
    let log_dir = tempfile::tempdir().unwrap();
    let memory = MemorySink::new();
    let sinks: Vec<Box<dyn LogSink>> = vec![
        Box::new(memory.clone()),
        Box::new(DailyFileSink::new(log_dir.path().join("logs"))),
    ];
    let logger = Arc::new(Logger::with_sinks(LogLevel::Info, sinks));

    let provider = Arc::new(ScriptedProvider::new(responses));
    let completion = Arc::new(CompletionClient::new(
        provider.clone(),
        "gpt-4o-mini",
        logger.clone(),
    ));

    let state = Arc::new(GatewayState {
        identity: Arc::new(PrefixIdentity),
        completion,
        logger,
    });

    Harness {
        app: build_router(state),
        provider,
        memory,
        log_dir,
    }
}

fn post(uri: &str, token: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .header("x-forwarded-for", "198.51.100.4")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn log_lines(h: &Harness) -> Vec<serde_json::Value> {
    let dir = h.log_dir.path().join("logs");
    let mut lines = Vec::new();
    for entry in std::fs::read_dir(dir).unwrap() {
        let content = std::fs::read_to_string(entry.unwrap().path()).unwrap();
        for line in content.lines() {
            lines.push(serde_json::from_str(line).unwrap());
        }
    }
    lines
}

// ── Tests ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn assistant_answers_without_touching_the_backend() {
    let h = harness(vec![]);

    let response = h
        .app
        .clone()
        .oneshot(post("/", "user-42", r#"{"message":"Tell me about models"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["response"], templates::MODEL_MANAGEMENT);
    assert_eq!(json["context"], "general");
    assert_eq!(h.provider.calls(), 0);
}

#[tokio::test]
async fn workstation_keyword_wins_over_later_intents() {
    let h = harness(vec![]);

    let response = h
        .app
        .clone()
        .oneshot(post(
            "/",
            "user-1",
            r#"{"message":"Which MODEL and DATASET fit my workstation?","context":"wizard"}"#,
        ))
        .await
        .unwrap();

    let json = json_body(response).await;
    assert_eq!(json["response"], templates::WORKSTATION_HELP);
    assert_eq!(json["context"], "wizard");
}

#[tokio::test]
async fn identity_outage_is_unauthorized() {
    let h = harness(vec![]);

    let response = h
        .app
        .clone()
        .oneshot(post("/", "outage", r#"{"message":"hi"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"], "Unauthorized");
}

#[tokio::test]
async fn completion_outcomes_map_to_fallback_text() {
    let h = harness(vec![
        Ok(Some("Start with 2x A100.".into())),
        Ok(None),
        Err(ProviderError::RateLimited {
            retry_after_secs: 30,
        }),
    ]);

    let expected = [
        ("Start with 2x A100.", "generated"),
        (EMPTY_FALLBACK, "empty"),
        (FAILURE_FALLBACK, "failed"),
    ];
    for (text, outcome) in expected {
        let response = h
            .app
            .clone()
            .oneshot(post("/generate", "user-9", r#"{"prompt":"Size my cluster"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["response"], text);
        assert_eq!(json["outcome"], outcome);
    }

    assert_eq!(h.provider.calls(), 3);
    let request = h.provider.request(0);
    assert_eq!(request.model, "gpt-4o-mini");
    assert_eq!(request.max_tokens, Some(1000));
    assert_eq!(request.messages[1].content, "Size my cluster");

    let errors: Vec<_> = h
        .memory
        .entries()
        .into_iter()
        .filter(|e| e.level == LogLevel::Error)
        .collect();
    assert_eq!(errors.len(), 1);
}

#[tokio::test]
async fn workstation_analysis_builds_structured_prompt() {
    let h = harness(vec![Ok(Some("Use NVMe scratch.".into()))]);

    let response = h
        .app
        .clone()
        .oneshot(post(
            "/workstations/analyze",
            "user-3",
            r#"{"description":"Fine-tune LLMs","functionType":"training","nature":["gpu","batch"]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["response"], "Use NVMe scratch.");

    let request = h.provider.request(0);
    assert_eq!(request.max_tokens, Some(800));
    let user_prompt = &request.messages[1].content;
    assert!(user_prompt.contains("Description: Fine-tune LLMs"));
    assert!(user_prompt.contains("Nature: gpu, batch"));
}

#[tokio::test]
async fn exchanges_are_written_to_the_daily_file() {
    let h = harness(vec![]);

    h.app
        .clone()
        .oneshot(post("/", "user-5", r#"{"message":"upload data"}"#))
        .await
        .unwrap();
    h.app
        .clone()
        .oneshot(post("/", "nobody", r#"{"message":"upload data"}"#))
        .await
        .unwrap();

    let lines = log_lines(&h);
    assert_eq!(lines.len(), 2);

    assert_eq!(lines[0]["level"], "INFO");
    assert_eq!(lines[0]["meta"]["status"], 200);
    assert_eq!(lines[0]["meta"]["ip"], "198.51.100.4");
    assert!(lines[0]["timestamp"].as_str().is_some());

    assert_eq!(lines[1]["level"], "WARN");
    assert_eq!(lines[1]["meta"]["status"], 401);
    assert_eq!(h.memory.count(), 2);
}

#[tokio::test]
async fn preflight_skips_auth_but_is_logged() {
    let h = harness(vec![]);

    let req = Request::builder()
        .method("OPTIONS")
        .uri("/")
        .header("origin", "https://app.quadrax.io")
        .header("access-control-request-method", "POST")
        .header("x-forwarded-for", "198.51.100.7")
        .body(Body::empty())
        .unwrap();
    let response = h.app.clone().oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");

    let entries = h.memory.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].level, LogLevel::Info);
    let meta = entries[0].meta.as_ref().unwrap();
    assert_eq!(meta["method"], "OPTIONS");
    assert_eq!(meta["path"], "/");
    assert_eq!(meta["status"], 200);
    assert_eq!(meta["ip"], "198.51.100.7");

    let lines = log_lines(&h);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["meta"]["method"], "OPTIONS");
}

#[tokio::test]
async fn taxonomy_served_without_credentials() {
    let h = harness(vec![]);

    let req = Request::builder()
        .uri("/taxonomy/fasteners")
        .body(Body::empty())
        .unwrap();
    let response = h.app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    let kinds: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["type"].as_str().unwrap().to_string())
        .collect();
    assert!(kinds.contains(&"Bolt".to_string()));
    assert!(kinds.contains(&"Washer".to_string()));
}
