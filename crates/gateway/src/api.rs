//! Assistant API handlers.
//!
//! Endpoints:
//!
//! - `POST /`: keyword-routed assistant answer
//! - `POST /generate`: free-form completion
//! - `POST /workstations/analyze`: workstation configuration advice
//! - `GET  /taxonomy/{kind}`: static fastener / screw tables
//!
//! Request bodies are parsed by hand: malformed JSON, or a body that could
//! not be read (including one over the size limit), becomes a 500 carrying
//! the underlying message.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use quadrax_assistant::{WorkstationProfile, classify};
use quadrax_core::identity::AuthenticatedCaller;
use quadrax_core::knowledge::{Taxonomy, TaxonomyRecord};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::SharedState;

/// Context echoed when the caller sends none.
pub const DEFAULT_CONTEXT: &str = "general";

// ── Errors ────────────────────────────────────────────────────────────────

/// Failures surfaced to HTTP clients as `{"error": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

fn parse_body<T: DeserializeOwned>(body: Result<Bytes, BytesRejection>) -> Result<T, ApiError> {
    let body = body.map_err(|rejection| ApiError::Internal(rejection.body_text()))?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Internal(e.to_string()))
}

/// ISO-8601 UTC with millisecond precision, e.g. `2026-10-19T08:15:30.123Z`.
fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

// ── Request / Response types ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    pub message: String,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub response: String,
    pub timestamp: String,
    pub context: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompletionEnvelope {
    pub response: String,
    pub timestamp: String,
    /// "generated", "empty" or "failed"
    pub outcome: String,
}

// ── Handlers ──────────────────────────────────────────────────────────────

/// `POST /`: route the message by keyword and wrap the template.
pub async fn assistant_handler(
    Extension(caller): Extension<AuthenticatedCaller>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AssistantResponse>, ApiError> {
    let request: AssistantRequest = parse_body(body)?;

    let intent = classify(&request.message);
    info!(caller = %caller.id, intent = %intent, "Assistant request routed");

    let context = request
        .context
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CONTEXT.to_string());

    Ok(Json(AssistantResponse {
        response: intent.template().to_string(),
        timestamp: timestamp_now(),
        context,
    }))
}

/// `POST /generate`: general assistant completion.
pub async fn generate_handler(
    State(state): State<SharedState>,
    Extension(caller): Extension<AuthenticatedCaller>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<CompletionEnvelope>, ApiError> {
    let request: GenerateRequest = parse_body(body)?;

    let outcome = state.completion.assist(&request.prompt).await;
    info!(caller = %caller.id, outcome = outcome.kind(), "Completion served");

    Ok(Json(CompletionEnvelope {
        outcome: outcome.kind().to_string(),
        response: outcome.into_text(),
        timestamp: timestamp_now(),
    }))
}

/// `POST /workstations/analyze`: configuration recommendations.
pub async fn analyze_handler(
    State(state): State<SharedState>,
    Extension(caller): Extension<AuthenticatedCaller>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<CompletionEnvelope>, ApiError> {
    let profile: WorkstationProfile = parse_body(body)?;

    let outcome = state.completion.analyze_workstation(&profile).await;
    info!(
        caller = %caller.id,
        function_type = %profile.function_type,
        outcome = outcome.kind(),
        "Workstation analysis served"
    );

    Ok(Json(CompletionEnvelope {
        outcome: outcome.kind().to_string(),
        response: outcome.into_text(),
        timestamp: timestamp_now(),
    }))
}

/// `GET /taxonomy/{kind}`: `fasteners` or `screws`.
pub async fn taxonomy_handler(
    Path(kind): Path<String>,
) -> Result<Json<&'static [TaxonomyRecord]>, ApiError> {
    let taxonomy = match kind.as_str() {
        "fasteners" => Taxonomy::Fasteners,
        "screws" => Taxonomy::Screws,
        other => return Err(ApiError::NotFound(format!("Unknown taxonomy '{other}'"))),
    };
    Ok(Json(taxonomy.records()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_router;
    use crate::test_support::{VALID_TOKEN, test_state, test_state_with};
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use quadrax_assistant::completion::{EMPTY_FALLBACK, FAILURE_FALLBACK};
    use quadrax_assistant::templates;
    use quadrax_core::error::ProviderError;
    use quadrax_telemetry::LogLevel;
    use tower::ServiceExt;

    fn post(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> T {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn models_question_end_to_end() {
        let (state, _) = test_state();
        let app = build_router(state);

        let response = app
            .oneshot(post("/", Some(VALID_TOKEN), r#"{"message":"Tell me about models"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: AssistantResponse = read_json(response).await;
        assert_eq!(json.response, templates::MODEL_MANAGEMENT);
        assert_eq!(json.context, "general");
        assert!(chrono::DateTime::parse_from_rfc3339(&json.timestamp).is_ok());
        assert!(json.timestamp.ends_with('Z'));
    }

    #[tokio::test]
    async fn context_is_echoed() {
        let (state, _) = test_state();
        let app = build_router(state);

        let response = app
            .oneshot(post(
                "/",
                Some(VALID_TOKEN),
                r#"{"message":"new workstation","context":"dashboard"}"#,
            ))
            .await
            .unwrap();

        let json: AssistantResponse = read_json(response).await;
        assert_eq!(json.response, templates::WORKSTATION_HELP);
        assert_eq!(json.context, "dashboard");
    }

    #[tokio::test]
    async fn empty_message_gets_welcome() {
        let (state, _) = test_state();
        let app = build_router(state);

        let response = app
            .oneshot(post("/", Some(VALID_TOKEN), r#"{"message":""}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: AssistantResponse = read_json(response).await;
        assert_eq!(json.response, templates::GENERIC_WELCOME);
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let (state, _) = test_state();
        let app = build_router(state);

        let response = app
            .oneshot(post("/", None, r#"{"message":"Tell me about data"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], br#"{"error":"Unauthorized"}"#);
    }

    #[tokio::test]
    async fn unknown_token_is_unauthorized() {
        let (state, _) = test_state();
        let app = build_router(state);

        let response = app
            .oneshot(post("/", Some("stolen"), r#"{"message":"Tell me about models"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json: ErrorBody = read_json(response).await;
        assert_eq!(json.error, "Unauthorized");
    }

    #[tokio::test]
    async fn malformed_body_is_internal_error() {
        let (state, _) = test_state();
        let app = build_router(state);

        let response = app
            .oneshot(post("/", Some(VALID_TOKEN), "{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json: ErrorBody = read_json(response).await;
        assert!(!json.error.is_empty());
    }

    #[tokio::test]
    async fn missing_message_field_is_internal_error() {
        let (state, _) = test_state();
        let app = build_router(state);

        let response = app
            .oneshot(post("/", Some(VALID_TOKEN), r#"{"context":"x"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json: ErrorBody = read_json(response).await;
        assert!(json.error.contains("message"));
    }

    #[tokio::test]
    async fn oversized_body_keeps_json_envelope() {
        let (state, _) = test_state();
        let app = build_router(state);

        let message = "a".repeat(crate::MAX_BODY_BYTES + 1);
        let body = format!(r#"{{"message":"{message}"}}"#);
        let response = app
            .oneshot(post("/", Some(VALID_TOKEN), &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()["content-type"],
            "application/json"
        );

        let json: ErrorBody = read_json(response).await;
        assert!(json.error.contains("length limit"), "{}", json.error);
    }

    #[tokio::test]
    async fn oversized_body_on_generate_is_internal_error() {
        let (state, _) = test_state();
        let app = build_router(state);

        let prompt = "p".repeat(crate::MAX_BODY_BYTES * 2);
        let body = format!(r#"{{"prompt":"{prompt}"}}"#);
        let response = app
            .oneshot(post("/generate", Some(VALID_TOKEN), &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json: ErrorBody = read_json(response).await;
        assert!(!json.error.is_empty());
    }

    #[tokio::test]
    async fn generate_returns_completion() {
        let (state, _) = test_state();
        let app = build_router(state);

        let response = app
            .oneshot(post("/generate", Some(VALID_TOKEN), r#"{"prompt":"hi"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: CompletionEnvelope = read_json(response).await;
        assert_eq!(json.response, "Mock completion");
        assert_eq!(json.outcome, "generated");
    }

    #[tokio::test]
    async fn generate_upstream_failure_degrades_gracefully() {
        let (state, sink) =
            test_state_with(Err(ProviderError::Network("connection reset".into())));
        let app = build_router(state);

        let response = app
            .oneshot(post("/generate", Some(VALID_TOKEN), r#"{"prompt":"hi"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: CompletionEnvelope = read_json(response).await;
        assert_eq!(json.response, FAILURE_FALLBACK);
        assert_eq!(json.outcome, "failed");
        assert!(sink.entries().iter().any(|e| e.level == LogLevel::Error));
    }

    #[tokio::test]
    async fn analyze_with_empty_upstream_answer() {
        let (state, _) = test_state_with(Ok(None));
        let app = build_router(state);

        let response = app
            .oneshot(post(
                "/workstations/analyze",
                Some(VALID_TOKEN),
                r#"{"description":"CV training","functionType":"training","nature":["gpu"]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: CompletionEnvelope = read_json(response).await;
        assert_eq!(json.response, EMPTY_FALLBACK);
        assert_eq!(json.outcome, "empty");
    }

    #[tokio::test]
    async fn analyze_requires_auth() {
        let (state, _) = test_state();
        let app = build_router(state);

        let response = app
            .oneshot(post("/workstations/analyze", None, "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn taxonomy_is_public() {
        let (state, _) = test_state();
        let app = build_router(state);

        let req = Request::builder()
            .uri("/taxonomy/screws")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = read_json(response).await;
        let records = json.as_array().unwrap();
        assert_eq!(records.len(), Taxonomy::Screws.records().len());
        assert!(records[0]["variants"].as_array().is_some());
    }

    #[tokio::test]
    async fn unknown_taxonomy_is_not_found() {
        let (state, _) = test_state();
        let app = build_router(state);

        let req = Request::builder()
            .uri("/taxonomy/nails")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
