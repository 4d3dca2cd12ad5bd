//! HTTP edge gateway for the QUADRAX•ML assistant.
//!
//! Exposes the assistant endpoint (`POST /`), the completion-backed
//! endpoints, health and reference data. Built on Axum.
//!
//! Layers, outermost first:
//! - HTTP trace logging
//! - operator request log (method, path, IP, status, duration), which
//!   also sees the preflight responses produced by CORS
//! - CORS (`*` origin); answers every `OPTIONS` request itself
//! - request body size limit (1 MB)
//! - bearer authentication on the assistant routes

pub mod api;
pub mod identity;

use axum::extract::{ConnectInfo, DefaultBodyLimit, Request, State};
use axum::http::{HeaderMap, HeaderName, Method, header};
use axum::middleware::{self, Next};
use axum::response::{Json, Response};
use axum::{
    Router,
    routing::{get, post},
};
use quadrax_assistant::CompletionClient;
use quadrax_core::identity::IdentityProvider;
use quadrax_telemetry::Logger;
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::api::ApiError;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub identity: Arc<dyn IdentityProvider>,
    pub completion: Arc<CompletionClient>,
    pub logger: Arc<Logger>,
}

pub type SharedState = Arc<GatewayState>;

/// Request bodies above this size are rejected with a 500 `{"error"}`.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Headers browsers may send on cross-origin requests.
const ALLOWED_HEADERS: [HeaderName; 4] = [
    header::AUTHORIZATION,
    HeaderName::from_static("x-client-info"),
    HeaderName::from_static("apikey"),
    header::CONTENT_TYPE,
];

/// Build the Axum router with all gateway routes and layers.
pub fn build_router(state: SharedState) -> Router {
    let protected = Router::new()
        .route("/", post(api::assistant_handler))
        .route("/generate", post(api::generate_handler))
        .route("/workstations/analyze", post(api::analyze_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_handler))
        .route("/taxonomy/{kind}", get(api::taxonomy_handler))
        .merge(protected)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors_layer())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            request_log_middleware,
        ))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(ALLOWED_HEADERS)
}

/// Start the gateway HTTP server.
///
/// The logger is built by the caller so that startup messages and request
/// logs share one instance.
pub async fn start(
    config: quadrax_config::AppConfig,
    logger: Arc<Logger>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let provider = quadrax_providers::build_from_config(&config);
    let completion = Arc::new(CompletionClient::new(
        provider,
        &config.model,
        logger.clone(),
    ));
    let identity = identity::build_from_config(&config.identity);

    let state = Arc::new(GatewayState {
        identity,
        completion,
        logger: logger.clone(),
    });
    let app = build_router(state);

    info!(addr = %addr, model = %config.model, "Gateway starting");
    logger.info(
        "Gateway listening",
        Some(json!({ "addr": addr, "model": config.model })),
    )?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

// --- Middleware ---

/// Extract the bearer credential from the Authorization header.
/// The scheme name is matched case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Authentication middleware for the assistant routes.
///
/// Resolves the bearer token through the identity provider and stores the
/// caller as a request extension. Anything short of a resolved caller is a
/// 401, including an unreachable identity service.
async fn auth_middleware(
    State(state): State<SharedState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = bearer_token(req.headers()) else {
        warn!(path = %req.uri().path(), "Missing bearer token");
        return Err(ApiError::Unauthorized);
    };

    let caller = match state.identity.resolve(&token).await {
        Ok(caller) => caller,
        Err(e) => {
            warn!(provider = %state.identity.name(), error = %e, "Identity lookup failed");
            None
        }
    };

    match caller {
        Some(caller) => {
            req.extensions_mut().insert(caller);
            Ok(next.run(req).await)
        }
        None => {
            warn!(path = %req.uri().path(), "Unauthorized request, token did not resolve");
            Err(ApiError::Unauthorized)
        }
    }
}

/// Best-effort client address: first `X-Forwarded-For` hop, then the
/// socket peer, then "unknown".
fn client_ip(req: &Request) -> String {
    if let Some(forwarded) = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return forwarded.to_string();
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Operator request log. Status >= 400 is logged at WARN, the rest at INFO.
async fn request_log_middleware(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let ip = client_ip(&req);
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let duration_ms = started.elapsed().as_millis() as u64;
    let message = format!("{method} {path} {status} - {duration_ms}ms");
    let meta = json!({
        "method": method.as_str(),
        "path": path,
        "ip": ip,
        "status": status,
        "duration_ms": duration_ms,
    });

    let logged = if status >= 400 {
        state.logger.warn(message, Some(meta))
    } else {
        state.logger.info(message, Some(meta))
    };
    if let Err(e) = logged {
        warn!(error = %e, "Failed to write request log");
    }

    response
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
