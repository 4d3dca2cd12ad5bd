//! Identity providers used by the auth middleware.
//!
//! - [`RemoteIdentityProvider`] asks an external user-info endpoint.
//! - [`StaticTokenProvider`] accepts a fixed list of pre-shared tokens.

use async_trait::async_trait;
use quadrax_config::IdentityConfig;
use quadrax_core::error::IdentityError;
use quadrax_core::identity::{AuthenticatedCaller, IdentityProvider};
use std::sync::Arc;
use tracing::{debug, warn};

/// Validates bearer tokens against a remote user-info endpoint.
///
/// `GET <url>` with `Authorization: Bearer <token>` and, when configured,
/// an `apikey` header. A 200 response carrying `{id, email?}` resolves the
/// caller; 401/403/404 mean the token is not valid.
pub struct RemoteIdentityProvider {
    url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl RemoteIdentityProvider {
    pub fn new(url: impl Into<String>, api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });

        Self {
            url: url.into(),
            api_key,
            client,
        }
    }
}

#[async_trait]
impl IdentityProvider for RemoteIdentityProvider {
    fn name(&self) -> &str {
        "remote"
    }

    async fn resolve(&self, token: &str) -> Result<Option<AuthenticatedCaller>, IdentityError> {
        let mut request = self.client.get(&self.url).bearer_auth(token);
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| IdentityError::Network(e.to_string()))?;

        match response.status().as_u16() {
            200 => {
                let caller: AuthenticatedCaller = response
                    .json()
                    .await
                    .map_err(|e| IdentityError::InvalidResponse(e.to_string()))?;
                debug!(caller = %caller.id, "Identity resolved");
                Ok(Some(caller))
            }
            401 | 403 | 404 => Ok(None),
            status => Err(IdentityError::InvalidResponse(format!(
                "unexpected status {status}"
            ))),
        }
    }
}

/// Accepts any token from a configured list.
pub struct StaticTokenProvider {
    tokens: Vec<String>,
}

impl StaticTokenProvider {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl IdentityProvider for StaticTokenProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn resolve(&self, token: &str) -> Result<Option<AuthenticatedCaller>, IdentityError> {
        Ok(self
            .tokens
            .iter()
            .position(|t| t == token)
            .map(|index| AuthenticatedCaller::new(format!("static-{index}"))))
    }
}

/// Pick the identity provider for a configuration.
///
/// The remote service wins when a URL is configured. With neither a URL
/// nor static tokens every request is rejected.
pub fn build_from_config(config: &IdentityConfig) -> Arc<dyn IdentityProvider> {
    match &config.url {
        Some(url) => Arc::new(RemoteIdentityProvider::new(url, config.api_key.clone())),
        None => {
            if config.tokens.is_empty() {
                warn!("No identity service or static tokens configured; all requests will be rejected");
            }
            Arc::new(StaticTokenProvider::new(config.tokens.clone()))
        }
    }
}
