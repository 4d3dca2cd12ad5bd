//! Caller identity: who is talking to the service.
//!
//! Authentication is delegated to an external identity service. The
//! gateway hands it the request's bearer credential and gets back an
//! [`AuthenticatedCaller`], or nothing.

use crate::error::IdentityError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// An identity validated by the external identity service.
///
/// Opaque to the rest of the system: handlers only log the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedCaller {
    /// Stable user id issued by the identity service
    pub id: String,

    /// Email, when the identity service exposes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl AuthenticatedCaller {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
        }
    }
}

/// Resolves a bearer credential to a caller.
///
/// `Ok(None)` means the credential is unknown or expired. `Err` means the
/// identity service could not be asked at all.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// A human-readable name for logs (e.g., "remote", "static").
    fn name(&self) -> &str;

    /// Resolve a bearer token (without the `Bearer ` prefix).
    async fn resolve(
        &self,
        token: &str,
    ) -> std::result::Result<Option<AuthenticatedCaller>, IdentityError>;
}
