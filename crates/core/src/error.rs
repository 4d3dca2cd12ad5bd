//! Error types for the QUADRAX•ML domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum.

use thiserror::Error;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Failures talking to the external identity service.
///
/// An unknown or expired token is *not* an error: resolvers return
/// `Ok(None)` for those.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    #[error("Identity service unreachable: {0}")]
    Network(String),

    #[error("Identity service returned an invalid response: {0}")]
    InvalidResponse(String),
}
