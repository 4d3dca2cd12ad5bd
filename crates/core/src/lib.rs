//! # QUADRAX•ML Core
//!
//! Domain types, traits, and error definitions for the QUADRAX•ML
//! assistant service. This crate has **no framework dependencies**: it
//! defines the model every other crate implements against.
//!
//! The two outbound collaborators of the service, the text-generation
//! backend and the identity service, are traits here ([`Provider`] and
//! [`IdentityProvider`]). Their HTTP implementations live in
//! `quadrax-providers` and `quadrax-gateway`; tests swap in mocks.

pub mod error;
pub mod identity;
pub mod knowledge;
pub mod message;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use error::{IdentityError, ProviderError};
pub use identity::{AuthenticatedCaller, IdentityProvider};
pub use knowledge::{
    FastenerTaxonomyRecord, ScrewTaxonomyRecord, Taxonomy, TaxonomyRecord, TaxonomyVariant,
};
pub use message::{Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
