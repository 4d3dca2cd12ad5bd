//! The QUADRAX•ML assistant.
//!
//! Two independent ways of answering a user:
//!
//! 1. **Intent routing** ([`router`]): a keyword scan over the message picks
//!    one of four fixed response templates. Pure, total, no I/O.
//! 2. **Completion** ([`completion`]): a single call to the text-generation
//!    backend with a canned system prompt. Failures never escape; they come
//!    back as a [`CompletionOutcome`] the caller turns into text.

pub mod completion;
pub mod prompts;
pub mod router;
pub mod templates;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use completion::{CompletionClient, CompletionOutcome, CompletionParams};
pub use prompts::WorkstationProfile;
pub use router::{Intent, classify, route};
