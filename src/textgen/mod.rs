//! Text-generation collaborator interface.
//!
//! The dating chat delegates reply writing to an external
//! chat-completion service. The service is opaque, possibly slow, and
//! possibly failing; this module exposes it behind [`TextGenerator`] so
//! callers receive an explicit `Result` and decide for themselves how to
//! degrade (the chat service substitutes a static fallback reply).

pub mod http;

pub use http::HttpTextGenerator;

use async_trait::async_trait;

/// Errors from the text-generation collaborator.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("generation request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status.
    #[error("generation endpoint returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// Endpoint answered 200 but without usable content.
    #[error("generation response missing content")]
    EmptyResponse,

    /// Generator misconfiguration.
    #[error("generator config error: {0}")]
    Config(String),
}

/// An opaque text-generation service.
///
/// Implementations take a system prompt and a user message and return
/// the generated reply text.
#[async_trait]
pub trait TextGenerator: Send + Sync + std::fmt::Debug {
    /// Generates a reply for the given prompts.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] when the collaborator is
    /// unreachable, times out, or answers without content.
    async fn generate(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, GenerationError>;
}
