//! Analysis-model abstraction for the chat panel.
//!
//! The dashboard treats the language model as an injected capability: a
//! [`GeminiModel`](gemini::GeminiModel) when credentials are configured,
//! nothing otherwise. The trait supports dynamic dispatch so the chat
//! session never depends on a concrete vendor.

pub mod gemini;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};
use thiserror::Error;

/// Errors from one model invocation.
#[derive(Debug, Error)]
pub enum ModelError {
    /// An error during the API request (e.g., network failure, timeout).
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The model API returned a specific error message.
    #[error("API error: {0}")]
    Api(String),

    /// The model answered with no usable candidate text.
    #[error("model returned an empty response")]
    EmptyResponse,
}

/// Errors that can occur while constructing a model provider.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ModelInitError {
    /// Failed to build the HTTP client.
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        /// Underlying client error.
        source: reqwest::Error,
        /// Captured backtrace.
        backtrace: Backtrace,
    },

    /// The configured API key is not a valid header value.
    #[snafu(display("Invalid API key: {source}"))]
    InvalidKey {
        /// Underlying header error.
        source: reqwest::header::InvalidHeaderValue,
        /// Captured backtrace.
        backtrace: Backtrace,
    },
}

/// Trait for generating an analysis answer from a rendered prompt.
///
/// One call per user question; the caller treats it as a single
/// best-effort synchronous call with no retry.
#[async_trait]
pub trait AnalysisModel {
    /// Generates the answer text for one prompt.
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;
}
