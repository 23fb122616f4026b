//! External AI-provider seam.
//!
//! The coordinator only ever talks to a [`SuggestionProvider`]; the concrete
//! HTTP clients for OpenAI, Anthropic and friends live outside this crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors a provider call can surface.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider call failed (network, auth, rate limit, ...).
    #[error("provider call failed: {message}")]
    Call {
        /// Message as reported by the provider client
        message: String,
    },

    /// The provider answered with no usable text.
    #[error("provider returned an empty reply")]
    EmptyReply,
}

impl ProviderError {
    pub fn call(message: impl Into<String>) -> Self {
        Self::Call {
            message: message.into(),
        }
    }
}

/// Result type for provider operations
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// One suggestion query, assembled by the coordinator from config and budgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub prompt: String,
    pub model: String,
    pub max_input_tokens: u32,
    pub max_output_tokens: u32,
}

/// An AI provider that can turn a prompt into automation suggestions.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &str;

    /// Ask the provider for suggestions, returning its raw reply text.
    async fn generate(&self, request: &SuggestionRequest) -> ProviderResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::call("rate limited");
        assert_eq!(err.to_string(), "provider call failed: rate limited");

        let empty = ProviderError::EmptyReply;
        assert!(empty.to_string().contains("empty reply"));
    }
}
