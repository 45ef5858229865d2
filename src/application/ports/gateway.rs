//! Provider gateway port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::deck::ProviderId;

/// Provider gateway errors
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("No gateway configured for {0}")]
    NotConfigured(ProviderId),

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Empty response")]
    EmptyResponse,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Port for provider-specific text transformation
#[async_trait]
pub trait ProviderGateway: Send + Sync {
    /// Transform `content` according to `instruction` with the given provider.
    ///
    /// # Returns
    /// The generated text or an error
    async fn transform(
        &self,
        provider: ProviderId,
        instruction: &str,
        content: &str,
    ) -> Result<String, GatewayError>;
}

/// Blanket implementation for boxed gateways
#[async_trait]
impl ProviderGateway for Box<dyn ProviderGateway> {
    async fn transform(
        &self,
        provider: ProviderId,
        instruction: &str,
        content: &str,
    ) -> Result<String, GatewayError> {
        self.as_ref().transform(provider, instruction, content).await
    }
}
