//! Offline gateway with deterministic responses

use async_trait::async_trait;

use crate::application::ports::{GatewayError, ProviderGateway};
use crate::domain::deck::ProviderId;

/// Characters of the instruction echoed back
const ECHO_CHARS: usize = 50;

/// Gateway answering from the instruction alone, without network access
#[derive(Debug, Default, Clone, Copy)]
pub struct MockGateway;

impl MockGateway {
    pub fn new() -> Self {
        Self
    }

    /// Response for the given provider and instruction
    pub fn response(provider: ProviderId, instruction: &str) -> String {
        let head: String = instruction.chars().take(ECHO_CHARS).collect();
        format!("{} response to: {}", provider.vendor(), head)
    }
}

#[async_trait]
impl ProviderGateway for MockGateway {
    async fn transform(
        &self,
        provider: ProviderId,
        instruction: &str,
        _content: &str,
    ) -> Result<String, GatewayError> {
        Ok(Self::response(provider, instruction))
    }
}
