//! Per-provider gateway selection

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{GatewayError, ProviderGateway};
use crate::domain::config::{AppConfig, GatewayMode};
use crate::domain::deck::{ProviderId, ALL_PROVIDERS};

use super::{ChatCompletionsGateway, MockGateway};

/// Routes each provider to its configured backend.
///
/// Providers without a route fail with [`GatewayError::NotConfigured`].
#[derive(Default)]
pub struct ProviderRouter {
    routes: HashMap<ProviderId, Box<dyn ProviderGateway>>,
}

impl ProviderRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `provider` with `gateway`
    pub fn route(mut self, provider: ProviderId, gateway: impl ProviderGateway + 'static) -> Self {
        self.routes.insert(provider, Box::new(gateway));
        self
    }

    /// Whether `provider` has a backend
    pub fn is_routed(&self, provider: ProviderId) -> bool {
        self.routes.contains_key(&provider)
    }

    /// Build routes from the `providers` and `api` config sections
    pub fn from_config(config: &AppConfig) -> Self {
        ALL_PROVIDERS
            .iter()
            .fold(Self::new(), |router, &provider| {
                match config.gateway_mode(provider) {
                    GatewayMode::Mock => router.route(provider, MockGateway::new()),
                    GatewayMode::Live => router.route(provider, live_gateway(config)),
                    GatewayMode::Off => router,
                }
            })
    }
}

fn live_gateway(config: &AppConfig) -> ChatCompletionsGateway {
    let mut gateway = ChatCompletionsGateway::new(config.api_endpoint_or_default());
    if let Some(key) = config.api_key() {
        gateway = gateway.with_api_key(key);
    }
    if let Some(model) = config.api_model() {
        gateway = gateway.with_model(model);
    }
    gateway
}

#[async_trait]
impl ProviderGateway for ProviderRouter {
    async fn transform(
        &self,
        provider: ProviderId,
        instruction: &str,
        content: &str,
    ) -> Result<String, GatewayError> {
        match self.routes.get(&provider) {
            Some(gateway) => gateway.transform(provider, instruction, content).await,
            None => {
                debug!(%provider, "no gateway configured");
                Err(GatewayError::NotConfigured(provider))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::ProvidersConfig;

    #[test]
    fn default_routes() {
        let router = ProviderRouter::from_config(&AppConfig::defaults());
        for provider in ALL_PROVIDERS {
            assert!(router.is_routed(*provider));
        }
    }

    #[tokio::test]
    async fn off_provider_is_not_configured() {
        let config = AppConfig {
            providers: Some(ProvidersConfig {
                gemini: Some("off".to_string()),
                ..Default::default()
            }),
            ..AppConfig::defaults()
        };
        let router = ProviderRouter::from_config(&config);

        let err = router
            .transform(ProviderId::Gemini, "x", "y")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NotConfigured(ProviderId::Gemini)));
    }

    #[tokio::test]
    async fn mock_route_answers_offline() {
        let router = ProviderRouter::new().route(ProviderId::Gpt, MockGateway::new());
        let text = router.transform(ProviderId::Gpt, "abc", "").await.unwrap();
        assert_eq!(text, "OpenAI response to: abc");
    }
}
