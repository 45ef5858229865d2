//! Chat-completions HTTP gateway adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ports::{GatewayError, ProviderGateway};
use crate::domain::config::DEFAULT_API_ENDPOINT;
use crate::domain::deck::ProviderId;

// Request types

#[derive(Debug, Serialize)]
struct ChatRequest {
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

// Response types

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Option<Vec<Choice>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Gateway posting to an OpenAI-style `chat/completions` endpoint
pub struct ChatCompletionsGateway {
    endpoint: String,
    api_key: Option<String>,
    model: Option<String>,
    client: reqwest::Client,
}

impl ChatCompletionsGateway {
    /// Create a gateway for the given endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            model: None,
            client: reqwest::Client::new(),
        }
    }

    /// Send the key as a bearer token
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Request a specific model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the request body
    fn build_request(&self, instruction: &str, content: &str) -> ChatRequest {
        ChatRequest {
            messages: vec![Message {
                role: "user".to_string(),
                content: format!("{}\n\n{}", instruction, content),
            }],
            model: self.model.clone(),
        }
    }

    /// Extract `choices[0].message.content`
    fn extract_text(response: &ChatResponse) -> Option<&str> {
        response
            .choices
            .as_ref()?
            .first()?
            .message
            .as_ref()?
            .content
            .as_deref()
    }
}

impl Default for ChatCompletionsGateway {
    fn default() -> Self {
        Self::new(DEFAULT_API_ENDPOINT)
    }
}

#[async_trait]
impl ProviderGateway for ChatCompletionsGateway {
    async fn transform(
        &self,
        provider: ProviderId,
        instruction: &str,
        content: &str,
    ) -> Result<String, GatewayError> {
        let body = self.build_request(instruction, content);
        debug!(%provider, endpoint = %self.endpoint, "posting chat completion");

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        let status = response.status();

        // Handle HTTP errors
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(GatewayError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GatewayError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GatewayError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::ParseError(e.to_string()))?;

        // Check for API error in response body
        if let Some(error) = response.error {
            return Err(GatewayError::ApiError(error.message));
        }

        let text = Self::extract_text(&response)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or(GatewayError::EmptyResponse)?;

        Ok(text.to_string())
    }
}
