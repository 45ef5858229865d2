//! Application configuration value object

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::deck::{Keymap, ProviderId, DEFAULT_BINDINGS, DEFAULT_PARAMETER};
use crate::domain::error::InvalidBindingError;

use super::options::{ClipboardTool, FeedbackKind, GatewayMode};

/// Default chat-completions endpoint for live providers
pub const DEFAULT_API_ENDPOINT: &str = "https://ai.hackclub.com/chat/completions";
/// Default encoder step
pub const DEFAULT_PARAMETER_STEP: f64 = 0.1;
/// One dwell time-unit
pub const DEFAULT_DWELL_UNIT_MS: u64 = 1000;
/// Indicator flash length
pub const DEFAULT_FLASH_MS: u64 = 100;
/// Clipboard read/write bound
pub const DEFAULT_CLIPBOARD_TIMEOUT_MS: u64 = 3000;
/// Provider call bound
pub const DEFAULT_GATEWAY_TIMEOUT_MS: u64 = 30_000;
/// Browser open/close bound
pub const DEFAULT_LAUNCH_TIMEOUT_MS: u64 = 3000;
/// Browser process terminated by the close action
pub const DEFAULT_BROWSER_PROCESS: &str = "firefox";
/// File name of the persisted result, under the temp directory
pub const RESULT_FILE_NAME: &str = "llmdeck_out.txt";

/// Remote API settings for live providers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
}

/// Per-provider gateway mode ("mock", "live" or "off").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    pub gpt: Option<String>,
    pub gemini: Option<String>,
    pub llama: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub provider: Option<String>,
    pub parameter: Option<f64>,
    pub parameter_step: Option<f64>,
    pub dwell_unit_ms: Option<u64>,
    pub flash_ms: Option<u64>,
    pub clipboard_timeout_ms: Option<u64>,
    pub gateway_timeout_ms: Option<u64>,
    pub launch_timeout_ms: Option<u64>,
    pub clipboard_tool: Option<String>,
    pub feedback: Option<String>,
    pub result_path: Option<String>,
    pub browser_process: Option<String>,
    pub keymap: Option<Vec<String>>,
    pub api: Option<ApiConfig>,
    pub providers: Option<ProvidersConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            provider: Some(ProviderId::default().as_str().to_string()),
            parameter: Some(DEFAULT_PARAMETER),
            parameter_step: Some(DEFAULT_PARAMETER_STEP),
            dwell_unit_ms: Some(DEFAULT_DWELL_UNIT_MS),
            flash_ms: Some(DEFAULT_FLASH_MS),
            clipboard_timeout_ms: Some(DEFAULT_CLIPBOARD_TIMEOUT_MS),
            gateway_timeout_ms: Some(DEFAULT_GATEWAY_TIMEOUT_MS),
            launch_timeout_ms: Some(DEFAULT_LAUNCH_TIMEOUT_MS),
            clipboard_tool: Some(ClipboardTool::default().as_str().to_string()),
            feedback: Some(FeedbackKind::default().as_str().to_string()),
            result_path: None,
            browser_process: Some(DEFAULT_BROWSER_PROCESS.to_string()),
            keymap: Some(DEFAULT_BINDINGS.iter().map(|b| b.to_string()).collect()),
            api: Some(ApiConfig {
                endpoint: Some(DEFAULT_API_ENDPOINT.to_string()),
                api_key: None,
                model: None,
            }),
            providers: Some(ProvidersConfig {
                gpt: Some(GatewayMode::Mock.as_str().to_string()),
                gemini: Some(GatewayMode::Mock.as_str().to_string()),
                llama: Some(GatewayMode::Live.as_str().to_string()),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            provider: other.provider.or(self.provider),
            parameter: other.parameter.or(self.parameter),
            parameter_step: other.parameter_step.or(self.parameter_step),
            dwell_unit_ms: other.dwell_unit_ms.or(self.dwell_unit_ms),
            flash_ms: other.flash_ms.or(self.flash_ms),
            clipboard_timeout_ms: other.clipboard_timeout_ms.or(self.clipboard_timeout_ms),
            gateway_timeout_ms: other.gateway_timeout_ms.or(self.gateway_timeout_ms),
            launch_timeout_ms: other.launch_timeout_ms.or(self.launch_timeout_ms),
            clipboard_tool: other.clipboard_tool.or(self.clipboard_tool),
            feedback: other.feedback.or(self.feedback),
            result_path: other.result_path.or(self.result_path),
            browser_process: other.browser_process.or(self.browser_process),
            keymap: other.keymap.or(self.keymap),
            api: Self::merge_api_config(self.api, other.api),
            providers: Self::merge_providers_config(self.providers, other.providers),
        }
    }

    fn merge_api_config(base: Option<ApiConfig>, other: Option<ApiConfig>) -> Option<ApiConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(ApiConfig {
                endpoint: o.endpoint.or(b.endpoint),
                api_key: o.api_key.or(b.api_key),
                model: o.model.or(b.model),
            }),
        }
    }

    fn merge_providers_config(
        base: Option<ProvidersConfig>,
        other: Option<ProvidersConfig>,
    ) -> Option<ProvidersConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(ProvidersConfig {
                gpt: o.gpt.or(b.gpt),
                gemini: o.gemini.or(b.gemini),
                llama: o.llama.or(b.llama),
            }),
        }
    }

    /// Get the power-on provider, or GPT if not set/invalid
    pub fn provider_or_default(&self) -> ProviderId {
        self.provider
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get the power-on parameter, or 0.5 if not set
    pub fn parameter_or_default(&self) -> f64 {
        self.parameter.unwrap_or(DEFAULT_PARAMETER)
    }

    /// Get the encoder step, or 0.1 if not set or not a positive number
    pub fn parameter_step_or_default(&self) -> f64 {
        self.parameter_step
            .filter(|step| step.is_finite() && *step > 0.0)
            .unwrap_or(DEFAULT_PARAMETER_STEP)
    }

    pub fn dwell_unit_or_default(&self) -> Duration {
        Duration::from_millis(self.dwell_unit_ms.unwrap_or(DEFAULT_DWELL_UNIT_MS))
    }

    pub fn flash_or_default(&self) -> Duration {
        Duration::from_millis(self.flash_ms.unwrap_or(DEFAULT_FLASH_MS))
    }

    pub fn clipboard_timeout_or_default(&self) -> Duration {
        Duration::from_millis(
            self.clipboard_timeout_ms
                .unwrap_or(DEFAULT_CLIPBOARD_TIMEOUT_MS),
        )
    }

    pub fn gateway_timeout_or_default(&self) -> Duration {
        Duration::from_millis(self.gateway_timeout_ms.unwrap_or(DEFAULT_GATEWAY_TIMEOUT_MS))
    }

    pub fn launch_timeout_or_default(&self) -> Duration {
        Duration::from_millis(self.launch_timeout_ms.unwrap_or(DEFAULT_LAUNCH_TIMEOUT_MS))
    }

    /// Get the clipboard backend, or arboard if not set/invalid
    pub fn clipboard_tool_or_default(&self) -> ClipboardTool {
        self.clipboard_tool
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get the feedback sink, or terminal if not set/invalid
    pub fn feedback_or_default(&self) -> FeedbackKind {
        self.feedback
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get the result file, or `<tmp>/llmdeck_out.txt` if not set
    pub fn result_path_or_default(&self) -> PathBuf {
        self.result_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(RESULT_FILE_NAME))
    }

    pub fn browser_process_or_default(&self) -> &str {
        self.browser_process
            .as_deref()
            .unwrap_or(DEFAULT_BROWSER_PROCESS)
    }

    /// Build the keymap. An absent keymap means the factory layout;
    /// a present but malformed one is an error.
    pub fn keymap(&self) -> Result<Keymap, InvalidBindingError> {
        match self.keymap.as_ref() {
            Some(bindings) => Keymap::from_bindings(bindings),
            None => Ok(Keymap::default()),
        }
    }

    /// Get the gateway mode for a provider.
    /// Defaults: GPT and GEMINI mock, LLAMA live.
    pub fn gateway_mode(&self, provider: ProviderId) -> GatewayMode {
        let configured = self.providers.as_ref().and_then(|p| match provider {
            ProviderId::Gpt => p.gpt.as_deref(),
            ProviderId::Gemini => p.gemini.as_deref(),
            ProviderId::Llama => p.llama.as_deref(),
        });

        configured
            .and_then(|s| s.parse().ok())
            .unwrap_or(match provider {
                ProviderId::Gpt | ProviderId::Gemini => GatewayMode::Mock,
                ProviderId::Llama => GatewayMode::Live,
            })
    }

    pub fn api_endpoint_or_default(&self) -> &str {
        self.api
            .as_ref()
            .and_then(|a| a.endpoint.as_deref())
            .unwrap_or(DEFAULT_API_ENDPOINT)
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api
            .as_ref()
            .and_then(|a| a.api_key.as_deref())
            .filter(|k| !k.is_empty())
    }

    pub fn api_model(&self) -> Option<&str> {
        self.api.as_ref().and_then(|a| a.model.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.provider, Some("gpt".to_string()));
        assert_eq!(config.parameter, Some(0.5));
        assert_eq!(config.parameter_step, Some(0.1));
        assert_eq!(config.clipboard_timeout_ms, Some(3000));
        assert_eq!(config.browser_process_or_default(), "firefox");
        assert_eq!(config.keymap.as_ref().map(Vec::len), Some(9));
        assert_eq!(config.api_endpoint_or_default(), DEFAULT_API_ENDPOINT);
        assert!(config.api_key().is_none());
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.provider.is_none());
        assert!(config.parameter.is_none());
        assert!(config.keymap.is_none());
        assert!(config.api.is_none());
        assert!(config.providers.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            provider: Some("gpt".to_string()),
            parameter_step: Some(0.1),
            feedback: Some("terminal".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            provider: Some("llama".to_string()),
            parameter_step: None,
            feedback: Some("notify".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.provider, Some("llama".to_string()));
        assert_eq!(merged.parameter_step, Some(0.1));
        assert_eq!(merged.feedback_or_default(), FeedbackKind::Notify);
    }

    #[test]
    fn merge_nested_sections() {
        let base = AppConfig::defaults();
        let other = AppConfig {
            api: Some(ApiConfig {
                api_key: Some("secret".to_string()),
                ..Default::default()
            }),
            providers: Some(ProvidersConfig {
                gpt: Some("live".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = base.merge(other);
        assert_eq!(merged.api_key(), Some("secret"));
        assert_eq!(merged.api_endpoint_or_default(), DEFAULT_API_ENDPOINT);
        assert_eq!(merged.gateway_mode(ProviderId::Gpt), GatewayMode::Live);
        assert_eq!(merged.gateway_mode(ProviderId::Llama), GatewayMode::Live);
    }

    #[test]
    fn provider_or_default_handles_invalid() {
        let config = AppConfig {
            provider: Some("claude".to_string()),
            ..Default::default()
        };
        assert_eq!(config.provider_or_default(), ProviderId::Gpt);

        let config = AppConfig {
            provider: Some("GEMINI".to_string()),
            ..Default::default()
        };
        assert_eq!(config.provider_or_default(), ProviderId::Gemini);
    }

    #[test]
    fn parameter_step_rejects_non_positive() {
        let config = AppConfig {
            parameter_step: Some(-0.2),
            ..Default::default()
        };
        assert_eq!(config.parameter_step_or_default(), 0.1);

        let config = AppConfig {
            parameter_step: Some(0.05),
            ..Default::default()
        };
        assert_eq!(config.parameter_step_or_default(), 0.05);
    }

    #[test]
    fn durations_default() {
        let config = AppConfig::empty();
        assert_eq!(config.dwell_unit_or_default(), Duration::from_secs(1));
        assert_eq!(config.flash_or_default(), Duration::from_millis(100));
        assert_eq!(config.clipboard_timeout_or_default(), Duration::from_secs(3));
        assert_eq!(config.gateway_timeout_or_default(), Duration::from_secs(30));
        assert_eq!(config.launch_timeout_or_default(), Duration::from_secs(3));
    }

    #[test]
    fn result_path_defaults_to_temp_dir() {
        let config = AppConfig::empty();
        let path = config.result_path_or_default();
        assert!(path.ends_with(RESULT_FILE_NAME));

        let config = AppConfig {
            result_path: Some("/var/tmp/out.txt".to_string()),
            ..Default::default()
        };
        assert_eq!(config.result_path_or_default(), PathBuf::from("/var/tmp/out.txt"));
    }

    #[test]
    fn gateway_mode_defaults() {
        let config = AppConfig::empty();
        assert_eq!(config.gateway_mode(ProviderId::Gpt), GatewayMode::Mock);
        assert_eq!(config.gateway_mode(ProviderId::Gemini), GatewayMode::Mock);
        assert_eq!(config.gateway_mode(ProviderId::Llama), GatewayMode::Live);
    }

    #[test]
    fn keymap_absent_uses_default_layout() {
        let config = AppConfig::empty();
        assert_eq!(config.keymap().unwrap(), Keymap::default());
    }

    #[test]
    fn keymap_malformed_is_error() {
        let config = AppConfig {
            keymap: Some(vec!["teleport".to_string()]),
            ..Default::default()
        };
        assert!(config.keymap().is_err());
    }

    #[test]
    fn empty_api_key_is_ignored() {
        let config = AppConfig {
            api: Some(ApiConfig {
                api_key: Some(String::new()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(config.api_key().is_none());
    }
}
