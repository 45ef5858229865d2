//! Config command handler

use std::str::FromStr;

use crate::application::ports::ConfigStore;
use crate::domain::config::{
    ApiConfig, AppConfig, ClipboardTool, FeedbackKind, GatewayMode, ProvidersConfig,
};
use crate::domain::deck::{Keymap, ProviderId, PARAMETER_MAX, PARAMETER_MIN};
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store
        .update(|config| set_value(config, key, value))
        .await?;
    presenter.success(&format!(
        "{} = {}",
        key,
        display_value(&config, key).unwrap_or_default()
    ));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    match display_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            &display_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()),
        );
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

/// Value of a key as shown to the user, API key masked
fn display_value(config: &AppConfig, key: &str) -> Option<String> {
    let api = config.api.as_ref();
    let providers = config.providers.as_ref();

    match key {
        "provider" => config.provider.clone(),
        "parameter" => config.parameter.map(|v| v.to_string()),
        "parameter_step" => config.parameter_step.map(|v| v.to_string()),
        "dwell_unit_ms" => config.dwell_unit_ms.map(|v| v.to_string()),
        "flash_ms" => config.flash_ms.map(|v| v.to_string()),
        "clipboard_timeout_ms" => config.clipboard_timeout_ms.map(|v| v.to_string()),
        "gateway_timeout_ms" => config.gateway_timeout_ms.map(|v| v.to_string()),
        "launch_timeout_ms" => config.launch_timeout_ms.map(|v| v.to_string()),
        "clipboard_tool" => config.clipboard_tool.clone(),
        "feedback" => config.feedback.clone(),
        "result_path" => config.result_path.clone(),
        "browser_process" => config.browser_process.clone(),
        "keymap" => config.keymap.as_ref().map(|k| k.join(",")),
        "api.endpoint" => api.and_then(|a| a.endpoint.clone()),
        "api.api_key" => api.and_then(|a| a.api_key.as_deref()).map(mask_api_key),
        "api.model" => api.and_then(|a| a.model.clone()),
        "providers.gpt" => providers.and_then(|p| p.gpt.clone()),
        "providers.gemini" => providers.and_then(|p| p.gemini.clone()),
        "providers.llama" => providers.and_then(|p| p.llama.clone()),
        _ => None,
    }
}

/// Validate `value` for `key` and store it in normalized form
fn set_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "provider" => {
            let provider = ProviderId::from_str(value).map_err(|e| invalid(e.to_string()))?;
            config.provider = Some(provider.as_str().to_string());
        }
        "parameter" => {
            let v = parse_number::<f64>(value).map_err(invalid)?;
            if !(PARAMETER_MIN..=PARAMETER_MAX).contains(&v) {
                return Err(invalid(format!(
                    "Value must be between {} and {}",
                    PARAMETER_MIN, PARAMETER_MAX
                )));
            }
            config.parameter = Some(v);
        }
        "parameter_step" => {
            let v = parse_number::<f64>(value).map_err(invalid)?;
            if !(v.is_finite() && v > 0.0) {
                return Err(invalid("Value must be a positive number".to_string()));
            }
            config.parameter_step = Some(v);
        }
        "dwell_unit_ms" => config.dwell_unit_ms = Some(parse_number(value).map_err(invalid)?),
        "flash_ms" => config.flash_ms = Some(parse_number(value).map_err(invalid)?),
        "clipboard_timeout_ms" => {
            config.clipboard_timeout_ms = Some(parse_positive_ms(value).map_err(invalid)?)
        }
        "gateway_timeout_ms" => {
            config.gateway_timeout_ms = Some(parse_positive_ms(value).map_err(invalid)?)
        }
        "launch_timeout_ms" => {
            config.launch_timeout_ms = Some(parse_positive_ms(value).map_err(invalid)?)
        }
        "clipboard_tool" => {
            config.clipboard_tool = Some(ClipboardTool::from_str(value)?.as_str().to_string())
        }
        "feedback" => config.feedback = Some(FeedbackKind::from_str(value)?.as_str().to_string()),
        "result_path" => config.result_path = Some(value.to_string()),
        "browser_process" => {
            if value.trim().is_empty() {
                return Err(invalid("Value must not be empty".to_string()));
            }
            config.browser_process = Some(value.trim().to_string());
        }
        "keymap" => {
            let bindings: Vec<String> = value.split(',').map(|b| b.trim().to_string()).collect();
            Keymap::from_bindings(&bindings).map_err(|e| invalid(e.to_string()))?;
            config.keymap = Some(bindings);
        }
        "api.endpoint" => api_mut(config).endpoint = Some(value.to_string()),
        "api.api_key" => api_mut(config).api_key = Some(value.to_string()),
        "api.model" => api_mut(config).model = Some(value.to_string()),
        "providers.gpt" | "providers.gemini" | "providers.llama" => {
            let mode = GatewayMode::from_str(value)
                .map_err(|_| invalid(format!("Invalid value '{}'. Valid options: mock, live, off", value)))?
                .as_str()
                .to_string();
            let providers = config.providers.get_or_insert_with(ProvidersConfig::default);
            match key {
                "providers.gpt" => providers.gpt = Some(mode),
                "providers.gemini" => providers.gemini = Some(mode),
                _ => providers.llama = Some(mode),
            }
        }
        _ => return Err(invalid("Unknown key".to_string())),
    }

    Ok(())
}

fn api_mut(config: &mut AppConfig) -> &mut ApiConfig {
    config.api.get_or_insert_with(ApiConfig::default)
}

fn parse_number<T: FromStr>(value: &str) -> Result<T, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number '{}'", value))
}

fn parse_positive_ms(value: &str) -> Result<u64, String> {
    match parse_number::<u64>(value)? {
        0 => Err("Value must be greater than 0".to_string()),
        v => Ok(v),
    }
}

/// Mask API key for display (show first 4 and last 4 chars)
fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
