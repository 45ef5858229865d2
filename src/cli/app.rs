//! Config loading and deck assembly

use std::env;

use crate::application::ports::{Clipboard, ConfigStore, FeedbackSink};
use crate::application::{ActionDispatcher, DispatchSettings};
use crate::domain::config::{ApiConfig, AppConfig};
use crate::domain::deck::DeviceState;
use crate::domain::error::InvalidBindingError;
use crate::infrastructure::{
    create_clipboard, create_feedback, ClipboardTextPort, ProviderRouter, SystemLauncher,
    XdgConfigStore,
};

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable holding the chat-completions API key
pub const API_KEY_ENV: &str = "LLMDECK_API_KEY";

/// The deck as assembled from host adapters
pub type HostDeck = ActionDispatcher<
    Box<dyn FeedbackSink>,
    ClipboardTextPort<Box<dyn Clipboard>>,
    ProviderRouter,
    SystemLauncher,
>;

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable config file");
            AppConfig::empty()
        }
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}

fn env_config() -> AppConfig {
    AppConfig {
        api: env::var(API_KEY_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .map(|key| ApiConfig {
                api_key: Some(key),
                ..Default::default()
            }),
        ..Default::default()
    }
}

/// Dispatcher timing from config
pub fn dispatch_settings(config: &AppConfig) -> DispatchSettings {
    DispatchSettings {
        parameter_step: config.parameter_step_or_default(),
        dwell_unit: config.dwell_unit_or_default(),
        flash: config.flash_or_default(),
        gateway_timeout: config.gateway_timeout_or_default(),
        browser_process: config.browser_process_or_default().to_string(),
    }
}

/// Build the dispatcher with host adapters
pub fn build_deck(config: &AppConfig) -> Result<HostDeck, InvalidBindingError> {
    let keymap = config.keymap()?;
    tracing::debug!(bindings = ?keymap.bindings(), "keymap loaded");

    let text_io = ClipboardTextPort::new(
        create_clipboard(config.clipboard_tool_or_default()),
        config.clipboard_timeout_or_default(),
        config.result_path_or_default(),
    );

    Ok(ActionDispatcher::new(
        create_feedback(config.feedback_or_default()),
        text_io,
        ProviderRouter::from_config(config),
        SystemLauncher::new(config.launch_timeout_or_default()),
        keymap,
        DeviceState::with_initial(config.provider_or_default(), config.parameter_or_default()),
        dispatch_settings(config),
    ))
}
