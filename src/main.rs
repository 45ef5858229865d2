//! LLMDeck CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use llmdeck::cli::{
    app::{load_merged_config, EXIT_ERROR},
    args::{Cli, Commands, DeckAction},
    config_cmd::handle_config_command,
    daemon_app::run_daemon,
    daemon_cmd::handle_deck_command,
    presenter::Presenter,
};
use llmdeck::domain::config::{AppConfig, FeedbackKind};
use llmdeck::domain::deck::ProviderId;
use llmdeck::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Handle subcommands
    let action = match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Press { slot }) => Some(DeckAction::Press(slot)),
        Some(Commands::Rotate { delta }) => Some(DeckAction::Rotate(delta)),
        Some(Commands::Status) => Some(DeckAction::Status),
        None => None,
    };

    if let Some(action) = action {
        if let Err(e) = handle_deck_command(action, &presenter).await {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        provider: cli
            .provider
            .map(|p| ProviderId::from(p).as_str().to_string()),
        parameter_step: cli.step,
        feedback: cli
            .feedback
            .map(|f| FeedbackKind::from(f).as_str().to_string()),
        ..Default::default()
    };

    let config = load_merged_config(cli_config).await;
    run_daemon(config, cli.stdin).await
}
