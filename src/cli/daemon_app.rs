//! Deck daemon runner

use std::process::ExitCode;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::application::{deck_channel, run_event_loop, DeckHandle};
use crate::domain::config::AppConfig;
use crate::domain::deck::InputEvent;

use super::app::{build_deck, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
use super::ipc::create_ipc_server;
use super::pid_file::PidFile;
use super::presenter::Presenter;
use super::signals::install_shutdown_handlers;

/// Run the deck until SIGINT/SIGTERM
pub async fn run_daemon(config: AppConfig, read_stdin: bool) -> ExitCode {
    let presenter = Presenter::new();

    let pid_file = PidFile::new();
    if let Err(e) = pid_file.acquire() {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    let deck = match build_deck(&config) {
        Ok(deck) => deck,
        Err(e) => {
            presenter.error(&format!("Invalid keymap: {}", e));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    if let Err(e) = deck.start().await {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    let (handle, mut commands) = deck_channel();

    if let Err(e) = install_shutdown_handlers(&handle) {
        presenter.error(&format!("Failed to setup signal handler: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    // Setup IPC server
    let mut ipc_server = create_ipc_server();
    if let Err(e) = ipc_server.bind() {
        presenter.error(&format!("Failed to bind IPC endpoint: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }
    let ipc_path = ipc_server.path();

    let server_handle = handle.clone();
    let snapshots = deck.subscribe();
    let server = tokio::spawn(async move {
        if let Err(e) = ipc_server.run(server_handle, snapshots).await {
            warn!(error = %e, "IPC server stopped");
        }
    });

    let stdin_reader = read_stdin.then(|| tokio::spawn(read_stdin_events(handle.clone())));

    presenter.deck_status("Started, waiting for input...");
    presenter.info(&format!(
        "PID: {} | IPC: {} | SIGINT: exit",
        std::process::id(),
        ipc_path
    ));

    run_event_loop(&deck, &mut commands).await;

    // Dropping the server removes the socket file
    server.abort();
    let _ = server.await;
    if let Some(reader) = stdin_reader {
        reader.abort();
    }
    if let Err(e) = pid_file.release() {
        warn!(error = %e, "PID file left behind");
    }

    presenter.deck_status("Stopped");
    ExitCode::from(EXIT_SUCCESS)
}

/// Feed stdin key presses into the deck until EOF
async fn read_stdin_events(deck: DeckHandle) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                for event in parse_stdin_line(&line) {
                    if deck.send(event).await.is_err() {
                        return;
                    }
                }
            }
            Ok(None) => {
                debug!("stdin closed");
                return;
            }
            Err(e) => {
                warn!(error = %e, "stdin read failed");
                return;
            }
        }
    }
}

/// Map stdin characters to input events.
///
/// `1`-`9` press the keys in slots 0-8, `+` and `-` turn the encoder one
/// detent; anything else is ignored.
pub fn parse_stdin_line(line: &str) -> Vec<InputEvent> {
    line.chars()
        .filter_map(|c| match c {
            '1'..='9' => c
                .to_digit(10)
                .map(|digit| InputEvent::KeyPressed(digit as usize - 1)),
            '+' => Some(InputEvent::EncoderRotated(1)),
            '-' => Some(InputEvent::EncoderRotated(-1)),
            c if c.is_whitespace() => None,
            other => {
                info!(key = %other, "ignoring unmapped input");
                None
            }
        })
        .collect()
}
