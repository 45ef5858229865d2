//! Deck command handler - sends commands to the running deck via IPC

use super::args::DeckAction;
use super::ipc::create_ipc_client;
use super::presenter::Presenter;

/// Handle press/rotate/status subcommands
pub async fn handle_deck_command(action: DeckAction, presenter: &Presenter) -> Result<(), String> {
    let client = create_ipc_client();

    // Check if the deck is running
    if !client.is_deck_running() {
        return Err("No deck running. Start with: llmdeck".to_string());
    }

    let cmd = action.command();
    let response = client
        .send_command(&cmd)
        .await
        .map_err(|e| format!("Failed to communicate with deck: {}", e))?;

    let response = response.trim();
    if let Some(stripped) = response.strip_prefix("error:") {
        return Err(stripped.trim().to_string());
    }

    match (action, response.strip_prefix("ok:")) {
        (DeckAction::Status, _) => presenter.output(response),
        (_, Some(note)) => presenter.warn(&format!("{}: {}", cmd, note.trim())),
        _ => presenter.info(&format!("Command sent: {}", cmd)),
    }

    Ok(())
}
