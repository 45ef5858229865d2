//! Signal handling for the deck daemon

use colored::Colorize;
use tokio::signal::unix::{signal, SignalKind};

use crate::application::DeckHandle;

/// Shutdown signals the daemon reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl ShutdownSignal {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        }
    }

    fn kind(&self) -> SignalKind {
        match self {
            Self::Interrupt => SignalKind::interrupt(),
            Self::Terminate => SignalKind::terminate(),
        }
    }
}

/// Forward SIGINT and SIGTERM to the deck as a shutdown command.
///
/// Handlers are registered before this returns, so a signal arriving
/// right after startup is not lost.
pub fn install_shutdown_handlers(deck: &DeckHandle) -> Result<(), std::io::Error> {
    for which in [ShutdownSignal::Interrupt, ShutdownSignal::Terminate] {
        let mut stream = signal(which.kind())?;
        let deck = deck.clone();
        tokio::spawn(async move {
            stream.recv().await;
            eprintln!("{} Received {} (shutdown)", "↓".cyan(), which.name());
            let _ = deck.shutdown().await;
        });
    }
    Ok(())
}
