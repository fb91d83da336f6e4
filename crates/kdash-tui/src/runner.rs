//! Dashboard runner - terminal lifecycle and event loop

use std::sync::Arc;

use tokio::sync::mpsc;

use kdash_app::{
    process::{process_message, ActionContext},
    signals, AppState, FetchOptions, Message,
};
use kdash_broker::BrokerClient;
use kdash_core::prelude::*;

use crate::{event, render, terminal};

/// Run the interactive dashboard until the user quits.
///
/// `state` should already hold the startup topic listing; the terminal is
/// restored on every exit path.
pub async fn run_dashboard<C>(
    client: Arc<C>,
    mut state: AppState,
    options: FetchOptions,
) -> Result<()>
where
    C: BrokerClient + Sync + 'static,
{
    terminal::install_panic_hook();

    let mut term = ratatui::try_init().map_err(|e| Error::TerminalInit(e.to_string()))?;
    info!("Dashboard started with {} topics", state.topics.topics().len());

    let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
    signals::spawn_signal_handler(msg_tx.clone());
    let ctx = ActionContext::new(msg_tx, client, options);

    let result = run_loop(&mut term, &mut state, msg_rx, &ctx);

    ratatui::restore();
    info!("Dashboard exited");
    result
}

/// Main event loop
fn run_loop<C>(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    mut msg_rx: mpsc::Receiver<Message>,
    ctx: &ActionContext<C>,
) -> Result<()>
where
    C: BrokerClient + Sync + 'static,
{
    while !state.should_quit() {
        // Results from background fetches and the signal handler
        while let Ok(msg) = msg_rx.try_recv() {
            process_message(state, msg, ctx);
        }

        if state.should_quit() {
            break;
        }

        terminal.draw(|frame| render::view(frame, state))?;

        if let Some(message) = event::poll()? {
            process_message(state, message, ctx);
        }
    }

    Ok(())
}
