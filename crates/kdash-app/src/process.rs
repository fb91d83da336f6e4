//! Message processing
//!
//! Runs a message through the TEA update loop and dispatches any resulting
//! actions as background tasks.

use std::sync::Arc;

use tokio::sync::mpsc;

use kdash_broker::BrokerClient;

use crate::actions::handle_action;
use crate::aggregator::FetchOptions;
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Everything a background action needs
pub struct ActionContext<C> {
    pub msg_tx: mpsc::Sender<Message>,
    pub client: Arc<C>,
    pub options: FetchOptions,
}

impl<C> ActionContext<C> {
    pub fn new(msg_tx: mpsc::Sender<Message>, client: Arc<C>, options: FetchOptions) -> Self {
        Self {
            msg_tx,
            client,
            options,
        }
    }
}

/// Process a message through the TEA update function
pub fn process_message<C>(state: &mut AppState, message: Message, ctx: &ActionContext<C>)
where
    C: BrokerClient + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(
                action,
                ctx.msg_tx.clone(),
                Arc::clone(&ctx.client),
                ctx.options,
            );
        }

        msg = result.message;
    }
}
