//! Message processing
//!
//! Runs a message through the TEA update function, dispatches the
//! resulting actions and follows up messages until none remain.

use phishguard_client::Backend;
use tokio::sync::mpsc;

use crate::actions::{handle_action, ActionContext};
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message<B: Backend>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    ctx: &ActionContext<B>,
) {
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), ctx);
        }

        // Continue with follow-up message
        msg = result.message;
    }
}
