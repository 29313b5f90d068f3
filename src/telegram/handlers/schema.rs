//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::callbacks::handle_callback;
use super::commands::handle_start_command;
use super::types::{HandlerDeps, HandlerError};
use super::uploads::handle_awaiting_file_message;
use crate::telegram::bot::Command;
use crate::telegram::session::FlowState;

/// Creates the main dispatcher schema for the bot.
///
/// This function returns a handler tree that can be used with teloxide's
/// Dispatcher. The same schema serves production and tests.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_uploads = deps.clone();
    let deps_callbacks = deps;

    dptree::entry()
        // Commands win over the awaiting-file branch: /start always resets.
        .branch(command_handler(deps_commands))
        .branch(awaiting_file_handler(deps_uploads))
        .branch(callback_handler(deps_callbacks))
}

fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                match cmd {
                    Command::Start => handle_start_command(&bot, &msg, &deps).await,
                }
            }
        },
    )
}

/// Messages arriving while the chat is waiting for an export file.
fn awaiting_file_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let sessions = deps.sessions.clone();
    Update::filter_message()
        .filter(move |msg: Message| sessions.get(msg.chat.id).state == FlowState::AwaitingFile)
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move { handle_awaiting_file_message(&bot, &msg, &deps).await }
        })
}

fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move { handle_callback(&bot, q, &deps).await }
    })
}
