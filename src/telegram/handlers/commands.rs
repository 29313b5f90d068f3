//! Command handlers

use teloxide::prelude::*;

use super::types::{HandlerDeps, HandlerError};
use crate::telegram::menu;

/// /start: resets the chat and shows the welcome screen as a fresh message.
///
/// Any earlier screen message is simply abandoned; the new one becomes the
/// chat's screen.
pub async fn handle_start_command(
    bot: &Bot,
    msg: &Message,
    deps: &HandlerDeps,
) -> Result<(), HandlerError> {
    let chat_id = msg.chat.id;
    deps.sessions.clear(chat_id);

    match menu::send_welcome_screen(bot, chat_id).await {
        Ok(message) => deps.sessions.set_screen(chat_id, message.id),
        Err(e) => log::error!("Failed to send welcome screen to chat {}: {}", chat_id, e),
    }

    Ok(())
}
