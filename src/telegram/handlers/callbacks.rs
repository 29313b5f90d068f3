//! Inline keyboard callback routing.
//!
//! Buttons are routed by identity alone, not gated by the current state:
//! each screen only ever offers the buttons valid for itself, so a press
//! of a stale platform button simply restarts that part of the flow.

use teloxide::prelude::*;

use super::types::{HandlerDeps, HandlerError};
use crate::telegram::menu::{self, texts};
use crate::telegram::session::Platform;

/// Handles a button press from any screen's inline keyboard.
pub async fn handle_callback(
    bot: &Bot,
    q: CallbackQuery,
    deps: &HandlerDeps,
) -> Result<(), HandlerError> {
    let chat_id = q.message.as_ref().map(|m| m.chat().id);

    if let (Some(data), Some(chat_id)) = (q.data.as_deref(), chat_id) {
        match data {
            menu::CB_INSTRUCTION => show_instruction(bot, chat_id, deps).await,
            menu::CB_CHECK_REFUND => show_platform_choice(bot, chat_id, deps).await,
            menu::CB_PLATFORM_ANDROID => select_platform(bot, chat_id, deps, Platform::Android).await,
            menu::CB_PLATFORM_APPLE => select_platform(bot, chat_id, deps, Platform::Apple).await,
            menu::CB_BACK_TO_MAIN => back_to_main(bot, chat_id, deps).await,
            other => log::warn!("Unknown callback {:?} from chat {}", other, chat_id),
        }
    }

    // The interaction is acknowledged even when nothing could be done.
    let _ = bot.answer_callback_query(q.id).await;
    Ok(())
}

async fn show_instruction(bot: &Bot, chat_id: ChatId, deps: &HandlerDeps) {
    if let Some(message_id) = deps.sessions.screen_message_id(chat_id) {
        menu::edit_screen(bot, chat_id, message_id, texts::INSTRUCTION, Some(menu::back_keyboard()))
            .await;
    }
}

async fn show_platform_choice(bot: &Bot, chat_id: ChatId, deps: &HandlerDeps) {
    if let Some(message_id) = deps.sessions.screen_message_id(chat_id) {
        menu::edit_screen(
            bot,
            chat_id,
            message_id,
            texts::PLATFORM_CHOICE,
            Some(menu::platform_keyboard()),
        )
        .await;
    }
    deps.sessions.enter_platform_choice(chat_id);
}

async fn select_platform(bot: &Bot, chat_id: ChatId, deps: &HandlerDeps, platform: Platform) {
    if let Some(message_id) = deps.sessions.screen_message_id(chat_id) {
        menu::edit_screen(
            bot,
            chat_id,
            message_id,
            texts::send_file_prompt(platform),
            Some(menu::back_keyboard()),
        )
        .await;
    }
    deps.sessions.enter_awaiting_file(chat_id, platform);
}

/// Abandons the flow and reverts the screen to the main menu.
///
/// The screen reference survives only when the edit actually applied;
/// otherwise the chat starts from scratch on its next /start.
async fn back_to_main(bot: &Bot, chat_id: ChatId, deps: &HandlerDeps) {
    let screen = deps.sessions.screen_message_id(chat_id);
    deps.sessions.clear(chat_id);

    if let Some(message_id) = screen {
        if menu::edit_screen(bot, chat_id, message_id, texts::WELCOME, Some(menu::main_keyboard()))
            .await
        {
            deps.sessions.set_screen(chat_id, message_id);
        }
    }
}
