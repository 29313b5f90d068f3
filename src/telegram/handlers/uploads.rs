//! Export file intake while a chat is awaiting its upload.

use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{Document, MessageId};

use super::types::{HandlerDeps, HandlerError, SubmitterInfo};
use crate::core::error::AppError;
use crate::telegram::menu::{self, texts};
use crate::telegram::relay::{self, Submission};
use crate::telegram::session::Platform;

/// A message arrived while the chat is awaiting an export file.
///
/// The inbound message is always deleted (best-effort) so that only the
/// screen message stays visible in the chat.
pub async fn handle_awaiting_file_message(
    bot: &Bot,
    msg: &Message,
    deps: &HandlerDeps,
) -> Result<(), HandlerError> {
    let chat_id = msg.chat.id;
    let session = deps.sessions.get(chat_id);
    let platform = session.platform.unwrap_or(Platform::Android);
    let screen = session.last_message_id;

    let _ = bot.delete_message(chat_id, msg.id).await;

    let Some(document) = msg.document() else {
        // Whatever it was, it was not the export file.
        show_extension_error(bot, chat_id, screen, platform).await;
        return Ok(());
    };

    let file_name = document.file_name.clone().unwrap_or_default();
    if !platform.accepts_file_name(&file_name) {
        show_extension_error(bot, chat_id, screen, platform).await;
        return Ok(());
    }

    if let Err(e) = accept_submission(bot, msg, document, file_name, platform, screen, deps).await {
        log::error!("Failed to process submission from chat {}: {}", chat_id, e);
        if let Some(message_id) = screen {
            menu::edit_screen(
                bot,
                chat_id,
                message_id,
                texts::PROCESSING_ERROR,
                Some(menu::back_keyboard()),
            )
            .await;
        }
    }

    Ok(())
}

/// The chat stays in the same state so the user can retry.
async fn show_extension_error(
    bot: &Bot,
    chat_id: ChatId,
    screen: Option<MessageId>,
    platform: Platform,
) {
    if let Some(message_id) = screen {
        menu::edit_screen(
            bot,
            chat_id,
            message_id,
            texts::wrong_extension(platform),
            Some(menu::back_keyboard()),
        )
        .await;
    }
}

/// Downloads the accepted export and hands it to the admin relay.
async fn accept_submission(
    bot: &Bot,
    msg: &Message,
    document: &Document,
    file_name: String,
    platform: Platform,
    screen: Option<MessageId>,
    deps: &HandlerDeps,
) -> Result<(), AppError> {
    let chat_id = msg.chat.id;

    if let Some(message_id) = screen {
        menu::edit_screen(bot, chat_id, message_id, texts::SUBMISSION_ACCEPTED, None).await;
    }

    let file = bot.get_file(document.file.id.clone()).await?;
    let mut payload = Vec::with_capacity(file.size as usize);
    bot.download_file(&file.path, &mut payload).await?;

    let submitter = SubmitterInfo::from_message(msg);
    let submission = Submission {
        platform,
        file_name,
        payload,
        submitter_id: submitter.id,
        submitter_username: submitter.username,
        submitter_name: submitter.full_name,
    };

    relay::spawn_relay(bot.clone(), deps.admin_chat, submission);

    // The user-facing flow is complete the moment the relay is dispatched.
    deps.sessions.clear(chat_id);

    Ok(())
}
