//! Relay of accepted submissions to the administrator chat.

use teloxide::prelude::*;
use teloxide::types::InputFile;

use crate::telegram::session::Platform;

/// Everything the administrator needs to review one submission.
///
/// Built after a valid export file is downloaded, relayed once, then
/// dropped; nothing is persisted.
#[derive(Debug, Clone)]
pub struct Submission {
    pub platform: Platform,
    pub file_name: String,
    pub payload: Vec<u8>,
    pub submitter_id: u64,
    pub submitter_username: Option<String>,
    pub submitter_name: String,
}

impl Submission {
    /// Plain-text summary sent to the administrator ahead of the file.
    pub fn summary(&self) -> String {
        format!(
            "Файл от пользователя:\nПлатформа: {}\nID: {}\nUsername: @{}\nИмя: {}\nФайл: {}",
            self.platform.title(),
            self.submitter_id,
            self.submitter_username.as_deref().unwrap_or("Не указан"),
            self.submitter_name,
            self.file_name,
        )
    }
}

/// Dispatches the relay as a detached task.
///
/// The submitting user's flow never waits on this; a failed relay is
/// visible in the logs only.
pub fn spawn_relay(bot: Bot, admin_chat: ChatId, submission: Submission) {
    tokio::spawn(async move {
        match relay_to_admin(&bot, admin_chat, &submission).await {
            Ok(()) => {
                log::info!("Submission {} relayed to admin {}", submission.file_name, admin_chat);
            }
            Err(e) => {
                log::error!(
                    "Failed to relay submission {} to admin {}: {}",
                    submission.file_name,
                    admin_chat,
                    e
                );
            }
        }
    });
}

async fn relay_to_admin(
    bot: &Bot,
    admin_chat: ChatId,
    submission: &Submission,
) -> ResponseResult<()> {
    bot.send_message(admin_chat, submission.summary()).await?;

    let document =
        InputFile::memory(submission.payload.clone()).file_name(submission.file_name.clone());
    bot.send_document(admin_chat, document).await?;

    Ok(())
}
