//! The screens of the refund-check flow.
//!
//! Every chat interacts with a single evolving message: one photo, a
//! caption, and an inline keyboard. Navigation edits that message in
//! place; only /start sends a new one.

use once_cell::sync::OnceCell;
use teloxide::prelude::*;
use teloxide::types::{
    FileId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, InputMedia, InputMediaPhoto,
    Message, MessageId, ParseMode,
};
use teloxide::{ApiError, RequestError};

use crate::core::config;

/// Callback identifiers carried by the inline keyboards.
pub const CB_INSTRUCTION: &str = "instruction";
pub const CB_CHECK_REFUND: &str = "check_refund";
pub const CB_PLATFORM_ANDROID: &str = "platform_android";
pub const CB_PLATFORM_APPLE: &str = "platform_apple";
pub const CB_BACK_TO_MAIN: &str = "back_to_main";

/// Screen captions (HTML parse mode).
pub mod texts {
    use crate::telegram::session::Platform;

    pub const WELCOME: &str = "<b>Привет!</b> Я - Бот, который поможет тебе не попасться на мошенников.\n\n\
<i>Я помогу отличить:</i>\n\
• Реальный подарок от чистого визуала\n\
• Чистый подарок без рефаунда\n\
• Подарок, за который уже вернули деньги\n\n\
<b>Выбери действие:</b>";

    pub const INSTRUCTION: &str = "<b>Инструкция:</b>\n\n\
<b>1.</b> Скачайте приложение <i>Nicegram</i> с официального сайта, нажав на кнопку в главном меню.\n\n\
<b>2.</b> Откройте Nicegram и войдите в свой аккаунт.\n\n\
<b>3.</b> Зайдите в настройки и выберите пункт «<i>Nicegram</i>».\n\n\
<b>4.</b> Экспортируйте данные аккаунта, нажав на кнопку «<i>Экспортировать в файл</i>».\n\n\
<b>5.</b> Откройте главное меню бота и нажмите на кнопку \"<i>Проверка на рефаунд</i>\".\n\n\
<b>6.</b> Отправьте файл боту.";

    pub const PLATFORM_CHOICE: &str = "<b>Выберите вашу платформу:</b>\n\n\
Выберите операционную систему вашего устройства для проверки файла.";

    pub const SUBMISSION_ACCEPTED: &str = "<b>Успешно!</b>\n\n\
Файл успешно отправлен на проверку!\n\n\
<i>Ожидайте результат...</i>";

    pub const PROCESSING_ERROR: &str = "<b>Ошибка!</b>\n\n\
Произошла ошибка при обработке файла.\n\n\
<i>Попробуйте еще раз.</i>";

    /// Prompt asking for the export file of the chosen platform.
    pub fn send_file_prompt(platform: Platform) -> &'static str {
        match platform {
            Platform::Android => {
                "<b>Проверка на рефаунд (Android)</b>\n\n\
Пожалуйста, отправьте файл для проверки.\n\n\
<i>Принимаются только файлы в формате .zip</i>"
            }
            Platform::Apple => {
                "<b>Проверка на рефаунд (Apple)</b>\n\n\
Пожалуйста, отправьте файл для проверки.\n\n\
<i>Принимаются только файлы в формате .txt</i>"
            }
        }
    }

    /// Error shown when the upload does not match the platform's extension.
    pub fn wrong_extension(platform: Platform) -> &'static str {
        match platform {
            Platform::Android => {
                "<b>Ошибка!</b>\n\nПожалуйста, отправьте файл в формате <i>.zip</i>"
            }
            Platform::Apple => "<b>Ошибка!</b>\n\nПожалуйста, отправьте файл в формате <i>.txt</i>",
        }
    }
}

/// Main menu: instructions, the app download link, and the flow entry.
pub fn main_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("Инструкция", CB_INSTRUCTION)],
        vec![InlineKeyboardButton::url(
            "Скачать Nicegram",
            config::screen::DOWNLOAD_APP_URL.clone(),
        )],
        vec![InlineKeyboardButton::callback("Проверка на рефаунд", CB_CHECK_REFUND)],
    ])
}

/// Platform selection with a way back.
pub fn platform_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("Android", CB_PLATFORM_ANDROID)],
        vec![InlineKeyboardButton::callback("Apple", CB_PLATFORM_APPLE)],
        vec![InlineKeyboardButton::callback("Назад", CB_BACK_TO_MAIN)],
    ])
}

/// Single "back" button.
pub fn back_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "Назад",
        CB_BACK_TO_MAIN,
    )]])
}

/// Single-slot cache for the uploaded welcome photo's Telegram reference.
///
/// The first store wins; a set race costs at most one redundant upload.
pub(crate) struct PhotoCache(OnceCell<FileId>);

impl PhotoCache {
    pub(crate) const fn new() -> Self {
        Self(OnceCell::new())
    }

    pub(crate) fn store(&self, file_id: FileId) {
        let _ = self.0.set(file_id);
    }

    pub(crate) fn get(&self) -> Option<FileId> {
        self.0.get().cloned()
    }
}

/// Uploaded once per process, reused by every later render.
static WELCOME_PHOTO_ID: PhotoCache = PhotoCache::new();

/// The welcome photo: the cached Telegram reference when known, the
/// source URL otherwise.
fn welcome_photo() -> InputFile {
    match WELCOME_PHOTO_ID.get() {
        Some(file_id) => InputFile::file_id(file_id),
        None => InputFile::url(config::screen::WELCOME_PHOTO_URL.clone()),
    }
}

/// Remembers the freshly uploaded photo (largest size) for reuse.
fn remember_welcome_photo(message: &Message) {
    if WELCOME_PHOTO_ID.get().is_some() {
        return;
    }
    if let Some(photo) = message.photo().and_then(|sizes| sizes.last()) {
        WELCOME_PHOTO_ID.store(photo.file.id.clone());
    }
}

/// Sends the welcome screen as a new message and returns it.
pub async fn send_welcome_screen(bot: &Bot, chat_id: ChatId) -> ResponseResult<Message> {
    let message = bot
        .send_photo(chat_id, welcome_photo())
        .caption(texts::WELCOME)
        .parse_mode(ParseMode::Html)
        .reply_markup(main_keyboard())
        .await?;
    remember_welcome_photo(&message);
    Ok(message)
}

/// Replaces the screen's photo, caption and keyboard in place.
///
/// Returns whether the edit applied. Telegram's "message is not modified"
/// counts as applied; any other failure is logged and reported as not
/// applied so callers skip dependent state updates.
pub async fn edit_screen(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    caption: &str,
    keyboard: Option<InlineKeyboardMarkup>,
) -> bool {
    let media = InputMediaPhoto::new(welcome_photo())
        .caption(caption.to_string())
        .parse_mode(ParseMode::Html);

    let mut request = bot.edit_message_media(chat_id, message_id, InputMedia::Photo(media));
    if let Some(keyboard) = keyboard {
        request = request.reply_markup(keyboard);
    }

    match request.await {
        Ok(_) => true,
        Err(ref e) if is_benign_edit_error(e) => true,
        Err(e) => {
            log::error!("Failed to edit screen {} in chat {}: {}", message_id.0, chat_id, e);
            false
        }
    }
}

/// "Message is not modified" means the screen already shows the content.
fn is_benign_edit_error(err: &RequestError) -> bool {
    matches!(err, RequestError::Api(ApiError::MessageNotModified))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telegram::session::Platform;

    fn callback_data(button: &InlineKeyboardButton) -> Option<&str> {
        match &button.kind {
            teloxide::types::InlineKeyboardButtonKind::CallbackData(data) => Some(data.as_str()),
            _ => None,
        }
    }

    #[test]
    fn test_main_keyboard_layout() {
        let keyboard = main_keyboard();
        assert_eq!(keyboard.inline_keyboard.len(), 3);
        assert_eq!(callback_data(&keyboard.inline_keyboard[0][0]), Some(CB_INSTRUCTION));
        // Middle row is the external download link, not a callback.
        assert_eq!(callback_data(&keyboard.inline_keyboard[1][0]), None);
        assert_eq!(callback_data(&keyboard.inline_keyboard[2][0]), Some(CB_CHECK_REFUND));
    }

    #[test]
    fn test_platform_keyboard_layout() {
        let keyboard = platform_keyboard();
        let data: Vec<_> = keyboard
            .inline_keyboard
            .iter()
            .filter_map(|row| callback_data(&row[0]))
            .collect();
        assert_eq!(data, vec![CB_PLATFORM_ANDROID, CB_PLATFORM_APPLE, CB_BACK_TO_MAIN]);
    }

    #[test]
    fn test_back_keyboard_layout() {
        let keyboard = back_keyboard();
        assert_eq!(keyboard.inline_keyboard.len(), 1);
        assert_eq!(callback_data(&keyboard.inline_keyboard[0][0]), Some(CB_BACK_TO_MAIN));
    }

    #[test]
    fn test_prompts_name_required_extension() {
        assert!(texts::send_file_prompt(Platform::Android).contains(".zip"));
        assert!(texts::send_file_prompt(Platform::Apple).contains(".txt"));
        assert!(texts::wrong_extension(Platform::Android).contains(".zip"));
        assert!(texts::wrong_extension(Platform::Apple).contains(".txt"));
    }

    #[test]
    fn test_photo_cache_first_store_wins() {
        let cache = PhotoCache::new();
        assert_eq!(cache.get(), None);

        cache.store(FileId("first".to_string()));
        cache.store(FileId("second".to_string()));
        assert_eq!(cache.get(), Some(FileId("first".to_string())));
    }

    #[test]
    fn test_not_modified_is_benign() {
        assert!(is_benign_edit_error(&RequestError::Api(ApiError::MessageNotModified)));
        assert!(!is_benign_edit_error(&RequestError::Api(ApiError::MessageToEditNotFound)));
    }
}
