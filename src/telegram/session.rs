//! Per-chat conversation state for the refund-check flow.
//!
//! Sessions are memory-resident only: state is lost on restart and every
//! chat simply starts over from the main menu.

use dashmap::DashMap;
use teloxide::types::{ChatId, MessageId};

/// Where a chat currently is in the refund-check flow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlowState {
    /// Main menu shown, no active flow.
    #[default]
    Idle,
    /// Platform-selection screen shown.
    ChoosingPlatform,
    /// Waiting for the export file of the chosen platform.
    AwaitingFile,
}

/// The operating system a user exported their account data from.
///
/// Determines which file extension the bot accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Android,
    Apple,
}

impl Platform {
    /// Extension an export file must carry for this platform.
    pub fn required_extension(self) -> &'static str {
        match self {
            Platform::Android => ".zip",
            Platform::Apple => ".txt",
        }
    }

    /// Case-sensitive extension check, matching how the exports are named.
    pub fn accepts_file_name(self, file_name: &str) -> bool {
        file_name.ends_with(self.required_extension())
    }

    /// Human-readable platform name for the admin summary.
    pub fn title(self) -> &'static str {
        match self {
            Platform::Android => "Android",
            Platform::Apple => "Apple",
        }
    }
}

/// Per-chat conversation state.
///
/// `platform` is `Some` exactly while `state == AwaitingFile`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub state: FlowState,
    pub last_message_id: Option<MessageId>,
    pub platform: Option<Platform>,
}

/// Concurrent map of chat id to session, created lazily on first contact.
///
/// Effectively single-writer per chat: Telegram delivers one chat's
/// updates roughly in order, and every transition here is a single
/// map operation.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<ChatId, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the chat's session (default for unknown chats).
    pub fn get(&self, chat_id: ChatId) -> Session {
        self.sessions.get(&chat_id).map(|s| *s).unwrap_or_default()
    }

    /// Message id of the chat's screen, if one was ever rendered.
    pub fn screen_message_id(&self, chat_id: ChatId) -> Option<MessageId> {
        self.sessions.get(&chat_id).and_then(|s| s.last_message_id)
    }

    /// Records the rendered screen message for the chat.
    pub fn set_screen(&self, chat_id: ChatId, message_id: MessageId) {
        self.sessions.entry(chat_id).or_default().last_message_id = Some(message_id);
    }

    /// Moves the chat to the platform-selection screen.
    pub fn enter_platform_choice(&self, chat_id: ChatId) {
        let mut session = self.sessions.entry(chat_id).or_default();
        session.state = FlowState::ChoosingPlatform;
        session.platform = None;
    }

    /// Records the chosen platform and starts waiting for its export file.
    pub fn enter_awaiting_file(&self, chat_id: ChatId, platform: Platform) {
        let mut session = self.sessions.entry(chat_id).or_default();
        session.state = FlowState::AwaitingFile;
        session.platform = Some(platform);
    }

    /// Drops all state for the chat, screen reference included.
    pub fn clear(&self, chat_id: ChatId) {
        self.sessions.remove(&chat_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAT: ChatId = ChatId(42);

    #[test]
    fn test_unknown_chat_gets_default_session() {
        let store = SessionStore::new();
        assert_eq!(store.get(CHAT), Session::default());
        assert_eq!(store.get(CHAT).state, FlowState::Idle);
        assert!(store.get(CHAT).platform.is_none());
    }

    #[test]
    fn test_required_extensions() {
        assert_eq!(Platform::Android.required_extension(), ".zip");
        assert_eq!(Platform::Apple.required_extension(), ".txt");
    }

    #[test]
    fn test_extension_check_is_case_sensitive() {
        assert!(Platform::Android.accepts_file_name("export.zip"));
        assert!(!Platform::Android.accepts_file_name("export.ZIP"));
        assert!(!Platform::Android.accepts_file_name("notes.txt"));
        assert!(Platform::Apple.accepts_file_name("notes.txt"));
        assert!(!Platform::Apple.accepts_file_name("export.zip"));
        assert!(!Platform::Apple.accepts_file_name("notes.TXT"));
    }

    #[test]
    fn test_set_screen_keeps_state() {
        let store = SessionStore::new();
        store.set_screen(CHAT, MessageId(5));
        assert_eq!(store.screen_message_id(CHAT), Some(MessageId(5)));
        assert_eq!(store.get(CHAT).state, FlowState::Idle);

        // Re-recording the same screen is a no-op.
        store.set_screen(CHAT, MessageId(5));
        assert_eq!(store.screen_message_id(CHAT), Some(MessageId(5)));
    }

    #[test]
    fn test_platform_choice_clears_platform() {
        let store = SessionStore::new();
        store.enter_awaiting_file(CHAT, Platform::Apple);
        store.enter_platform_choice(CHAT);

        let session = store.get(CHAT);
        assert_eq!(session.state, FlowState::ChoosingPlatform);
        assert!(session.platform.is_none());
    }

    #[test]
    fn test_awaiting_file_records_platform() {
        let store = SessionStore::new();
        store.set_screen(CHAT, MessageId(5));
        store.enter_awaiting_file(CHAT, Platform::Android);

        let session = store.get(CHAT);
        assert_eq!(session.state, FlowState::AwaitingFile);
        assert_eq!(session.platform, Some(Platform::Android));
        assert_eq!(session.last_message_id, Some(MessageId(5)));
    }

    #[test]
    fn test_clear_forgets_everything() {
        let store = SessionStore::new();
        store.set_screen(CHAT, MessageId(5));
        store.enter_awaiting_file(CHAT, Platform::Android);
        store.clear(CHAT);

        assert_eq!(store.get(CHAT), Session::default());
        assert_eq!(store.screen_message_id(CHAT), None);
    }
}
