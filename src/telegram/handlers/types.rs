//! Handler types and dependencies

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::Message;

use crate::telegram::session::SessionStore;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub sessions: Arc<SessionStore>,
    pub admin_chat: ChatId,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(sessions: Arc<SessionStore>, admin_chat: ChatId) -> Self {
        Self { sessions, admin_chat }
    }
}

/// Sender profile metadata attached to a relayed submission.
#[derive(Clone, Debug)]
pub struct SubmitterInfo {
    pub id: u64,
    pub username: Option<String>,
    pub full_name: String,
}

impl SubmitterInfo {
    /// Extracts the sender's profile from a message, falling back to the
    /// chat id when the sender is absent.
    pub fn from_message(msg: &Message) -> Self {
        match &msg.from {
            Some(user) => Self {
                id: user.id.0,
                username: user.username.clone(),
                full_name: user.full_name(),
            },
            None => Self {
                id: msg.chat.id.0.unsigned_abs(),
                username: None,
                full_name: String::new(),
            },
        }
    }
}
