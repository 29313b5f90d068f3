//! Refundo is a Telegram bot guiding users through a refund-check submission.
//!
//! Each chat interacts with a single evolving photo+caption+keyboard
//! screen. The bot tracks a small per-chat state machine (main menu →
//! platform choice → file upload), validates the uploaded export's
//! extension against the chosen platform, and relays accepted files with
//! submitter metadata to the administrator chat.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, and the webhook server
//! - `telegram`: bot setup, the session state machine, screens, update
//!   handlers, and the admin relay

pub mod core;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{config, AppError};
pub use telegram::{create_bot, schema, HandlerDeps, SessionStore};
