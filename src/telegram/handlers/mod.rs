//! Update handlers: commands, callbacks, and file intake

pub mod callbacks;
pub mod commands;
pub mod schema;
pub mod types;
pub mod uploads;

pub use schema::schema;
pub use types::{HandlerDeps, HandlerError, SubmitterInfo};
