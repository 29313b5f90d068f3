use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use teloxide::prelude::*;

use refundo::core::web_server;
use refundo::core::{config, init_logger, AppError};
use refundo::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps, SessionStore};

/// Main entry point for the Telegram bot
///
/// # Errors
/// Returns an error if initialization fails (configuration, bot creation,
/// webhook registration).
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();

    init_logger();

    let webhook_host = match config::WEBHOOK_HOST.clone() {
        Some(host) => host,
        None => {
            log::error!("WEBHOOK_HOST environment variable is not set");
            log::error!(
                "Set it to the public URL Telegram can reach, e.g. https://your-app.onrender.com"
            );
            return Err(AppError::Config("WEBHOOK_HOST is not set".to_string()).into());
        }
    };

    let bot = create_bot()?;

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to register bot commands: {}", e);
    }

    let deps = HandlerDeps::new(
        Arc::new(SessionStore::new()),
        ChatId(*config::admin::ADMIN_CHAT_ID),
    );

    let listener = web_server::webhook_listener(bot.clone(), &webhook_host).await?;
    log::info!(
        "Webhook registered at {}/webhook/<bot token>",
        webhook_host.trim_end_matches('/')
    );

    Dispatcher::builder(bot.clone(), schema(deps))
        .default_handler(|upd| async move {
            log::debug!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    // Leave no stale webhook behind once the dispatcher stops.
    if let Err(e) = bot.delete_webhook().await {
        log::warn!("Failed to delete webhook on shutdown: {}", e);
    }
    log::info!("Bot stopped");

    Ok(())
}
