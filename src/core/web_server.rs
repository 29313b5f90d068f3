//! Webhook transport and the public HTTP surface.
//!
//! Telegram delivers updates with `POST /webhook/<bot token>`; `GET /`
//! answers the hosting platform's liveness probe.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use std::future::Future;

use teloxide::prelude::*;
use teloxide::update_listeners::webhooks;
use teloxide::update_listeners::UpdateListener;
use tokio::net::TcpListener;
use url::Url;

use crate::core::config;
use crate::core::error::AppError;

/// Registers the webhook with Telegram and starts the HTTP server.
///
/// Returns the update listener the dispatcher is driven with. The server
/// runs on a background task and shuts down together with the listener.
pub async fn webhook_listener(
    bot: Bot,
    host: &str,
) -> Result<impl UpdateListener<Err = Infallible>, AppError> {
    let address = SocketAddr::from(([0, 0, 0, 0], *config::PORT));
    let url = Url::parse(&format!("{}/webhook/{}", host.trim_end_matches('/'), bot.token()))?;

    let (listener, stop_flag, webhook_router) =
        webhooks::axum_to_router(bot, webhooks::Options::new(address, url)).await?;

    let tcp = TcpListener::bind(address).await?;
    log::info!("Webhook server listening on http://{}", address);

    let app = Router::new().route("/", get(index_handler)).merge(webhook_router);
    tokio::spawn(serve(tcp, app, stop_flag));

    Ok(listener)
}

async fn serve(tcp: TcpListener, app: Router, stop_flag: impl Future<Output = ()> + Send + 'static) {
    if let Err(e) = axum::serve(tcp, app).with_graceful_shutdown(stop_flag).await {
        log::error!("Webhook server error: {}", e);
    }
}

/// GET /, the liveness probe.
async fn index_handler() -> impl IntoResponse {
    (StatusCode::OK, "Bot is running!")
}
