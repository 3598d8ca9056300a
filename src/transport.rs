//! Transport module for the webhook variant.
//!
//! Long polling is the default and needs no setup beyond the dispatcher;
//! this module builds the alternative: an axum-served webhook endpoint at
//! `POST /<token>` plus a plain-text health check at `GET /`.

use std::convert::Infallible;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::routing::get;
use log::{error, info};
use teloxide::prelude::*;
use teloxide::update_listeners::{webhooks, UpdateListener};

use crate::config::WebhookConfig;

/// Register the webhook with Telegram and start the local HTTP server.
/// Returns the update listener to drive the dispatcher with. The bot
/// token doubles as the secret path segment, as Telegram recommends.
pub async fn webhook_listener(
    bot: Bot,
    webhook: &WebhookConfig,
    secret_path: &str,
) -> Result<impl UpdateListener<Err = Infallible>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], webhook.port));
    let url = format!("{}/{}", webhook.public_url, secret_path)
        .parse()
        .context("WEBHOOK_URL is not a valid base URL")?;

    let (listener, stop_flag, router) =
        webhooks::axum_to_router(bot, webhooks::Options::new(addr, url))
            .await
            .context("Failed to register the Telegram webhook")?;

    let router = router.route("/", get(health));

    let tcp_listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind webhook server on {addr}"))?;

    info!("Webhook server listening on {addr}");

    tokio::spawn(async move {
        if let Err(e) = axum::serve(tcp_listener, router)
            .with_graceful_shutdown(stop_flag)
            .await
        {
            error!("Webhook server stopped: {e}");
        }
    });

    Ok(listener)
}

async fn health() -> &'static str {
    "alive"
}
