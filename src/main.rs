use std::sync::Arc;

use anyhow::Result;
use log::info;
use rusqlite::Connection;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use tokio::sync::Mutex;

use notekeeper::bot;
use notekeeper::config::Config;
use notekeeper::db;
use notekeeper::dialogue::NoteDialogueState;
use notekeeper::transport;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    info!("Starting Notekeeper Telegram Bot");

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = Config::from_env()?;

    info!("Initializing database at: {}", config.database_path);

    let conn = Connection::open(&config.database_path)?;
    db::init_database_schema(&conn)?;

    // One shared connection; the mutex serializes store access across
    // concurrently handled updates.
    let shared_conn = Arc::new(Mutex::new(conn));

    let bot = Bot::new(config.bot_token.clone());

    info!("Bot initialized, starting dispatcher");

    let handler = dptree::entry()
        .enter_dialogue::<Update, InMemStorage<NoteDialogueState>, NoteDialogueState>()
        .branch(Update::filter_message().endpoint(bot::message_handler))
        .branch(Update::filter_callback_query().endpoint(bot::callback_handler));

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![
            shared_conn,
            InMemStorage::<NoteDialogueState>::new()
        ])
        .enable_ctrlc_handler()
        .build();

    match &config.webhook {
        Some(webhook) => {
            info!("Using webhook transport behind {}", webhook.public_url);
            let listener = transport::webhook_listener(bot, webhook, &config.bot_token).await?;
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await;
        }
        None => {
            info!("Using long polling transport");
            dispatcher.dispatch().await;
        }
    }

    Ok(())
}
