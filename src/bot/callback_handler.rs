//! Callback Handler module for processing inline keyboard callback queries

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, warn};
use rusqlite::Connection;
use teloxide::prelude::*;
use tokio::sync::Mutex;

// Import localization
use crate::localization::t;

// Import store and dialogue types
use crate::db;
use crate::dialogue::NoteDialogue;

// Import dialogue manager and sibling handlers
use super::dialogue_manager::{route_callback, CallbackAction};
use super::message_handler::send_main_menu;

/// Handle callback queries from inline keyboards
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    conn: Arc<Mutex<Connection>>,
    dialogue: NoteDialogue,
) -> Result<()> {
    debug!("Received callback query from user {}", q.from.id);

    if let Some(msg) = &q.message {
        let data = q.data.as_deref().unwrap_or("");
        let action = route_callback(data);

        match action {
            CallbackAction::BeginAdd => {
                bot.edit_message_text(msg.chat().id, msg.id(), t("prompt-content"))
                    .await?;
            }
            CallbackAction::BeginSearch => {
                bot.edit_message_text(msg.chat().id, msg.id(), t("prompt-keyword"))
                    .await?;
            }
            CallbackAction::Delete(note_id) => {
                let delete_result = {
                    let conn = conn.lock().await;
                    db::delete_note(&conn, note_id)
                };

                match delete_result {
                    Ok(_deleted) => {
                        // Deleting an already-gone note is still confirmed.
                        bot.edit_message_text(msg.chat().id, msg.id(), t("note-deleted"))
                            .await?;
                        send_main_menu(&bot, msg.chat().id).await?;
                    }
                    Err(e) => {
                        error!("Failed to delete note {note_id}: {e:#}");
                        bot.send_message(msg.chat().id, t("error-storage")).await?;
                    }
                }
            }
            CallbackAction::Ignore => {
                warn!("Unrecognized callback token: {data:?}");
            }
        }

        if let Some(next_state) = action.next_state() {
            dialogue.update(next_state).await?;
        }
    }

    // Answer the callback query to remove the loading state
    bot.answer_callback_query(q.id).await?;

    Ok(())
}
