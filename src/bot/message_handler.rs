//! Message Handler module for processing incoming Telegram messages
//!
//! Routing is driven by the chat's dialogue state: an idle chat gets the
//! menu (or a command reply), a chat that picked "add" has its next
//! message stored as a note, and a chat that picked "search" has its next
//! text message used as the search keyword. The state transitions
//! themselves live in the dialogue manager; this module does the
//! Telegram and storage I/O the chosen step calls for.

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error};
use rusqlite::Connection;
use teloxide::prelude::*;
use tokio::sync::Mutex;

// Import localization
use crate::localization::t;

// Import store and dialogue types
use crate::db::{self, NoteKind};
use crate::dialogue::{NoteDialogue, NoteDialogueState};

// Import dialogue manager and UI builder functions
use super::dialogue_manager::{next_step, FlowStep, MessagePayload};
use super::ui_builder::{delete_results_keyboard, main_menu_keyboard};

/// Send the two-option main menu to a chat
pub async fn send_main_menu(bot: &Bot, chat_id: ChatId) -> Result<()> {
    bot.send_message(chat_id, t("menu-title"))
        .reply_markup(main_menu_keyboard())
        .await?;
    Ok(())
}

/// Extract the command name from text like "/start" or
/// "/start@NotekeeperBot". `None` when the text is not a command.
fn parse_command(text: &str) -> Option<&str> {
    let first = text.split_whitespace().next()?;
    let name = first.strip_prefix('/')?;
    let name = name.split('@').next().unwrap_or(name);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

async fn handle_command(bot: &Bot, msg: &Message, command: &str) -> Result<()> {
    match command {
        "start" => {
            bot.send_message(msg.chat.id, t("welcome"))
                .reply_markup(main_menu_keyboard())
                .await?;
        }
        "help" => {
            bot.send_message(msg.chat.id, t("help")).await?;
        }
        _ => {
            debug!("Unknown command {command:?} from chat {}", msg.chat.id);
            send_main_menu(bot, msg.chat.id).await?;
        }
    }
    Ok(())
}

/// Reduce a message to the payload the flows care about: literal text
/// for text messages, the Telegram file reference for photos, videos,
/// and documents. Anything else is unsupported.
fn classify_message(msg: &Message) -> MessagePayload {
    if let Some(text) = msg.text() {
        MessagePayload::Text(text.to_string())
    } else if let Some(photos) = msg.photo() {
        // Telegram sends several resolutions; keep the reference to the largest.
        photos
            .last()
            .map(|photo| MessagePayload::Media(NoteKind::Photo, photo.file.id.0.clone()))
            .unwrap_or(MessagePayload::Unsupported)
    } else if let Some(video) = msg.video() {
        MessagePayload::Media(NoteKind::Video, video.file.id.0.clone())
    } else if let Some(document) = msg.document() {
        MessagePayload::Media(NoteKind::Document, document.file.id.0.clone())
    } else {
        MessagePayload::Unsupported
    }
}

async fn run_flow_step(
    bot: &Bot,
    msg: &Message,
    conn: &Arc<Mutex<Connection>>,
    step: FlowStep,
) -> Result<()> {
    match step {
        FlowStep::SaveNote(kind, content) => {
            let add_result = {
                let conn = conn.lock().await;
                db::add_note(&conn, kind, &content)
            };

            match add_result {
                Ok(note_id) => {
                    debug!("Chat {} saved note {}", msg.chat.id, note_id);
                    bot.send_message(msg.chat.id, t("note-saved")).await?;
                }
                Err(e) => {
                    error!("Failed to save note for chat {}: {e:#}", msg.chat.id);
                    bot.send_message(msg.chat.id, t("error-storage")).await?;
                }
            }
        }
        FlowStep::Search(keyword) => {
            let search_result = {
                let conn = conn.lock().await;
                db::search_text_notes(&conn, &keyword)
            };

            match search_result {
                Ok(notes) if notes.is_empty() => {
                    bot.send_message(msg.chat.id, t("nothing-found")).await?;
                }
                Ok(notes) => {
                    debug!(
                        "Chat {} search {:?} returned {} note(s)",
                        msg.chat.id,
                        keyword,
                        notes.len()
                    );
                    bot.send_message(msg.chat.id, t("search-results"))
                        .reply_markup(delete_results_keyboard(&notes))
                        .await?;
                }
                Err(e) => {
                    error!("Search failed for chat {}: {e:#}", msg.chat.id);
                    bot.send_message(msg.chat.id, t("error-storage")).await?;
                }
            }
        }
        FlowStep::RejectContent => {
            bot.send_message(msg.chat.id, t("unsupported-type")).await?;
        }
        FlowStep::RejectKeyword => {
            bot.send_message(msg.chat.id, t("search-text-only")).await?;
        }
        FlowStep::ShowMenu => {
            debug!("Message outside a flow from chat {}", msg.chat.id);
            send_main_menu(bot, msg.chat.id).await?;
        }
    }
    Ok(())
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    conn: Arc<Mutex<Connection>>,
    dialogue: NoteDialogue,
) -> Result<()> {
    let state = dialogue.get().await?.unwrap_or_default();

    // Commands only act when no flow is in progress; once a flow waits
    // for input, whatever arrives is that input.
    if state == NoteDialogueState::Idle {
        if let Some(command) = msg.text().and_then(parse_command) {
            return handle_command(&bot, &msg, command).await;
        }
    }

    let (next_state, step) = next_step(&state, classify_message(&msg));
    let completed = step.completes_flow();

    run_flow_step(&bot, &msg, &conn, step).await?;
    dialogue.update(next_state).await?;

    if completed {
        send_main_menu(&bot, msg.chat.id).await?;
    }
    Ok(())
}
