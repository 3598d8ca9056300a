//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules for better organization:
//! - `message_handler`: Handles incoming text, photo, video, and document messages
//! - `callback_handler`: Handles inline keyboard callback queries
//! - `dialogue_manager`: Decides session mode transitions for the handlers
//! - `ui_builder`: Creates keyboards and callback tokens

pub mod callback_handler;
pub mod dialogue_manager;
pub mod message_handler;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use dialogue_manager::{next_step, route_callback};
pub use message_handler::message_handler;

// Re-export utility functions that might be used elsewhere
pub use ui_builder::{delete_results_keyboard, main_menu_keyboard, note_label, parse_delete_token};
