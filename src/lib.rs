//! # Notekeeper Telegram Bot
//!
//! A single-user Telegram bot that stores notes (text, photo, video, or
//! document references) in a local SQLite database and lets the user add,
//! keyword-search, and delete them through inline-keyboard menus.

pub mod bot;
pub mod config;
pub mod db;
pub mod dialogue;
pub mod localization;
pub mod transport;
