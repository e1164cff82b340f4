//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `message_handler`: Handles incoming text messages
//! - `callback_handler`: Handles inline keyboard callback queries
//! - `ui_builder`: Creates keyboards and formats messages
//! - `gateway`: Messaging API abstraction and its teloxide implementation
//! - `context`: Read-only state shared by the handlers

pub mod callback_handler;
pub mod context;
pub mod gateway;
pub mod message_handler;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use callback_handler::{callback_handler, handle_callback_query};
pub use message_handler::{handle_text_message, message_handler};

pub use context::BotContext;
pub use gateway::{MessagingGateway, TelegramGateway};
