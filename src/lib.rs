//! # Culture Telegram Bot
//!
//! A Telegram bot that lets users browse a catalog of Moscow cultural
//! landmarks by category using inline navigation buttons.

pub mod bot;
pub mod callback_codec;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod localization;
pub mod logging;
pub mod navigation;
