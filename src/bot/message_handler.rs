//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, info};

// Import localization
use crate::localization::t_lang;

use super::context::BotContext;
use super::gateway::{MessagingGateway, TelegramGateway};
use super::ui_builder::{create_main_menu_keyboard, format_welcome_message};

/// Reply chosen for an incoming text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextIntent {
    Greeting,
    Help,
    Unknown,
}

/// Classify a text message. Greetings win over the help command.
pub fn classify_text(text: &str, ctx: &BotContext) -> TextIntent {
    let lowered = text.to_lowercase();
    if ctx
        .config
        .greeting_phrases
        .iter()
        .any(|phrase| lowered.contains(phrase.as_str()))
    {
        TextIntent::Greeting
    } else if lowered.contains(ctx.config.help_command.as_str()) {
        TextIntent::Help
    } else {
        TextIntent::Unknown
    }
}

/// Reply to a text message through any gateway
pub async fn handle_text_message<G: MessagingGateway>(
    gateway: &G,
    ctx: &BotContext,
    chat_id: ChatId,
    text: &str,
    first_name: Option<&str>,
    language_code: Option<&str>,
) -> Result<()> {
    info!(user_id = %chat_id, first_name = first_name.unwrap_or(""), text = %text, "Received text message");

    match classify_text(text, ctx) {
        TextIntent::Greeting => {
            let keyboard =
                create_main_menu_keyboard(&ctx.config.menu_categories, ctx.config.menu_columns);
            gateway
                .send_text(
                    chat_id,
                    format_welcome_message(first_name, language_code),
                    Some(keyboard),
                )
                .await?;
        }
        TextIntent::Help => {
            gateway
                .send_text(chat_id, t_lang("help-text", language_code), None)
                .await?;
        }
        TextIntent::Unknown => {
            gateway
                .send_text(chat_id, t_lang("fallback-text", language_code), None)
                .await?;
        }
    }

    Ok(())
}

/// Teloxide endpoint for message updates
pub async fn message_handler(bot: Bot, msg: Message, ctx: Arc<BotContext>) -> Result<()> {
    let Some(text) = msg.text() else {
        debug!(user_id = %msg.chat.id, "Ignoring non-text message");
        return Ok(());
    };

    // Extract user's language code from Telegram
    let language_code = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.as_deref());

    let gateway = TelegramGateway::new(bot);
    handle_text_message(
        &gateway,
        &ctx,
        msg.chat.id,
        text,
        msg.chat.first_name(),
        language_code,
    )
    .await
}
