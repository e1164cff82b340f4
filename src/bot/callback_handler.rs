//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, CallbackQueryId};
use tracing::{debug, error, warn};

// Import localization
use crate::localization::{t_args_lang, t_lang};

use crate::callback_codec::NavigationToken;
use crate::errors::BotError;
use crate::navigation::resolve;

use super::context::BotContext;
use super::gateway::{MessagingGateway, TelegramGateway};
use super::ui_builder::{
    create_main_menu_keyboard, create_navigation_keyboard, format_back_to_menu_message,
    format_point_caption,
};

/// Send the card of a cultural point with its navigation keyboard
pub async fn show_cultural_point<G: MessagingGateway>(
    gateway: &G,
    ctx: &BotContext,
    chat_id: ChatId,
    category: &str,
    index: i64,
    language_code: Option<&str>,
) -> Result<(), BotError> {
    let view = ctx.catalog.filter_by_category(category);
    let (point, normalized) = resolve(&view, index)?;
    debug!(user_id = %chat_id, category = %category, requested = index, index = normalized, "Showing cultural point");

    gateway
        .send_photo(
            chat_id,
            &point.picture,
            format_point_caption(point, language_code),
            Some(create_navigation_keyboard(category, normalized, language_code)),
            true,
        )
        .await
}

/// Run the branch selected by the callback payload
async fn dispatch_callback<G: MessagingGateway>(
    gateway: &G,
    ctx: &BotContext,
    chat_id: ChatId,
    data: Option<&str>,
    language_code: Option<&str>,
) -> Result<(), BotError> {
    let token = match NavigationToken::decode(data.unwrap_or("")) {
        Ok(token) => token,
        Err(e) => {
            warn!(user_id = %chat_id, error = %e, "Rejecting callback payload");
            return gateway
                .send_text(chat_id, t_lang("error-malformed-callback", language_code), None)
                .await;
        }
    };

    let outcome = match &token {
        NavigationToken::Category { category } => {
            show_cultural_point(gateway, ctx, chat_id, category, 0, language_code).await
        }
        NavigationToken::Arrow { category, index } => {
            show_cultural_point(gateway, ctx, chat_id, category, *index, language_code).await
        }
        NavigationToken::BackToMenu => {
            let keyboard =
                create_main_menu_keyboard(&ctx.config.menu_categories, ctx.config.menu_columns);
            gateway
                .send_text(chat_id, format_back_to_menu_message(language_code), Some(keyboard))
                .await
        }
    };

    match outcome {
        Err(BotError::EmptyCategory(category)) => {
            warn!(user_id = %chat_id, category = %category, "Navigation into an empty category");
            gateway
                .send_text(
                    chat_id,
                    t_args_lang("error-empty-category", &[("category", category.as_str())], language_code),
                    None,
                )
                .await
        }
        other => other,
    }
}

/// Handle a callback query through any gateway.
///
/// The callback is acknowledged exactly once after the branch completed,
/// whatever its outcome. Branch failures are logged and not returned.
pub async fn handle_callback_query<G: MessagingGateway>(
    gateway: &G,
    ctx: &BotContext,
    callback_id: CallbackQueryId,
    chat_id: ChatId,
    data: Option<&str>,
    language_code: Option<&str>,
) -> Result<()> {
    debug!(user_id = %chat_id, data = ?data, "Received callback query");

    if let Err(e) = dispatch_callback(gateway, ctx, chat_id, data, language_code).await {
        error!(user_id = %chat_id, error = %e, "Failed to handle callback query");
    }

    // Answer the callback query to remove the loading state
    gateway.answer_callback(callback_id).await?;

    Ok(())
}

/// Teloxide endpoint for callback query updates
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    ctx: Arc<BotContext>,
) -> Result<()> {
    // Without an attached message the reply goes to the user's private chat
    let chat_id = q
        .message
        .as_ref()
        .map(|msg| msg.chat().id)
        .unwrap_or_else(|| ChatId::from(q.from.id));

    let gateway = TelegramGateway::new(bot);
    handle_callback_query(
        &gateway,
        &ctx,
        q.id,
        chat_id,
        q.data.as_deref(),
        q.from.language_code.as_deref(),
    )
    .await
}
