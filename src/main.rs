use anyhow::{Context, Result};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, info, warn};

use culture_bot::bot::{self, BotContext};
use culture_bot::catalog::Catalog;
use culture_bot::config::{read_token, BotConfig};
use culture_bot::localization::init_localization;
use culture_bot::logging::{init_tracing, LogFormat};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    init_tracing(LogFormat::from_env())?;

    info!("Starting culture Telegram bot");

    let config = BotConfig::from_env().context("Invalid bot configuration")?;

    let token = read_token(&config.token_path).context("Failed to read bot token")?;

    info!("Loading catalog from: {}", config.catalog_path.display());
    let catalog = Catalog::load(&config.catalog_path).context("Failed to load catalog")?;

    init_localization(&config.default_language).context("Failed to load translations")?;

    let ctx = Arc::new(BotContext::new(catalog, config));

    for category in ctx.empty_menu_categories() {
        warn!(category = %category, "Menu category has no cultural points");
    }

    // Initialize the bot
    let bot = Bot::new(token);

    info!("Bot initialized, starting dispatcher");

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(bot::message_handler))
        .branch(Update::filter_callback_query().endpoint(bot::callback_handler));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![ctx])
        .default_handler(|upd| async move {
            debug!(update_id = ?upd.id, "Unhandled update");
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
