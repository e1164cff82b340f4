//! Messaging gateway abstraction over the Telegram Bot API

use std::future::Future;
use std::path::PathBuf;

use reqwest::Url;
use teloxide::prelude::*;
use teloxide::types::{CallbackQueryId, InlineKeyboardMarkup, InputFile, ParseMode};

use crate::errors::BotError;

/// Operations the dispatcher needs from the messaging service
pub trait MessagingGateway: Send + Sync {
    /// Send a plain text message, optionally with an inline keyboard
    fn send_text(
        &self,
        chat_id: ChatId,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> impl Future<Output = Result<(), BotError>> + Send;

    /// Send a picture with a caption. `photo` is a URL or a local file path.
    fn send_photo(
        &self,
        chat_id: ChatId,
        photo: &str,
        caption: String,
        keyboard: Option<InlineKeyboardMarkup>,
        html: bool,
    ) -> impl Future<Output = Result<(), BotError>> + Send;

    /// Acknowledge a callback query so the client stops showing the spinner
    fn answer_callback(
        &self,
        callback_id: CallbackQueryId,
    ) -> impl Future<Output = Result<(), BotError>> + Send;
}

/// Gateway backed by a teloxide [`Bot`]
#[derive(Clone)]
pub struct TelegramGateway {
    bot: Bot,
}

impl TelegramGateway {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

/// Where a catalog picture is taken from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    /// Telegram fetches the picture itself
    Remote(Url),
    /// The picture is uploaded from disk
    Local(PathBuf),
}

impl PhotoSource {
    /// Only http(s) URLs are remote, anything else is a file path
    pub fn parse(photo: &str) -> Self {
        match Url::parse(photo) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => PhotoSource::Remote(url),
            _ => PhotoSource::Local(PathBuf::from(photo)),
        }
    }

    pub fn into_input_file(self) -> InputFile {
        match self {
            PhotoSource::Remote(url) => InputFile::url(url),
            PhotoSource::Local(path) => InputFile::file(path),
        }
    }
}

impl MessagingGateway for TelegramGateway {
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), BotError> {
        let request = self.bot.send_message(chat_id, text);
        match keyboard {
            Some(keyboard) => request.reply_markup(keyboard).await?,
            None => request.await?,
        };
        Ok(())
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo: &str,
        caption: String,
        keyboard: Option<InlineKeyboardMarkup>,
        html: bool,
    ) -> Result<(), BotError> {
        let mut request = self
            .bot
            .send_photo(chat_id, PhotoSource::parse(photo).into_input_file())
            .caption(caption);
        if html {
            request = request.parse_mode(ParseMode::Html);
        }
        match keyboard {
            Some(keyboard) => request.reply_markup(keyboard).await?,
            None => request.await?,
        };
        Ok(())
    }

    async fn answer_callback(&self, callback_id: CallbackQueryId) -> Result<(), BotError> {
        self.bot.answer_callback_query(callback_id).await?;
        Ok(())
    }
}
