//! # Bot Configuration Module
//!
//! Defaults reproduce the deployed bot: six categories in two columns, the
//! token in `token.txt` and the catalog in `cultural_points.json`. Each value
//! can be overridden through the environment (a `.env` file is honoured).

use std::env;
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::BotError;

// Constants for bot configuration
pub const DEFAULT_TOKEN_FILE: &str = "token.txt";
pub const DEFAULT_CATALOG_PATH: &str = "cultural_points.json";
pub const DEFAULT_MENU_CATEGORIES: [&str; 6] =
    ["Библиотеки", "Храмы", "Парки", "Музеи", "Памятники", "Театры"];
pub const DEFAULT_MENU_COLUMNS: usize = 2;
pub const DEFAULT_GREETING_PHRASES: [&str; 2] = ["привет", "/start"];
pub const DEFAULT_HELP_COMMAND: &str = "/help";
pub const DEFAULT_LANGUAGE: &str = "ru";

/// Runtime configuration for the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// File holding the Telegram bot token
    pub token_path: PathBuf,
    /// JSON catalog of cultural points
    pub catalog_path: PathBuf,
    /// Category labels offered in the main menu, in display order
    pub menu_categories: Vec<String>,
    /// Buttons per main menu row
    pub menu_columns: usize,
    /// Lowercase phrases that trigger the welcome message
    pub greeting_phrases: Vec<String>,
    /// Command that triggers the help text
    pub help_command: String,
    /// Language used when the user's language is unknown or unsupported
    pub default_language: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token_path: PathBuf::from(DEFAULT_TOKEN_FILE),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            menu_categories: DEFAULT_MENU_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            menu_columns: DEFAULT_MENU_COLUMNS,
            greeting_phrases: DEFAULT_GREETING_PHRASES.iter().map(|s| s.to_string()).collect(),
            help_command: DEFAULT_HELP_COMMAND.to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl BotConfig {
    /// Build the configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("BOT_TOKEN_FILE") {
            config.token_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("CATALOG_PATH") {
            config.catalog_path = PathBuf::from(path);
        }
        if let Some(list) = lookup("MENU_CATEGORIES") {
            config.menu_categories = split_list(&list);
        }
        if let Some(columns) = lookup("MENU_COLUMNS") {
            config.menu_columns = columns.trim().parse().map_err(|_| {
                BotError::Config(format!("MENU_COLUMNS is not a number: {columns}"))
            })?;
        }
        if let Some(list) = lookup("GREETING_PHRASES") {
            config.greeting_phrases = split_list(&list)
                .into_iter()
                .map(|phrase| phrase.to_lowercase())
                .collect();
        }
        if let Some(command) = lookup("HELP_COMMAND") {
            config.help_command = command.trim().to_lowercase();
        }
        if let Some(language) = lookup("DEFAULT_LANGUAGE") {
            config.default_language = language.trim().to_string();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BotError> {
        if self.menu_categories.is_empty() {
            return Err(BotError::Config("menu category list is empty".to_string()));
        }
        if self.menu_columns == 0 {
            return Err(BotError::Config("menu needs at least one column".to_string()));
        }
        if self.greeting_phrases.is_empty() {
            return Err(BotError::Config("greeting phrase list is empty".to_string()));
        }
        if self.help_command.is_empty() {
            return Err(BotError::Config("help command is empty".to_string()));
        }
        Ok(())
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read the bot token from the credential file
pub fn read_token(path: impl AsRef<Path>) -> Result<String, BotError> {
    let path = path.as_ref();
    let display_path = path.display().to_string();

    let raw = fs::read_to_string(path).map_err(|e| match e.kind() {
        IoErrorKind::NotFound => BotError::CredentialNotFound(display_path.clone()),
        _ => BotError::CredentialIo(format!("{display_path}: {e}")),
    })?;

    let token = raw.trim();
    if token.is_empty() {
        return Err(BotError::CredentialEmpty(display_path));
    }
    Ok(token.to_string())
}
