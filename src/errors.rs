//! # Bot Error Types Module
//!
//! This module defines the error type shared by the catalog, the callback codec,
//! the navigation resolver and the messaging gateway.

/// Broad classification used to decide how an error is recovered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing credentials, missing or malformed catalog, bad configuration
    StartupFatal,
    /// A button payload that could not be decoded
    MalformedCallback,
    /// Navigation into a category without entries
    EmptyCategory,
    /// The messaging API rejected or failed a request
    GatewaySendFailure,
}

/// Custom error types for bot operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotError {
    /// Credential file does not exist
    CredentialNotFound(String),
    /// Credential file exists but could not be read
    CredentialIo(String),
    /// Credential file exists but holds no token
    CredentialEmpty(String),
    /// Catalog file does not exist
    CatalogNotFound(String),
    /// Catalog file exists but could not be read
    CatalogIo(String),
    /// Catalog document does not match the expected schema
    CatalogParse(String),
    /// Invalid configuration value
    Config(String),
    /// Undecodable navigation token
    MalformedCallback(String),
    /// Category has no entries to show
    EmptyCategory(String),
    /// Messaging API failure
    Gateway(String),
}

impl BotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BotError::CredentialNotFound(_)
            | BotError::CredentialIo(_)
            | BotError::CredentialEmpty(_)
            | BotError::CatalogNotFound(_)
            | BotError::CatalogIo(_)
            | BotError::CatalogParse(_)
            | BotError::Config(_) => ErrorKind::StartupFatal,
            BotError::MalformedCallback(_) => ErrorKind::MalformedCallback,
            BotError::EmptyCategory(_) => ErrorKind::EmptyCategory,
            BotError::Gateway(_) => ErrorKind::GatewaySendFailure,
        }
    }

    pub fn is_startup_fatal(&self) -> bool {
        self.kind() == ErrorKind::StartupFatal
    }
}

impl std::fmt::Display for BotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotError::CredentialNotFound(path) => write!(f, "Credential file not found: {path}"),
            BotError::CredentialIo(msg) => write!(f, "Credential read error: {msg}"),
            BotError::CredentialEmpty(path) => write!(f, "Credential file is empty: {path}"),
            BotError::CatalogNotFound(path) => write!(f, "Catalog file not found: {path}"),
            BotError::CatalogIo(msg) => write!(f, "Catalog read error: {msg}"),
            BotError::CatalogParse(msg) => write!(f, "Catalog parse error: {msg}"),
            BotError::Config(msg) => write!(f, "Configuration error: {msg}"),
            BotError::MalformedCallback(data) => write!(f, "Malformed callback data: {data}"),
            BotError::EmptyCategory(category) => write!(f, "Category has no entries: {category}"),
            BotError::Gateway(msg) => write!(f, "Gateway error: {msg}"),
        }
    }
}

impl std::error::Error for BotError {}

impl From<teloxide::RequestError> for BotError {
    fn from(err: teloxide::RequestError) -> Self {
        BotError::Gateway(err.to_string())
    }
}
