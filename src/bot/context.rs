//! Shared, read-only state handed to every handler

use crate::catalog::Catalog;
use crate::config::BotConfig;

/// Everything a handler needs to render a reply
#[derive(Debug, Clone)]
pub struct BotContext {
    pub catalog: Catalog,
    pub config: BotConfig,
}

impl BotContext {
    pub fn new(catalog: Catalog, config: BotConfig) -> Self {
        Self { catalog, config }
    }

    /// Menu categories that currently have no entry in the catalog
    pub fn empty_menu_categories(&self) -> Vec<&str> {
        self.catalog.missing_categories(&self.config.menu_categories)
    }
}
