//! # Callback Codec
//!
//! Encodes navigation state into inline button payloads and decodes it back.
//! Payloads look like `optionCategory.Музеи`, `optionArrow.Музеи.2` and
//! `optionBackToMenu`. They are the only state carried between interactions.

use std::fmt;
use std::str::FromStr;

use crate::errors::BotError;

pub const DELIMITER: char = '.';

const CATEGORY_TAG: &str = "optionCategory";
const ARROW_TAG: &str = "optionArrow";
const BACK_TO_MENU_TAG: &str = "optionBackToMenu";

/// Action carried by a navigation button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    Category,
    Arrow,
    BackToMenu,
}

/// Decoded button payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationToken {
    /// Open the first entry of a category
    Category { category: String },
    /// Show the entry at `index` (wrapped) of a category
    Arrow { category: String, index: i64 },
    /// Show the main menu again
    BackToMenu,
}

impl NavigationToken {
    pub fn category(category: impl Into<String>) -> Self {
        NavigationToken::Category {
            category: category.into(),
        }
    }

    pub fn arrow(category: impl Into<String>, index: i64) -> Self {
        NavigationToken::Arrow {
            category: category.into(),
            index,
        }
    }

    pub fn action(&self) -> NavigationAction {
        match self {
            NavigationToken::Category { .. } => NavigationAction::Category,
            NavigationToken::Arrow { .. } => NavigationAction::Arrow,
            NavigationToken::BackToMenu => NavigationAction::BackToMenu,
        }
    }

    /// Serialize into button payload form
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Parse a button payload.
    ///
    /// The action tag ends at the first delimiter. For arrows the index follows
    /// the last delimiter, everything between is the category.
    pub fn decode(data: &str) -> Result<Self, BotError> {
        let malformed = || BotError::MalformedCallback(data.to_string());
        let (tag, rest) = match data.split_once(DELIMITER) {
            Some((tag, rest)) => (tag, Some(rest)),
            None => (data, None),
        };

        match tag {
            CATEGORY_TAG => match rest {
                Some(category) if !category.is_empty() => Ok(Self::category(category)),
                _ => Err(malformed()),
            },
            ARROW_TAG => {
                let (category, index) = rest
                    .and_then(|rest| rest.rsplit_once(DELIMITER))
                    .ok_or_else(malformed)?;
                if category.is_empty() {
                    return Err(malformed());
                }
                let index: i64 = index.parse().map_err(|_| malformed())?;
                Ok(Self::arrow(category, index))
            }
            BACK_TO_MENU_TAG => Ok(NavigationToken::BackToMenu),
            _ => Err(malformed()),
        }
    }
}

impl fmt::Display for NavigationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationToken::Category { category } => {
                write!(f, "{CATEGORY_TAG}{DELIMITER}{category}")
            }
            NavigationToken::Arrow { category, index } => {
                write!(f, "{ARROW_TAG}{DELIMITER}{category}{DELIMITER}{index}")
            }
            NavigationToken::BackToMenu => f.write_str(BACK_TO_MENU_TAG),
        }
    }
}

impl FromStr for NavigationToken {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}
