//! UI Builder module for creating keyboards and formatting messages

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::utils::html;

// Import localization
use crate::localization::{t_args_lang, t_lang};

use crate::callback_codec::NavigationToken;
use crate::catalog::CulturalPoint;

/// Create the main menu keyboard, one button per category
pub fn create_main_menu_keyboard(categories: &[String], columns: usize) -> InlineKeyboardMarkup {
    let buttons: Vec<Vec<InlineKeyboardButton>> = categories
        .chunks(columns.max(1))
        .map(|row| {
            row.iter()
                .map(|category| {
                    InlineKeyboardButton::callback(
                        category.clone(),
                        NavigationToken::category(category.as_str()).encode(),
                    )
                })
                .collect()
        })
        .collect();

    InlineKeyboardMarkup::new(buttons)
}

/// Create the arrows and menu keyboard shown under a cultural point
pub fn create_navigation_keyboard(
    category: &str,
    index: usize,
    language_code: Option<&str>,
) -> InlineKeyboardMarkup {
    let index = index as i64;

    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback(
                t_lang("button-previous", language_code),
                NavigationToken::arrow(category, index - 1).encode(),
            ),
            InlineKeyboardButton::callback(
                t_lang("button-next", language_code),
                NavigationToken::arrow(category, index + 1).encode(),
            ),
        ],
        vec![InlineKeyboardButton::callback(
            t_lang("button-menu", language_code),
            NavigationToken::BackToMenu.encode(),
        )],
    ])
}

/// Format the HTML caption of a cultural point
pub fn format_point_caption(point: &CulturalPoint, language_code: Option<&str>) -> String {
    let address = html::escape(&point.address);
    format!(
        "{}\n\n{}\n\n{}",
        html::escape(&point.name),
        html::escape(&point.description),
        t_args_lang("point-address", &[("address", address.as_str())], language_code)
    )
}

/// Format the welcome text for a user
pub fn format_welcome_message(first_name: Option<&str>, language_code: Option<&str>) -> String {
    let guest = t_lang("welcome-guest", language_code);
    let name = first_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(&guest);

    format!(
        "{}\n\n{}",
        t_args_lang("welcome-greeting", &[("name", name)], language_code),
        t_lang("welcome-description", language_code)
    )
}

/// Format the text shown when the user returns to the main menu
pub fn format_back_to_menu_message(language_code: Option<&str>) -> String {
    format!(
        "{}\n\n{}",
        t_lang("menu-returned", language_code),
        t_lang("menu-choose-category", language_code)
    )
}
