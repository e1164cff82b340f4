//! Circular browsing inside a category view.

use crate::catalog::{CategoryView, CulturalPoint};
use crate::errors::BotError;

/// Resolve the point to show for a requested index.
///
/// The index wraps around the view length in both directions, so `-1` is the
/// last entry and `len` is the first one. Returns the point together with the
/// normalized index.
pub fn resolve<'a>(
    view: &CategoryView<'a>,
    index: i64,
) -> Result<(&'a CulturalPoint, usize), BotError> {
    let len = view.len();
    if len == 0 {
        return Err(BotError::EmptyCategory(view.category().to_string()));
    }

    let normalized = index.rem_euclid(len as i64) as usize;
    let point = view
        .get(normalized)
        .ok_or_else(|| BotError::EmptyCategory(view.category().to_string()))?;

    Ok((point, normalized))
}
