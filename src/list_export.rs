//! # List Export
//!
//! Renders a shopping list as plain text for the clipboard: a header line,
//! a blank line, then one `[x] 名称: 数量 单位` line per item.

use log::info;
use std::collections::HashSet;

use crate::meal_model::ShoppingItem;

/// Header line of the exported list
pub const EXPORT_HEADER: &str = "🛒 膳食管家购物清单:";

/// Round a quantity to at most two decimal places, the display precision
/// of the exported list
pub fn round2(quantity: f64) -> f64 {
    (quantity * 100.0).round() / 100.0
}

/// Render the list as clipboard text.
///
/// An item is marked `[x]` when its own `checked` flag is set or when its
/// identity key (see [`crate::meal_model::identity_key`]) appears in
/// `checked_keys`; callers tracking check-offs outside the items pass them
/// through the set. Quantities print without trailing zeros, so `2.0`
/// exports as `2`.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashSet;
/// use mealmaster::list_export::render_clipboard_text;
/// use mealmaster::meal_model::ShoppingItem;
///
/// let items = vec![ShoppingItem::new("鸡蛋", 3.0, "个")];
/// let text = render_clipboard_text(&items, &HashSet::new());
///
/// assert_eq!(text, "🛒 膳食管家购物清单:\n\n[ ] 鸡蛋: 3 个");
/// ```
pub fn render_clipboard_text(items: &[ShoppingItem], checked_keys: &HashSet<String>) -> String {
    let lines: Vec<String> = items
        .iter()
        .map(|item| {
            let checked = item.checked || checked_keys.contains(&item.identity_key());
            format!(
                "{} {}: {} {}",
                if checked { "[x]" } else { "[ ]" },
                item.name,
                round2(item.quantity),
                item.unit
            )
        })
        .collect();

    info!("Rendered shopping list export with {} line(s)", lines.len());
    format!("{}\n\n{}", EXPORT_HEADER, lines.join("\n"))
}
