//! # Bulk Ingredient Import
//!
//! Tolerant parsing of pasted ingredient lists into structured lines. Users
//! paste whole blocks copied from spreadsheets, notes or chat messages, so
//! every line is tried against a chain of recognizers from most to least
//! structured.
//!
//! ## Features
//!
//! - **Tabular**: tab-separated `名称	数量	单位` rows, as pasted from a
//!   spreadsheet
//! - **Pattern**: free text shaped like `名称 数量 [单位]` (e.g. "鸡蛋 2 个",
//!   "牛奶 200 ml")
//! - **Whitespace fallback**: a trailing number becomes the quantity,
//!   anything else keeps the whole line as the name
//! - Missing quantities and units fall back to configurable defaults
//!   instead of failing the line
//!
//! ## Usage
//!
//! ```rust
//! use mealmaster::bulk_import::parse_bulk_text;
//!
//! let ingredients = parse_bulk_text("鸡蛋\t2\t个\n牛奶 200 ml\n盐")?;
//!
//! assert_eq!(ingredients.len(), 3);
//! assert_eq!(ingredients[1].name, "牛奶");
//! assert_eq!(ingredients[1].quantity, 200.0);
//! assert_eq!(ingredients[2].unit, "个");
//! # Ok::<(), mealmaster::bulk_import::BulkImportError>(())
//! ```

use lazy_static::lazy_static;
use log::{debug, info, trace, warn};
use regex::Regex;
use std::fmt;

use crate::meal_model::Ingredient;

/// Quantity assigned to a line that does not carry a parseable number
pub const DEFAULT_QUANTITY: f64 = 1.0;

/// Unit assigned to a line that does not carry one
pub const DEFAULT_UNIT: &str = "个";

// Pattern strategy: a digit-free name, whitespace, a number, then an
// optional unit tail. \D and \s are Unicode classes, so CJK names and
// full-width spaces are covered.
pub const LINE_PATTERN: &str = r"^(?P<name>\D+)\s+(?P<qty>\d+(?:\.\d+)?)\s*(?P<unit>.*)$";

lazy_static! {
    static ref LINE_REGEX: Regex =
        Regex::new(LINE_PATTERN).expect("Bulk import line pattern should be valid");
}

/// Fallback values used for lines that omit the quantity or unit
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOptions {
    /// Quantity used when a line has none
    pub default_quantity: f64,
    /// Unit used when a line has none
    pub default_unit: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            default_quantity: DEFAULT_QUANTITY,
            default_unit: DEFAULT_UNIT.to_string(),
        }
    }
}

/// Which recognizer accepted a line, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// Tab-separated fields
    Tabular,
    /// `名称 数量 [单位]` free text
    Pattern,
    /// Trailing-number split or whole-line name
    Whitespace,
}

/// Errors reported by the bulk importer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkImportError {
    /// No line of the pasted text yielded an ingredient
    Unrecognized,
}

impl fmt::Display for BulkImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BulkImportError::Unrecognized => {
                write!(f, "无法识别格式，请确保每行为: 食材名 数量 单位")
            }
        }
    }
}

impl std::error::Error for BulkImportError {}

/// Parse a pasted ingredient block with the default fallbacks.
///
/// Lines are trimmed and tried against the strategies in priority order;
/// blank lines are skipped. An input where no line at all can be read
/// as an ingredient is reported as [`BulkImportError::Unrecognized`] so
/// the caller can tell the user to fix the format.
pub fn parse_bulk_text(text: &str) -> Result<Vec<Ingredient>, BulkImportError> {
    parse_bulk_text_with(text, &ImportOptions::default())
}

/// Parse a pasted ingredient block with caller-provided fallbacks
///
/// # Arguments
///
/// * `text` - The pasted block, one ingredient per line
/// * `options` - Fallback quantity and unit for underspecified lines
pub fn parse_bulk_text_with(
    text: &str,
    options: &ImportOptions,
) -> Result<Vec<Ingredient>, BulkImportError> {
    debug!("Parsing bulk text with {} line(s)", text.lines().count());

    let mut ingredients = Vec::new();
    for (line_number, line) in text.lines().enumerate() {
        match parse_line(line, options) {
            Some((ingredient, strategy)) => {
                trace!(
                    "Line {} accepted by {:?} strategy: {}",
                    line_number,
                    strategy,
                    ingredient
                );
                ingredients.push(ingredient);
            }
            None => trace!("Line {} skipped", line_number),
        }
    }

    if ingredients.is_empty() {
        warn!("Bulk text yielded no ingredients");
        return Err(BulkImportError::Unrecognized);
    }

    info!("Parsed {} ingredient line(s) from bulk text", ingredients.len());
    Ok(ingredients)
}

/// Parse a single line, reporting which strategy accepted it.
///
/// Returns `None` for blank lines and for the (theoretical) case of a
/// recognizer producing an empty name.
pub fn parse_line(line: &str, options: &ImportOptions) -> Option<(Ingredient, ParseStrategy)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (ingredient, strategy) = if let Some(ingredient) = parse_tabular(line, options) {
        (ingredient, ParseStrategy::Tabular)
    } else if let Some(ingredient) = parse_pattern(line, options) {
        (ingredient, ParseStrategy::Pattern)
    } else {
        (parse_whitespace(line, options), ParseStrategy::Whitespace)
    };

    if ingredient.name.is_empty() {
        debug!("Dropping line with empty ingredient name: '{}'", line);
        return None;
    }

    Some((ingredient, strategy))
}

/// Tab-separated row: name, quantity, optional unit
fn parse_tabular(line: &str, options: &ImportOptions) -> Option<Ingredient> {
    if !line.contains('\t') {
        return None;
    }

    let fields: Vec<&str> = line
        .split('\t')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .collect();
    if fields.len() < 2 {
        return None;
    }

    // f64::from_str accepts "NaN", which was never a usable quantity
    let quantity = match fields[1].parse::<f64>() {
        Ok(quantity) if !quantity.is_nan() => quantity,
        _ => {
            debug!(
                "Tab field '{}' is not a number, keeping default quantity",
                fields[1]
            );
            options.default_quantity
        }
    };
    let unit = fields.get(2).copied().unwrap_or(options.default_unit.as_str());

    Some(Ingredient::new(fields[0], quantity, unit))
}

/// `名称 数量 [单位]` free text via [`LINE_PATTERN`]
fn parse_pattern(line: &str, options: &ImportOptions) -> Option<Ingredient> {
    let caps = LINE_REGEX.captures(line)?;

    let name = caps.name("name")?.as_str().trim();
    let quantity = caps.name("qty")?.as_str().parse::<f64>().ok()?;
    let unit = caps
        .name("unit")
        .map(|unit| unit.as_str().trim())
        .filter(|unit| !unit.is_empty())
        .unwrap_or(options.default_unit.as_str());

    Some(Ingredient::new(name, quantity, unit))
}

/// Last resort: trailing number is the quantity, otherwise the whole line
/// is the name. Always produces a line.
fn parse_whitespace(line: &str, options: &ImportOptions) -> Ingredient {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if tokens.len() >= 2 {
        let trailing = tokens[tokens.len() - 1].parse::<f64>().ok();
        if let Some(quantity) = trailing.filter(|quantity| !quantity.is_nan()) {
            let name = tokens[..tokens.len() - 1].join(" ");
            return Ingredient::new(&name, quantity, &options.default_unit);
        }
    }

    Ingredient::new(line, options.default_quantity, &options.default_unit)
}
