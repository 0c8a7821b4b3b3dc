//! # Collation
//!
//! Locale-aware string comparison for shopping list and vocabulary ordering.
//!
//! The list builders never hardcode a sort order; they take a [`Collation`]
//! and leave the convention to the caller. The app's own convention is
//! Chinese pinyin ordering, provided by [`PinyinCollation`].
//!
//! ## Usage
//!
//! ```rust
//! use mealmaster::collation::{Collation, PinyinCollation};
//!
//! let zh = PinyinCollation::new()?;
//! let mut names = vec!["苹果", "白菜", "鸡蛋"];
//! names.sort_by(|a, b| zh.compare(a, b));
//! assert_eq!(names, vec!["白菜", "鸡蛋", "苹果"]);
//! # Ok::<(), icu_collator::CollatorError>(())
//! ```

use icu_collator::{Collator, CollatorError, CollatorOptions};
use icu_locid::locale;
use log::info;
use std::cmp::Ordering;

/// String comparison capability injected into everything that sorts
/// display names
pub trait Collation {
    /// Compare two display strings
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Any ordering closure can stand in for a collation, which keeps tests
/// and one-off callers free of wrapper types
impl<F> Collation for F
where
    F: Fn(&str, &str) -> Ordering,
{
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self(a, b)
    }
}

/// Chinese collation in pinyin order, backed by the bundled CLDR data.
///
/// Pinyin is the default collation for zh, so 白菜 (bái) sorts before
/// 鸡蛋 (jī) even though its code point is larger.
pub struct PinyinCollation {
    collator: Collator,
}

impl PinyinCollation {
    /// Create a collator for the zh locale
    pub fn new() -> Result<Self, CollatorError> {
        info!("Creating zh collator (pinyin ordering)");
        let collator = Collator::try_new(&locale!("zh").into(), CollatorOptions::new())?;
        Ok(Self { collator })
    }
}

impl Default for PinyinCollation {
    fn default() -> Self {
        Self::new().expect("Bundled zh collation data should be valid")
    }
}

impl Collation for PinyinCollation {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b)
    }
}

/// Plain code point ordering, for callers with no locale convention
#[derive(Debug, Clone, Copy, Default)]
pub struct CodepointCollation;

impl Collation for CodepointCollation {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinyin_orders_by_pronunciation() {
        let zh = PinyinCollation::default();

        // bái < jī < niú < píng < tǔ < xī
        assert_eq!(zh.compare("白菜", "鸡蛋"), Ordering::Less);
        assert_eq!(zh.compare("鸡蛋", "牛奶"), Ordering::Less);
        assert_eq!(zh.compare("牛奶", "苹果"), Ordering::Less);
        assert_eq!(zh.compare("苹果", "土豆"), Ordering::Less);
        assert_eq!(zh.compare("土豆", "西红柿"), Ordering::Less);
    }

    #[test]
    fn test_pinyin_differs_from_codepoint_order() {
        let zh = PinyinCollation::default();
        let plain = CodepointCollation;

        // 鸡 (U+9E21) > 苹 (U+82F9) by code point, but jī < píng in pinyin
        assert_eq!(plain.compare("鸡蛋", "苹果"), Ordering::Greater);
        assert_eq!(zh.compare("鸡蛋", "苹果"), Ordering::Less);

        // 白 (U+767D) > 土 (U+571F) by code point, but bái < tǔ in pinyin
        assert_eq!(plain.compare("白菜", "土豆"), Ordering::Greater);
        assert_eq!(zh.compare("白菜", "土豆"), Ordering::Less);
    }

    #[test]
    fn test_equal_strings_compare_equal() {
        let zh = PinyinCollation::default();
        assert_eq!(zh.compare("鸡蛋", "鸡蛋"), Ordering::Equal);
    }

    #[test]
    fn test_closure_as_collation() {
        fn sorted_with(collation: &dyn Collation, mut names: Vec<&str>) -> Vec<String> {
            names.sort_by(|a, b| collation.compare(a, b));
            names.into_iter().map(String::from).collect()
        }

        let by_length = |a: &str, b: &str| a.len().cmp(&b.len());
        let sorted = sorted_with(&by_length, vec!["ccc", "a", "bb"]);
        assert_eq!(sorted, vec!["a", "bb", "ccc"]);
    }
}
