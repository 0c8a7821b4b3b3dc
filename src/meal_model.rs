//! # Meal Planning Data Model
//!
//! This module defines the data structures shared by the whole crate: recipes
//! with their ingredient lines, the seven-day meal plan, and the derived
//! shopping list items.
//!
//! ## Core Concepts
//!
//! - **Ingredient**: one line of a recipe (name, amount, free-form unit)
//! - **Recipe**: a named dish with an id, instructions and ingredient lines
//! - **WeeklyPlan**: day name mapped to a [`DayPlan`] of three meal slots
//! - **SlotValue**: a meal slot as stored on disk; older plans kept a single
//!   recipe id as a bare string, current plans keep a list of ids
//! - **ShoppingItem**: an aggregated line of the derived shopping list
//!
//! ## Usage
//!
//! ```rust
//! use mealmaster::meal_model::{Ingredient, Recipe};
//!
//! let omelette = Recipe::new("1700000000000", "番茄炒蛋")
//!     .with_ingredient(Ingredient::new("鸡蛋", 2.0, "个"))
//!     .with_ingredient(Ingredient::new("番茄", 1.0, "个"));
//!
//! assert_eq!(omelette.ingredients.len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Days of the week in calendar order, used as plan keys and as the
/// iteration order for aggregation.
pub const DAYS_OF_WEEK: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Display name of the ingredient (e.g., "鸡蛋", "牛奶")
    pub name: String,

    /// Amount of the ingredient in `unit`s; catalog normalization clamps
    /// negative values to zero
    pub quantity: f64,

    /// Free-form unit label (e.g., "个", "克", "ml"); never converted
    pub unit: String,
}

/// A recipe with its id, display name, instructions and ingredient lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique id; plans reference recipes only through this value
    pub id: String,

    /// Display name of the dish
    pub name: String,

    /// Free-form cooking instructions
    pub instructions: String,

    /// Ingredient lines; a usable recipe has at least one line with a
    /// non-empty trimmed name
    pub ingredients: Vec<Ingredient>,
}

/// The three meal slots of a day, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

/// A meal slot as stored inside a weekly plan blob.
///
/// Older plan blobs kept a single recipe id as a bare JSON string; current
/// blobs keep an array of ids. Deserialization accepts both shapes and
/// serialization reproduces whichever shape is held, so stored plans of
/// either generation round-trip byte-faithfully. [`SlotValue::to_ids`] is
/// the single place that flattens the difference for readers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
    /// Canonical form: zero or more recipe ids in display order
    Many(Vec<String>),

    /// Legacy form: one recipe id stored as a bare string
    Legacy(String),
}

/// The three meal slots of one day.
///
/// Slots absent from the stored JSON stay `None` and are skipped when
/// serializing, so a partially-filled legacy day is reproduced as stored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DayPlan {
    /// Breakfast slot, if present in the stored blob
    #[serde(rename = "Breakfast", default, skip_serializing_if = "Option::is_none")]
    pub breakfast: Option<SlotValue>,

    /// Lunch slot, if present in the stored blob
    #[serde(rename = "Lunch", default, skip_serializing_if = "Option::is_none")]
    pub lunch: Option<SlotValue>,

    /// Dinner slot, if present in the stored blob
    #[serde(rename = "Dinner", default, skip_serializing_if = "Option::is_none")]
    pub dinner: Option<SlotValue>,
}

/// A weekly plan: day name mapped to its day plan. Days absent from the map
/// are implicitly empty; keys outside [`DAYS_OF_WEEK`] are tolerated by
/// mutations and ignored by aggregation.
pub type WeeklyPlan = BTreeMap<String, DayPlan>;

/// One aggregated line of the derived shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    /// Trimmed display name taken from the first occurrence
    pub name: String,

    /// Summed quantity across all occurrences sharing the identity key
    pub quantity: f64,

    /// Trimmed unit label taken from the first occurrence
    pub unit: String,

    /// Check-off state; always false on a freshly built list
    pub checked: bool,
}

/// Identity key for shopping aggregation: trimmed, lowercased name and unit
/// joined with `-`. Two ingredient lines merge into one shopping item iff
/// their keys are equal.
///
/// # Examples
///
/// ```rust
/// use mealmaster::meal_model::identity_key;
///
/// assert_eq!(identity_key(" Egg ", "PCS"), "egg-pcs");
/// assert_eq!(identity_key("鸡蛋", "个"), "鸡蛋-个");
/// ```
pub fn identity_key(name: &str, unit: &str) -> String {
    format!(
        "{}-{}",
        name.trim().to_lowercase(),
        unit.trim().to_lowercase()
    )
}

impl Ingredient {
    /// Create an ingredient line
    pub fn new(name: &str, quantity: f64, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
        }
    }
}

impl Recipe {
    /// Create a recipe with an id and a display name
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            instructions: String::new(),
            ingredients: Vec::new(),
        }
    }

    /// Set the cooking instructions
    pub fn with_instructions(mut self, instructions: &str) -> Self {
        self.instructions = instructions.to_string();
        self
    }

    /// Append one ingredient line
    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Replace the ingredient lines wholesale
    pub fn with_ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        self.ingredients = ingredients;
        self
    }
}

impl MealType {
    /// All meal slots in display order
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    /// Canonical slot name, identical to the JSON key inside a day plan
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
        }
    }
}

impl SlotValue {
    /// An empty canonical slot
    pub fn empty() -> Self {
        SlotValue::Many(Vec::new())
    }

    /// Normalize the slot to a list of recipe ids.
    ///
    /// The legacy form yields a one-element list, except for the empty
    /// string which normalizes to no ids at all, matching how absent and
    /// blank slots have always been read.
    pub fn to_ids(&self) -> Vec<String> {
        match self {
            SlotValue::Many(ids) => ids.clone(),
            SlotValue::Legacy(id) if id.is_empty() => Vec::new(),
            SlotValue::Legacy(id) => vec![id.clone()],
        }
    }
}

impl DayPlan {
    /// A fresh day with all three slots present and empty, the shape given
    /// to a day the first time it is touched by a mutation
    pub fn with_empty_slots() -> Self {
        Self {
            breakfast: Some(SlotValue::empty()),
            lunch: Some(SlotValue::empty()),
            dinner: Some(SlotValue::empty()),
        }
    }

    /// Borrow the stored slot for a meal, if present
    pub fn slot(&self, meal: MealType) -> Option<&SlotValue> {
        match meal {
            MealType::Breakfast => self.breakfast.as_ref(),
            MealType::Lunch => self.lunch.as_ref(),
            MealType::Dinner => self.dinner.as_ref(),
        }
    }

    /// Overwrite the slot for a meal
    pub fn set_slot(&mut self, meal: MealType, value: SlotValue) {
        match meal {
            MealType::Breakfast => self.breakfast = Some(value),
            MealType::Lunch => self.lunch = Some(value),
            MealType::Dinner => self.dinner = Some(value),
        }
    }

    /// Normalized recipe ids for a meal; an absent slot reads as empty
    pub fn slot_ids(&self, meal: MealType) -> Vec<String> {
        self.slot(meal).map(|s| s.to_ids()).unwrap_or_default()
    }
}

impl ShoppingItem {
    /// Create an unchecked shopping item
    pub fn new(name: &str, quantity: f64, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
            checked: false,
        }
    }

    /// Identity key of this item, see [`identity_key`]
    pub fn identity_key(&self) -> String {
        identity_key(&self.name, &self.unit)
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.quantity, self.unit)
    }
}
