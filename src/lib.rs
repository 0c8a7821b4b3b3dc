//! # Mealmaster
//!
//! Core of a client-side meal planner: a recipe catalog, a seven-day plan of
//! breakfast/lunch/dinner slots, and a shopping list derived from the two by
//! pure aggregation. State lives in a flat key-value blob store; every
//! operation takes the current values and returns the next ones.

pub mod bulk_import;
pub mod collation;
pub mod ingredient_presets;
pub mod list_export;
pub mod local_store;
pub mod meal_model;
pub mod plan_mutation;
pub mod recipe_catalog;
pub mod shopping_list;
