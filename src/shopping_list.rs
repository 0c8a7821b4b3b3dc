//! # Shopping List
//!
//! Derives the aggregated shopping list from the recipe catalog and the
//! weekly plan. The list is recomputed from scratch on every call and never
//! stored, so it can not drift from its sources.
//!
//! ## Features
//!
//! - Walks the week in calendar order and every day in meal order, so the
//!   result is deterministic for identical inputs
//! - Merges ingredient lines whose trimmed, lowercased name and unit match,
//!   summing their quantities; units are never converted
//! - Skips plan references to recipes that no longer exist
//! - Sorts by display name under a caller-provided [`Collation`]
//!
//! ## Usage
//!
//! ```rust
//! use mealmaster::collation::CodepointCollation;
//! use mealmaster::meal_model::{Ingredient, MealType, Recipe, WeeklyPlan};
//! use mealmaster::plan_mutation::{update_slot, SlotAction};
//! use mealmaster::shopping_list::build_shopping_list;
//!
//! let recipes = vec![Recipe::new("101", "煎蛋")
//!     .with_ingredient(Ingredient::new("鸡蛋", 2.0, "个"))];
//!
//! let plan = update_slot(&WeeklyPlan::new(), "Monday", MealType::Breakfast, "101", SlotAction::Add);
//! let list = build_shopping_list(&recipes, &plan, &CodepointCollation);
//!
//! assert_eq!(list.len(), 1);
//! assert_eq!(list[0].quantity, 2.0);
//! assert!(!list[0].checked);
//! ```

use log::{debug, info, trace};
use std::collections::HashMap;

use crate::collation::Collation;
use crate::meal_model::{identity_key, MealType, Recipe, ShoppingItem, WeeklyPlan, DAYS_OF_WEEK};

/// Build the aggregated shopping list for a week.
///
/// Every planned recipe contributes each of its ingredient lines once per
/// slot it occupies. Lines sharing an identity key (see
/// [`identity_key`]) are merged into one item carrying the
/// first occurrence's trimmed name and unit and the summed quantity. The
/// result is sorted by name under `collation`; the sort is stable, so items
/// with equal names keep their first-seen order.
///
/// Plan entries pointing at unknown recipe ids are skipped: a reference can
/// dangle transiently between a catalog removal and the plan purge, and the
/// list must stay usable meanwhile.
pub fn build_shopping_list(
    recipes: &[Recipe],
    plan: &WeeklyPlan,
    collation: &dyn Collation,
) -> Vec<ShoppingItem> {
    let mut items: Vec<ShoppingItem> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for day in DAYS_OF_WEEK {
        let day_plan = match plan.get(day) {
            Some(day_plan) => day_plan,
            None => continue,
        };

        for meal in MealType::ALL {
            for recipe_id in day_plan.slot_ids(meal) {
                let recipe = match recipes.iter().find(|r| r.id == recipe_id) {
                    Some(recipe) => recipe,
                    None => {
                        debug!(
                            "Skipping dangling recipe reference {} in {} {}",
                            recipe_id, day, meal
                        );
                        continue;
                    }
                };

                trace!("Collecting {} from {} {}", recipe.name, day, meal);
                for ingredient in &recipe.ingredients {
                    let key = identity_key(&ingredient.name, &ingredient.unit);
                    match index.get(&key) {
                        Some(&position) => items[position].quantity += ingredient.quantity,
                        None => {
                            index.insert(key, items.len());
                            items.push(ShoppingItem::new(
                                ingredient.name.trim(),
                                ingredient.quantity,
                                ingredient.unit.trim(),
                            ));
                        }
                    }
                }
            }
        }
    }

    items.sort_by(|a, b| collation.compare(&a.name, &b.name));

    info!("Built shopping list with {} item(s)", items.len());
    items
}
