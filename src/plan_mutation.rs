//! # Plan Mutation
//!
//! Pure transformations over the weekly plan: putting a recipe into a meal
//! slot, taking it out, wiping a deleted recipe from every slot, and
//! clearing the whole week.
//!
//! ## Features
//!
//! - **Copy-on-write**: every operation takes the current plan by reference
//!   and returns a new plan value, so callers can persist or discard it
//! - **Migration on touch**: legacy single-id slots are rewritten to the
//!   canonical list form the first time they are modified; untouched slots
//!   keep their stored shape
//! - **Idempotent adds**: adding a recipe already present in a slot changes
//!   nothing, removing filters every occurrence

use log::{debug, info};

use crate::meal_model::{DayPlan, MealType, SlotValue, WeeklyPlan};

/// What [`update_slot`] should do with the recipe id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAction {
    /// Append the id to the slot if not already present
    Add,
    /// Remove every occurrence of the id from the slot
    Remove,
}

/// Add a recipe to or remove it from one meal slot.
///
/// The day is materialized with three empty slots if it is not in the plan
/// yet, for removals as much as for adds. The touched slot is normalized to
/// the id list form and written back canonically; the other slots of the day
/// are carried over as stored.
///
/// # Arguments
///
/// * `plan` - The current weekly plan
/// * `day` - Day key; any key is accepted, not only the calendar names
/// * `meal` - Which slot of the day to modify
/// * `recipe_id` - The recipe id to add or remove
/// * `action` - Add or remove
///
/// # Examples
///
/// ```rust
/// use mealmaster::meal_model::{MealType, WeeklyPlan};
/// use mealmaster::plan_mutation::{update_slot, SlotAction};
///
/// let plan = WeeklyPlan::new();
/// let plan = update_slot(&plan, "Monday", MealType::Dinner, "101", SlotAction::Add);
/// let plan = update_slot(&plan, "Monday", MealType::Dinner, "101", SlotAction::Add);
///
/// assert_eq!(plan["Monday"].slot_ids(MealType::Dinner), vec!["101".to_string()]);
/// ```
pub fn update_slot(
    plan: &WeeklyPlan,
    day: &str,
    meal: MealType,
    recipe_id: &str,
    action: SlotAction,
) -> WeeklyPlan {
    info!(
        "Updating plan slot {} {} with recipe {} ({:?})",
        day, meal, recipe_id, action
    );

    let mut next = plan.clone();
    let mut day_plan = next
        .get(day)
        .cloned()
        .unwrap_or_else(DayPlan::with_empty_slots);

    let mut ids = day_plan.slot_ids(meal);
    match action {
        SlotAction::Add => {
            if ids.iter().any(|id| id == recipe_id) {
                debug!("Recipe {} already planned for {} {}", recipe_id, day, meal);
            } else {
                ids.push(recipe_id.to_string());
            }
        }
        SlotAction::Remove => {
            ids.retain(|id| id != recipe_id);
        }
    }

    day_plan.set_slot(meal, SlotValue::Many(ids));
    next.insert(day.to_string(), day_plan);
    next
}

/// Remove every reference to a recipe from the whole plan.
///
/// Runs over all days the plan holds, canonical names or not. List slots
/// containing the id are filtered; a legacy single-id slot equal to the id
/// becomes an empty list. Slots that never referenced the id are left
/// exactly as stored, legacy shape included, so a plan blob re-serializes
/// unchanged wherever the recipe did not appear.
pub fn purge_recipe(plan: &WeeklyPlan, recipe_id: &str) -> WeeklyPlan {
    let mut next = plan.clone();
    let mut cleared = 0usize;

    for (day, day_plan) in next.iter_mut() {
        for meal in MealType::ALL {
            let replacement = match day_plan.slot(meal) {
                Some(SlotValue::Many(ids)) if ids.iter().any(|id| id == recipe_id) => {
                    Some(SlotValue::Many(
                        ids.iter()
                            .filter(|id| id.as_str() != recipe_id)
                            .cloned()
                            .collect(),
                    ))
                }
                Some(SlotValue::Legacy(id)) if id == recipe_id => Some(SlotValue::empty()),
                _ => None,
            };

            if let Some(value) = replacement {
                debug!("Clearing recipe {} from {} {}", recipe_id, day, meal);
                day_plan.set_slot(meal, value);
                cleared += 1;
            }
        }
    }

    info!("Purged recipe {} from {} slot(s)", recipe_id, cleared);
    next
}

/// An empty weekly plan, the result of the clear-all action
pub fn clear_plan() -> WeeklyPlan {
    info!("Clearing weekly plan");
    WeeklyPlan::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_with(day: &str, meal: MealType, slot: SlotValue) -> WeeklyPlan {
        let mut day_plan = DayPlan::default();
        day_plan.set_slot(meal, slot);
        let mut plan = WeeklyPlan::new();
        plan.insert(day.to_string(), day_plan);
        plan
    }

    #[test]
    fn test_add_appends_in_order() {
        let plan = WeeklyPlan::new();
        let plan = update_slot(&plan, "Monday", MealType::Lunch, "101", SlotAction::Add);
        let plan = update_slot(&plan, "Monday", MealType::Lunch, "102", SlotAction::Add);

        assert_eq!(
            plan["Monday"].slot_ids(MealType::Lunch),
            vec!["101".to_string(), "102".to_string()]
        );
    }

    #[test]
    fn test_add_is_idempotent() {
        let plan = WeeklyPlan::new();
        let once = update_slot(&plan, "Monday", MealType::Lunch, "101", SlotAction::Add);
        let twice = update_slot(&once, "Monday", MealType::Lunch, "101", SlotAction::Add);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_remove_then_add_round_trip() {
        let plan = WeeklyPlan::new();
        let plan = update_slot(&plan, "Friday", MealType::Dinner, "7", SlotAction::Add);
        let removed = update_slot(&plan, "Friday", MealType::Dinner, "7", SlotAction::Remove);

        assert!(removed["Friday"].slot_ids(MealType::Dinner).is_empty());

        let again = update_slot(&removed, "Friday", MealType::Dinner, "7", SlotAction::Add);
        assert_eq!(again, plan);
    }

    #[test]
    fn test_remove_filters_every_occurrence() {
        // A duplicated id can only come from an older blob, never from add
        let plan = plan_with(
            "Tuesday",
            MealType::Breakfast,
            SlotValue::Many(vec!["9".to_string(), "9".to_string(), "4".to_string()]),
        );

        let next = update_slot(&plan, "Tuesday", MealType::Breakfast, "9", SlotAction::Remove);
        assert_eq!(
            next["Tuesday"].slot_ids(MealType::Breakfast),
            vec!["4".to_string()]
        );
    }

    #[test]
    fn test_remove_materializes_missing_day() {
        let plan = WeeklyPlan::new();
        let next = update_slot(&plan, "Sunday", MealType::Lunch, "1", SlotAction::Remove);

        let day = &next["Sunday"];
        assert_eq!(day.breakfast, Some(SlotValue::empty()));
        assert_eq!(day.lunch, Some(SlotValue::empty()));
        assert_eq!(day.dinner, Some(SlotValue::empty()));
    }

    #[test]
    fn test_add_normalizes_legacy_slot() {
        let plan = plan_with(
            "Wednesday",
            MealType::Dinner,
            SlotValue::Legacy("101".to_string()),
        );

        let next = update_slot(&plan, "Wednesday", MealType::Dinner, "102", SlotAction::Add);
        assert_eq!(
            next["Wednesday"].dinner,
            Some(SlotValue::Many(vec![
                "101".to_string(),
                "102".to_string()
            ]))
        );
    }

    #[test]
    fn test_untouched_slots_keep_stored_shape() {
        let mut day = DayPlan::default();
        day.set_slot(MealType::Lunch, SlotValue::Legacy("77".to_string()));
        let mut plan = WeeklyPlan::new();
        plan.insert("Monday".to_string(), day);

        let next = update_slot(&plan, "Monday", MealType::Breakfast, "5", SlotAction::Add);

        // Lunch was not touched, so the legacy string survives
        assert_eq!(
            next["Monday"].lunch,
            Some(SlotValue::Legacy("77".to_string()))
        );
        assert!(next["Monday"].dinner.is_none());
    }

    #[test]
    fn test_purge_filters_list_slots() {
        let plan = plan_with(
            "Thursday",
            MealType::Lunch,
            SlotValue::Many(vec!["1".to_string(), "2".to_string(), "1".to_string()]),
        );

        let next = purge_recipe(&plan, "1");
        assert_eq!(
            next["Thursday"].lunch,
            Some(SlotValue::Many(vec!["2".to_string()]))
        );
    }

    #[test]
    fn test_purge_downgrades_matching_legacy_slot() {
        let plan = plan_with(
            "Monday",
            MealType::Breakfast,
            SlotValue::Legacy("101".to_string()),
        );

        let next = purge_recipe(&plan, "101");
        assert_eq!(next["Monday"].breakfast, Some(SlotValue::empty()));
    }

    #[test]
    fn test_purge_leaves_other_legacy_slots_alone() {
        let plan = plan_with(
            "Monday",
            MealType::Breakfast,
            SlotValue::Legacy("101".to_string()),
        );

        let next = purge_recipe(&plan, "999");
        assert_eq!(
            next["Monday"].breakfast,
            Some(SlotValue::Legacy("101".to_string()))
        );
    }

    #[test]
    fn test_purge_preserves_untouched_serialization() {
        let json = r#"{"Monday":{"Breakfast":"33","Lunch":["44"]},"Tuesday":{"Dinner":["55","66"]}}"#;
        let plan: WeeklyPlan = serde_json::from_str(json).unwrap();

        let next = purge_recipe(&plan, "55");

        // Monday never referenced 55 and re-serializes byte-identically
        assert_eq!(
            serde_json::to_string(&next["Monday"]).unwrap(),
            r#"{"Breakfast":"33","Lunch":["44"]}"#
        );
        assert_eq!(
            next["Tuesday"].dinner,
            Some(SlotValue::Many(vec!["66".to_string()]))
        );
    }

    #[test]
    fn test_purge_covers_non_calendar_keys() {
        let plan = plan_with(
            "Someday",
            MealType::Dinner,
            SlotValue::Many(vec!["8".to_string()]),
        );

        let next = purge_recipe(&plan, "8");
        assert!(next["Someday"].slot_ids(MealType::Dinner).is_empty());
    }

    #[test]
    fn test_clear_plan_is_empty() {
        assert!(clear_plan().is_empty());
    }
}
