//! # Recipe Catalog
//!
//! Operations on the recipe collection: validating and saving drafts,
//! generating ids, merging ingredient rows in the editor, and removing a
//! recipe together with its plan references.
//!
//! ## Features
//!
//! - Draft validation on save: a recipe needs a non-blank name and at least
//!   one ingredient row with a non-blank name; blank rows are dropped, not
//!   rejected
//! - Removal and plan purge happen in one call, so no caller ever holds a
//!   catalog without the matching plan cleanup
//! - Millisecond-timestamp ids, the scheme all stored recipes already use

use chrono::Utc;
use log::{debug, info};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::meal_model::{Ingredient, Recipe, WeeklyPlan};
use crate::plan_mutation::purge_recipe;

/// Errors reported when saving a recipe draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The recipe name is empty or whitespace
    EmptyName,
    /// No ingredient row with a usable name remained after validation
    NoUsableIngredients,
    /// A recipe with this id is already in the catalog
    DuplicateId(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::EmptyName => write!(f, "食谱名称不能为空"),
            CatalogError::NoUsableIngredients => write!(f, "请至少添加一种食材"),
            CatalogError::DuplicateId(id) => write!(f, "食谱 id 已存在: {}", id),
        }
    }
}

impl std::error::Error for CatalogError {}

static LAST_ISSUED_ID: AtomicI64 = AtomicI64::new(0);

/// Generate a fresh recipe id from the current wall clock, in milliseconds
/// since the epoch. Matches the id scheme of every previously stored recipe.
/// Two calls within the same millisecond get consecutive values, so ids
/// issued by one process never collide.
pub fn next_recipe_id() -> String {
    let now = Utc::now().timestamp_millis();
    let last = LAST_ISSUED_ID
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or(0);
    now.max(last + 1).to_string()
}

/// Validate a recipe draft and drop unusable ingredient rows.
///
/// Rows whose name is blank are editor placeholders and are filtered out;
/// negative quantities are clamped to zero. The draft is rejected when its
/// name is blank or when no usable ingredient row remains. Kept values are
/// stored as entered, trimming stays a display concern.
pub fn normalize_recipe(recipe: Recipe) -> Result<Recipe, CatalogError> {
    if recipe.name.trim().is_empty() {
        return Err(CatalogError::EmptyName);
    }

    let Recipe {
        id,
        name,
        instructions,
        ingredients,
    } = recipe;

    let usable: Vec<Ingredient> = ingredients
        .into_iter()
        .filter(|ingredient| !ingredient.name.trim().is_empty())
        .map(|mut ingredient| {
            if ingredient.quantity < 0.0 {
                debug!(
                    "Clamping negative quantity {} for '{}'",
                    ingredient.quantity, ingredient.name
                );
                ingredient.quantity = 0.0;
            }
            ingredient
        })
        .collect();

    if usable.is_empty() {
        return Err(CatalogError::NoUsableIngredients);
    }

    Ok(Recipe {
        id,
        name,
        instructions,
        ingredients: usable,
    })
}

/// Validate a draft and append it to the catalog
pub fn add_recipe(catalog: &mut Vec<Recipe>, recipe: Recipe) -> Result<(), CatalogError> {
    let recipe = normalize_recipe(recipe)?;

    if catalog.iter().any(|existing| existing.id == recipe.id) {
        return Err(CatalogError::DuplicateId(recipe.id));
    }

    info!("Adding recipe {} ('{}')", recipe.id, recipe.name);
    catalog.push(recipe);
    Ok(())
}

/// Validate a draft and replace the stored recipe with the same id.
///
/// Returns `Ok(false)` when no recipe with that id exists; the catalog is
/// left unchanged in that case.
pub fn update_recipe(catalog: &mut [Recipe], recipe: Recipe) -> Result<bool, CatalogError> {
    let recipe = normalize_recipe(recipe)?;

    match catalog.iter_mut().find(|existing| existing.id == recipe.id) {
        Some(existing) => {
            info!("Updating recipe {} ('{}')", recipe.id, recipe.name);
            *existing = recipe;
            Ok(true)
        }
        None => {
            info!("No recipe with id {} to update", recipe.id);
            Ok(false)
        }
    }
}

/// Remove a recipe and purge its plan references in one step.
///
/// Returns whether the recipe was present, and the purged plan. Catalog and
/// plan change together here so a reference can never outlive its recipe in
/// anything the caller persists.
pub fn remove_recipe(
    catalog: &mut Vec<Recipe>,
    plan: &WeeklyPlan,
    recipe_id: &str,
) -> (bool, WeeklyPlan) {
    let before = catalog.len();
    catalog.retain(|recipe| recipe.id != recipe_id);
    let removed = catalog.len() < before;

    if removed {
        info!("Removed recipe {} from catalog", recipe_id);
    } else {
        info!("No recipe with id {} to remove", recipe_id);
    }

    (removed, purge_recipe(plan, recipe_id))
}

/// Look a recipe up by id
pub fn find_recipe<'a>(catalog: &'a [Recipe], recipe_id: &str) -> Option<&'a Recipe> {
    catalog.iter().find(|recipe| recipe.id == recipe_id)
}

/// Merge incoming ingredient rows (from bulk import or a template) into the
/// editor's current rows.
///
/// A draft that still holds nothing but the single blank placeholder row is
/// replaced outright; any other draft gets the incoming rows appended.
///
/// # Examples
///
/// ```rust
/// use mealmaster::meal_model::Ingredient;
/// use mealmaster::recipe_catalog::merge_ingredient_rows;
///
/// let placeholder = vec![Ingredient::new("", 1.0, "个")];
/// let incoming = vec![Ingredient::new("盐", 3.0, "克")];
///
/// let merged = merge_ingredient_rows(&placeholder, &incoming);
/// assert_eq!(merged, incoming);
/// ```
pub fn merge_ingredient_rows(current: &[Ingredient], incoming: &[Ingredient]) -> Vec<Ingredient> {
    let mut rows: Vec<Ingredient> =
        if current.len() == 1 && current[0].name.trim().is_empty() {
            Vec::new()
        } else {
            current.to_vec()
        };

    rows.extend_from_slice(incoming);
    rows
}
