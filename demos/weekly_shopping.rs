//! End-to-end walk through a week of meal planning: build a small catalog,
//! fill some slots, delete a recipe, and print the derived shopping list.
//!
//! Run with `cargo run --example weekly_shopping`. Set `MEALMASTER_STORE`
//! to choose where the state file lives.

use anyhow::Result;
use log::info;
use std::collections::HashSet;
use std::env;

use mealmaster::bulk_import::parse_bulk_text;
use mealmaster::collation::PinyinCollation;
use mealmaster::ingredient_presets::find_template;
use mealmaster::list_export::render_clipboard_text;
use mealmaster::local_store::{load_plan, load_recipes, save_plan, save_recipes, FileStore};
use mealmaster::meal_model::{identity_key, MealType, Recipe, WeeklyPlan};
use mealmaster::plan_mutation::{update_slot, SlotAction};
use mealmaster::recipe_catalog::{add_recipe, merge_ingredient_rows, next_recipe_id, remove_recipe};
use mealmaster::shopping_list::build_shopping_list;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let store_path =
        env::var("MEALMASTER_STORE").unwrap_or_else(|_| "mealmaster.json".to_string());
    info!("Using store file: {}", store_path);

    let mut store = FileStore::open(&store_path)?;
    let mut recipes = load_recipes(&store);
    let mut plan = load_plan(&store);

    // Build a small catalog: one recipe from pasted text, one from a template
    let omelette_id = next_recipe_id();
    let pasted = parse_bulk_text("鸡蛋\t2\t个\n番茄 1 个\n食用油 5 ml")?;
    add_recipe(
        &mut recipes,
        Recipe::new(&omelette_id, "番茄炒蛋")
            .with_instructions("打蛋，炒番茄，混合翻炒。")
            .with_ingredients(pasted),
    )?;

    let breakfast_id = next_recipe_id();
    let template = find_template("简单早餐").expect("built-in template");
    add_recipe(
        &mut recipes,
        Recipe::new(&breakfast_id, "牛奶吐司早餐")
            .with_ingredients(merge_ingredient_rows(&[], &template.ingredients)),
    )?;

    // Fill a few slots across the week
    plan = update_slot(&plan, "Monday", MealType::Breakfast, &breakfast_id, SlotAction::Add);
    plan = update_slot(&plan, "Monday", MealType::Dinner, &omelette_id, SlotAction::Add);
    plan = update_slot(&plan, "Wednesday", MealType::Dinner, &omelette_id, SlotAction::Add);
    plan = update_slot(&plan, "Sunday", MealType::Breakfast, &breakfast_id, SlotAction::Add);

    let zh = PinyinCollation::new()?;
    println!("本周购物清单:");
    for item in build_shopping_list(&recipes, &plan, &zh) {
        println!("  {} {} {}", item.name, item.quantity, item.unit);
    }

    // Delete the breakfast recipe; its plan references go with it
    let (removed, purged) = remove_recipe(&mut recipes, &plan, &breakfast_id);
    info!("Removed breakfast recipe: {}", removed);
    plan = purged;

    let list = build_shopping_list(&recipes, &plan, &zh);
    let mut checked = HashSet::new();
    checked.insert(identity_key("鸡蛋", "个"));

    println!();
    println!("{}", render_clipboard_text(&list, &checked));

    save_recipes(&mut store, &recipes)?;
    save_plan(&mut store, &plan)?;
    info!("Saved {} recipe(s) and the weekly plan", recipes.len());

    Ok(())
}
