//! # Ingredient Presets
//!
//! Built-in ingredient vocabulary and reusable ingredient templates for the
//! recipe editor.
//!
//! ## Features
//!
//! - A starter vocabulary of common Chinese home-cooking ingredients for
//!   name autocompletion
//! - Named templates (seasoning base, stir-fry aromatics, simple breakfast,
//!   baking base) that pre-fill whole ingredient groups
//! - [`suggestion_vocabulary`] merges the built-ins with every name already
//!   used in the catalog, deduplicated and collation-sorted

use lazy_static::lazy_static;
use std::collections::HashSet;

use crate::collation::Collation;
use crate::meal_model::{Ingredient, Recipe};

/// Built-in autocompletion vocabulary, grouped roughly by aisle
pub const COMMON_INGREDIENTS: [&str; 52] = [
    // Meat and protein
    "鸡蛋", "猪肉", "牛肉", "鸡胸肉", "鸡腿", "排骨", "培根", "火腿",
    // Vegetables
    "番茄", "土豆", "洋葱", "大蒜", "生姜", "青椒", "胡萝卜", "黄瓜", "茄子",
    "西兰花", "生菜", "菠菜", "白菜", "芹菜", "蘑菇", "金针菇", "豆腐",
    // Staples
    "米饭", "面条", "馒头", "面包", "吐司",
    // Dairy
    "牛奶", "酸奶", "奶酪", "黄油",
    // Seasoning
    "酱油", "生抽", "老抽", "醋", "料酒", "盐", "糖", "蚝油", "豆瓣酱",
    "辣椒酱", "黑胡椒", "淀粉", "食用油",
    // Fruit
    "苹果", "香蕉", "橙子", "草莓", "蓝莓",
];

/// A named group of ingredient rows the editor can insert at once
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientTemplate {
    /// Display name of the template
    pub name: &'static str,
    /// Rows inserted when the template is applied
    pub ingredients: Vec<Ingredient>,
}

lazy_static! {
    /// The built-in templates, in menu order
    pub static ref INGREDIENT_TEMPLATES: Vec<IngredientTemplate> = vec![
        IngredientTemplate {
            name: "基础调味",
            ingredients: vec![
                Ingredient::new("盐", 3.0, "克"),
                Ingredient::new("鸡精", 2.0, "克"),
                Ingredient::new("生抽", 1.0, "勺"),
                Ingredient::new("食用油", 10.0, "ml"),
            ],
        },
        IngredientTemplate {
            name: "家常炒菜佐料",
            ingredients: vec![
                Ingredient::new("葱", 1.0, "根"),
                Ingredient::new("姜", 2.0, "片"),
                Ingredient::new("蒜", 2.0, "瓣"),
                Ingredient::new("干辣椒", 2.0, "个"),
            ],
        },
        IngredientTemplate {
            name: "简单早餐",
            ingredients: vec![
                Ingredient::new("鸡蛋", 1.0, "个"),
                Ingredient::new("牛奶", 200.0, "ml"),
                Ingredient::new("吐司", 2.0, "片"),
            ],
        },
        IngredientTemplate {
            name: "烘焙基础",
            ingredients: vec![
                Ingredient::new("面粉", 100.0, "克"),
                Ingredient::new("鸡蛋", 2.0, "个"),
                Ingredient::new("白糖", 30.0, "克"),
                Ingredient::new("黄油", 20.0, "克"),
            ],
        },
    ];
}

/// Look a template up by its display name
pub fn find_template(name: &str) -> Option<&'static IngredientTemplate> {
    INGREDIENT_TEMPLATES
        .iter()
        .find(|template| template.name == name)
}

/// Template display names in menu order
pub fn template_names() -> Vec<&'static str> {
    INGREDIENT_TEMPLATES
        .iter()
        .map(|template| template.name)
        .collect()
}

/// The autocompletion vocabulary for a catalog: built-ins merged with every
/// ingredient name already used in a recipe, trimmed, deduplicated and
/// sorted under `collation`.
pub fn suggestion_vocabulary(recipes: &[Recipe], collation: &dyn Collation) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut vocabulary: Vec<String> = Vec::new();

    for name in COMMON_INGREDIENTS {
        if seen.insert(name.to_string()) {
            vocabulary.push(name.to_string());
        }
    }
    for recipe in recipes {
        for ingredient in &recipe.ingredients {
            let name = ingredient.name.trim().to_string();
            if seen.insert(name.clone()) {
                vocabulary.push(name);
            }
        }
    }

    vocabulary.sort_by(|a, b| collation.compare(a, b));
    vocabulary
}
