//! # Local Store
//!
//! Persistence boundary for the two app blobs: the recipe catalog and the
//! weekly plan. A store is a flat key-value surface holding JSON strings;
//! every save replaces the whole value, there are no partial writes.
//!
//! ## Features
//!
//! - [`BlobStore`] trait with [`MemoryStore`] for tests and [`FileStore`]
//!   backed by a single JSON object file
//! - Typed helpers over the two fixed keys, defaulting to an empty catalog
//!   and an empty plan when a key is absent
//! - Malformed stored JSON is logged and replaced by the default rather
//!   than surfaced to the core

use anyhow::{Context, Result};
use log::{info, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::meal_model::{Recipe, WeeklyPlan};

/// Store key holding the recipe catalog JSON
pub const RECIPES_KEY: &str = "mealmaster_recipes";

/// Store key holding the weekly plan JSON
pub const PLAN_KEY: &str = "mealmaster_plan";

/// A flat key-value store of JSON string blobs.
///
/// Writes are whole-value replacements; a reader never observes a partially
/// updated value under a key.
pub trait BlobStore {
    /// Read the blob stored under `key`, if any
    fn load(&self, key: &str) -> Option<String>;

    /// Replace the blob stored under `key`
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, used by tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: BTreeMap<String, String>,
}

impl MemoryStore {
    /// An empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.blobs.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: one JSON object mapping keys to blob strings.
///
/// The file is read once on open and rewritten whole on every save, so the
/// on-disk value always reflects the last completed save.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    blobs: BTreeMap<String, String>,
}

impl FileStore {
    /// Open a store file, creating an empty store when the file does not
    /// exist yet. An unreadable JSON object is an error; a missing file
    /// is not.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let blobs = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read store file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse store file {}", path.display()))?
        } else {
            info!("Store file {} not found, starting empty", path.display());
            BTreeMap::new()
        };

        Ok(Self { path, blobs })
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BlobStore for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        self.blobs.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.blobs.insert(key.to_string(), value.to_string());

        let contents = serde_json::to_string_pretty(&self.blobs)
            .context("Failed to serialize store contents")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write store file {}", self.path.display()))?;

        info!("Saved key '{}' to {}", key, self.path.display());
        Ok(())
    }
}

/// Load the recipe catalog, defaulting to empty when the key is absent or
/// the stored blob does not parse
pub fn load_recipes(store: &dyn BlobStore) -> Vec<Recipe> {
    load_or_default(store, RECIPES_KEY)
}

/// Persist the recipe catalog
pub fn save_recipes(store: &mut dyn BlobStore, recipes: &[Recipe]) -> Result<()> {
    let blob = serde_json::to_string(recipes).context("Failed to serialize recipe catalog")?;
    store.save(RECIPES_KEY, &blob)
}

/// Load the weekly plan, defaulting to empty when the key is absent or the
/// stored blob does not parse
pub fn load_plan(store: &dyn BlobStore) -> WeeklyPlan {
    load_or_default(store, PLAN_KEY)
}

/// Persist the weekly plan
pub fn save_plan(store: &mut dyn BlobStore, plan: &WeeklyPlan) -> Result<()> {
    let blob = serde_json::to_string(plan).context("Failed to serialize weekly plan")?;
    store.save(PLAN_KEY, &blob)
}

fn load_or_default<T>(store: &dyn BlobStore, key: &str) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    let blob = match store.load(key) {
        Some(blob) => blob,
        None => return T::default(),
    };

    match serde_json::from_str(&blob) {
        Ok(value) => value,
        Err(err) => {
            warn!("Stored blob under '{}' is malformed ({}), using default", key, err);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meal_model::{DayPlan, Ingredient, MealType, SlotValue};

    fn sample_catalog() -> Vec<Recipe> {
        vec![Recipe::new("101", "煎蛋")
            .with_ingredient(Ingredient::new("鸡蛋", 2.0, "个"))]
    }

    #[test]
    fn test_memory_store_round_trip() -> Result<()> {
        let mut store = MemoryStore::new();

        assert!(load_recipes(&store).is_empty());
        assert!(load_plan(&store).is_empty());

        save_recipes(&mut store, &sample_catalog())?;
        let loaded = load_recipes(&store);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "煎蛋");
        Ok(())
    }

    #[test]
    fn test_file_store_round_trip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("mealmaster.json");

        let mut store = FileStore::open(&path)?;
        save_recipes(&mut store, &sample_catalog())?;

        let mut plan = WeeklyPlan::new();
        let mut day = DayPlan::with_empty_slots();
        day.set_slot(MealType::Dinner, SlotValue::Many(vec!["101".to_string()]));
        plan.insert("Monday".to_string(), day);
        save_plan(&mut store, &plan)?;

        // A fresh store sees what the first one wrote
        let reopened = FileStore::open(&path)?;
        assert_eq!(load_recipes(&reopened), sample_catalog());
        assert_eq!(load_plan(&reopened), plan);
        Ok(())
    }

    #[test]
    fn test_missing_file_opens_empty() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = FileStore::open(dir.path().join("absent.json"))?;

        assert!(store.load(RECIPES_KEY).is_none());
        assert!(load_recipes(&store).is_empty());
        Ok(())
    }

    #[test]
    fn test_legacy_plan_blob_loads() -> Result<()> {
        // Plan blob written by an older version: bare-string slot values
        let mut store = MemoryStore::new();
        store.save(PLAN_KEY, r#"{"Monday":{"Breakfast":"101"}}"#)?;

        let plan = load_plan(&store);
        assert_eq!(
            plan["Monday"].slot_ids(MealType::Breakfast),
            vec!["101".to_string()]
        );
        Ok(())
    }

    #[test]
    fn test_malformed_blob_falls_back_to_default() -> Result<()> {
        let mut store = MemoryStore::new();
        store.save(RECIPES_KEY, "not json at all")?;
        store.save(PLAN_KEY, "[1,2,3]")?;

        assert!(load_recipes(&store).is_empty());
        assert!(load_plan(&store).is_empty());
        Ok(())
    }

    #[test]
    fn test_save_replaces_whole_value() -> Result<()> {
        let mut store = MemoryStore::new();
        save_recipes(&mut store, &sample_catalog())?;
        save_recipes(&mut store, &[])?;

        assert_eq!(store.load(RECIPES_KEY), Some("[]".to_string()));
        Ok(())
    }
}
