//! Crafting Recipe Registry
//!
//! Loads and caches recipe definitions from TOML files.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, warn};

use super::definition::{RawRecipeDefinition, Recipe, RecipeCategory};
use crate::data::loader::{parse_table, read_table_dir};
use crate::error::DataResult;

/// Registry for all recipe definitions
pub struct CraftingRegistry {
    recipes: HashMap<String, Recipe>,
}

impl CraftingRegistry {
    pub fn new() -> Self {
        Self {
            recipes: HashMap::new(),
        }
    }

    /// Load all recipe definitions from `<data_dir>/recipes`
    pub fn load_from_directory(&mut self, data_dir: &Path) -> DataResult<()> {
        for (origin, table) in read_table_dir::<RawRecipeDefinition>(&data_dir.join("recipes"))? {
            self.insert_table(&origin, table)?;
        }

        info!("Loaded {} recipe definitions", self.recipes.len());

        Ok(())
    }

    /// Load recipe definitions from an in-memory TOML document
    pub fn load_from_str(&mut self, origin: &str, content: &str) -> DataResult<()> {
        let table = parse_table::<RawRecipeDefinition>(origin, content)?;
        self.insert_table(origin, table)
    }

    fn insert_table(&mut self, origin: &str, table: HashMap<String, RawRecipeDefinition>) -> DataResult<()> {
        for (id, raw) in table {
            if self.recipes.contains_key(&id) {
                warn!("Duplicate recipe ID '{}' in {}, overwriting", id, origin);
            }
            let recipe = Recipe::from_raw(&id, &raw)?;
            debug!(
                "Loaded recipe: {} - {} ingredients -> {}",
                id,
                recipe.ingredients.len(),
                recipe.result
            );
            self.recipes.insert(id, recipe);
        }
        Ok(())
    }

    /// Get a recipe definition by ID
    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    /// Get all recipe IDs
    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.recipes.keys()
    }

    /// Get all recipes
    pub fn all(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }

    /// Get recipes by category
    pub fn by_category(&self, category: RecipeCategory) -> Vec<&Recipe> {
        self.recipes
            .values()
            .filter(|r| r.category == category)
            .collect()
    }

    /// Check if a recipe exists
    pub fn contains(&self, id: &str) -> bool {
        self.recipes.contains_key(id)
    }

    /// Get the number of loaded recipes
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl Default for CraftingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_load_recipes_from_directory() {
        let temp_dir = TempDir::new().unwrap();
        let recipes_dir = temp_dir.path().join("recipes");
        std::fs::create_dir(&recipes_dir).unwrap();

        let toml_content = r#"
[weapon_upgrade_1]
category = "weapon_upgrade"
result = "Upgrade +1"
ingredients = { smithing_stone = 1 }

[iron_sword]
result = "Iron Sword"
ingredients = { iron_ingot = 3, wood = 1 }
"#;

        let mut file = std::fs::File::create(recipes_dir.join("test.toml")).unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let mut registry = CraftingRegistry::new();
        registry.load_from_directory(temp_dir.path()).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("iron_sword"));
        assert_eq!(registry.by_category(RecipeCategory::WeaponUpgrade).len(), 1);

        let recipe = registry.get("iron_sword").unwrap();
        assert_eq!(recipe.result, "Iron Sword");
        assert_eq!(recipe.required("iron_ingot"), Some(3));
    }

    #[test]
    fn test_get_missing_is_none() {
        let registry = CraftingRegistry::new();
        assert!(registry.get("iron_sword").is_none());
        assert!(registry.is_empty());
    }
}
