//! Crafting Recipe Definitions
//!
//! Defines the data structures for crafting recipes, including TOML
//! deserialization (Raw*) and resolved versions with validated counts.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};

/// Recipe categories for grouping in the crafting menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecipeCategory {
    #[default]
    Crafting,
    WeaponUpgrade,
}

impl RecipeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeCategory::Crafting => "crafting",
            RecipeCategory::WeaponUpgrade => "weapon_upgrade",
        }
    }
}

// ============================================================================
// Raw TOML Structures
// ============================================================================

/// Raw recipe definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecipeDefinition {
    pub result: String,
    #[serde(default)]
    pub category: RecipeCategory,
    /// resource id -> required count
    #[serde(default)]
    pub ingredients: BTreeMap<String, i64>,
}

// ============================================================================
// Resolved Structures
// ============================================================================

/// Ingredient in a resolved recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    pub resource_id: String,
    pub count: u32,
}

/// A fully resolved recipe definition
#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    pub id: String,
    pub category: RecipeCategory,
    /// Sorted by resource id.
    pub ingredients: Vec<Ingredient>,
    pub result: String,
}

impl Recipe {
    /// Create a resolved Recipe from raw TOML data.
    ///
    /// Every ingredient count must be positive.
    pub fn from_raw(id: &str, raw: &RawRecipeDefinition) -> DataResult<Self> {
        let ingredients = raw
            .ingredients
            .iter()
            .map(|(resource_id, &count)| match u32::try_from(count) {
                Ok(count) if count > 0 => Ok(Ingredient {
                    resource_id: resource_id.clone(),
                    count,
                }),
                _ => Err(DataError::InvalidIngredientCount {
                    recipe: id.to_string(),
                    resource: resource_id.clone(),
                }),
            })
            .collect::<DataResult<Vec<_>>>()?;

        Ok(Self {
            id: id.to_string(),
            category: raw.category,
            ingredients,
            result: raw.result.clone(),
        })
    }

    /// Required count of one resource, if the recipe uses it
    pub fn required(&self, resource_id: &str) -> Option<u32> {
        self.ingredients
            .iter()
            .find(|i| i.resource_id == resource_id)
            .map(|i| i.count)
    }

    /// Check whether `stock` (resource id -> quantity) covers every ingredient
    pub fn can_craft(&self, stock: &HashMap<String, u32>) -> bool {
        self.ingredients
            .iter()
            .all(|i| stock.get(&i.resource_id).copied().unwrap_or(0) >= i.count)
    }

    /// Consume the ingredients from `stock`.
    ///
    /// Returns false and leaves `stock` untouched when anything is missing.
    /// Exhausted entries are removed.
    pub fn craft(&self, stock: &mut HashMap<String, u32>) -> bool {
        if !self.can_craft(stock) {
            return false;
        }

        for ingredient in &self.ingredients {
            if let Some(quantity) = stock.get_mut(&ingredient.resource_id) {
                *quantity -= ingredient.count;
                if *quantity == 0 {
                    stock.remove(&ingredient.resource_id);
                }
            }
        }

        true
    }
}
