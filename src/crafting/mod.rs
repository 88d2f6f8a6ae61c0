//! Crafting System
//!
//! Provides recipe definitions and a registry for crafting items.

pub mod definition;
pub mod registry;

pub use definition::{Ingredient, Recipe, RecipeCategory};
pub use registry::CraftingRegistry;
