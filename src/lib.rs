//! Data-driven RPG subsystems: resource, recipe and skill catalogs, the
//! player inventory, skill mastery and the status effect engine.

pub mod combatant;
pub mod config;
pub mod crafting;
pub mod data;
pub mod error;
pub mod game_data;
pub mod inventory;
pub mod logging;
pub mod mastery;
pub mod player;
pub mod record;
pub mod skills;
pub mod status;

pub use combatant::{Combatant, Stats};
pub use config::Config;
pub use crafting::{CraftingRegistry, Recipe, RecipeCategory};
pub use data::{Rarity, Resource, ResourceRegistry, ResourceType};
pub use error::{DataError, DataResult};
pub use game_data::GameData;
pub use inventory::{Inventory, Item, ItemKind};
pub use mastery::Mastery;
pub use player::Player;
pub use record::Record;
pub use skills::{Skill, SkillRegistry};
pub use status::{EffectEvent, EffectKind, EffectType, StatusEffect};
