//! All static game catalogs, loaded once and then read-only.

use std::path::Path;
use std::sync::OnceLock;

use tracing::info;

use crate::crafting::CraftingRegistry;
use crate::data::ResourceRegistry;
use crate::error::{DataError, DataResult};
use crate::skills::SkillRegistry;

const BUILTIN_RESOURCES: &str = include_str!("../data/resources/materials.toml");
const BUILTIN_CRAFTING: &str = include_str!("../data/recipes/crafting.toml");
const BUILTIN_UPGRADES: &str = include_str!("../data/recipes/weapon_upgrades.toml");
const BUILTIN_SKILLS: &str = include_str!("../data/skills/skills.toml");

static GLOBAL: OnceLock<GameData> = OnceLock::new();

/// Resource, recipe and skill catalogs
#[derive(Default)]
pub struct GameData {
    pub resources: ResourceRegistry,
    pub recipes: CraftingRegistry,
    pub skills: SkillRegistry,
}

impl GameData {
    /// Catalogs compiled into the binary
    pub fn builtin() -> DataResult<Self> {
        let mut data = Self::default();
        data.resources.load_from_str("builtin resources", BUILTIN_RESOURCES)?;
        data.recipes.load_from_str("builtin recipes", BUILTIN_CRAFTING)?;
        data.recipes.load_from_str("builtin weapon upgrades", BUILTIN_UPGRADES)?;
        data.skills.load_from_str("builtin skills", BUILTIN_SKILLS)?;
        data.validate()?;
        Ok(data)
    }

    /// Load every catalog from `data_dir` and validate cross references
    pub fn load_from_directory(data_dir: &Path) -> DataResult<Self> {
        let mut data = Self::default();
        data.resources.load_from_directory(data_dir)?;
        data.recipes.load_from_directory(data_dir)?;
        data.skills.load_from_directory(data_dir)?;
        data.validate()?;

        info!(
            "Game data loaded from {:?}: {} resources, {} recipes, {} skills",
            data_dir,
            data.resources.len(),
            data.recipes.len(),
            data.skills.len()
        );

        Ok(data)
    }

    /// Check that every recipe ingredient names a known resource
    pub fn validate(&self) -> DataResult<()> {
        let mut recipes: Vec<_> = self.recipes.all().collect();
        recipes.sort_by(|a, b| a.id.cmp(&b.id));

        for recipe in recipes {
            if let Some(missing) = recipe
                .ingredients
                .iter()
                .find(|i| !self.resources.contains(&i.resource_id))
            {
                return Err(DataError::UnknownIngredient {
                    recipe: recipe.id.clone(),
                    resource: missing.resource_id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Install `data` as the process-wide catalog.
    ///
    /// Only the first call wins; later calls hand their data back.
    pub fn install(data: GameData) -> Result<&'static GameData, GameData> {
        let mut pending = Some(data);
        let installed = GLOBAL.get_or_init(|| pending.take().unwrap_or_default());
        match pending {
            Some(rejected) => Err(rejected),
            None => Ok(installed),
        }
    }

    /// Process-wide catalog, installing the built-in data if nothing was
    /// installed yet. Invalid built-in data is reported and nothing is
    /// installed, so a later [`GameData::install`] can still succeed.
    pub fn global() -> DataResult<&'static GameData> {
        if let Some(data) = GLOBAL.get() {
            return Ok(data);
        }
        let data = Self::builtin()?;
        Ok(GLOBAL.get_or_init(|| data))
    }
}
