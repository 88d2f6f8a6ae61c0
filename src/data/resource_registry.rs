use std::collections::HashMap;
use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{info, warn};

use super::loader::{parse_table, read_table_dir};
use super::resource_def::{RawResourceDefinition, Resource, ResourceType};
use crate::error::{DataError, DataResult};

/// Registry for all crafting resources
pub struct ResourceRegistry {
    resources: HashMap<String, Resource>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self {
            resources: HashMap::new(),
        }
    }

    /// Load all resource definitions from `<data_dir>/resources`
    pub fn load_from_directory(&mut self, data_dir: &Path) -> DataResult<()> {
        for (origin, table) in read_table_dir::<RawResourceDefinition>(&data_dir.join("resources"))? {
            self.insert_table(&origin, table);
        }

        info!("Loaded {} resource definitions", self.resources.len());

        Ok(())
    }

    /// Load resource definitions from an in-memory TOML document
    pub fn load_from_str(&mut self, origin: &str, content: &str) -> DataResult<()> {
        let table = parse_table::<RawResourceDefinition>(origin, content)?;
        self.insert_table(origin, table);
        Ok(())
    }

    fn insert_table(&mut self, origin: &str, table: HashMap<String, RawResourceDefinition>) {
        for (id, raw) in table {
            if self.resources.contains_key(&id) {
                warn!("Duplicate resource ID '{}' in {}, overwriting", id, origin);
            }
            let resource = Resource::from_raw(&id, &raw);
            self.resources.insert(id, resource);
        }
    }

    /// Get a resource by ID
    pub fn get(&self, id: &str) -> Option<&Resource> {
        self.resources.get(id)
    }

    /// Get all resource IDs
    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.resources.keys()
    }

    /// Get all resources
    pub fn all(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    /// Get resources of one type
    pub fn by_type(&self, resource_type: ResourceType) -> Vec<&Resource> {
        self.resources
            .values()
            .filter(|r| r.resource_type == resource_type)
            .collect()
    }

    /// Pick a resource uniformly at random, optionally restricted to one type.
    pub fn random(&self, filter: Option<ResourceType>) -> DataResult<&Resource> {
        self.random_with(filter, &mut rand::thread_rng())
    }

    /// Same as [`ResourceRegistry::random`] with a caller-supplied RNG.
    pub fn random_with<R: Rng + ?Sized>(
        &self,
        filter: Option<ResourceType>,
        rng: &mut R,
    ) -> DataResult<&Resource> {
        let mut pool: Vec<&Resource> = match filter {
            Some(resource_type) => self.by_type(resource_type),
            None => self.resources.values().collect(),
        };
        // Stable pool order keeps seeded picks reproducible.
        pool.sort_by(|a, b| a.id.cmp(&b.id));

        pool.choose(rng).copied().ok_or(DataError::EmptyPool { filter })
    }

    /// Check if a resource exists
    pub fn contains(&self, id: &str) -> bool {
        self.resources.contains_key(id)
    }

    /// Get the number of loaded resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
