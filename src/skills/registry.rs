use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use super::definition::{RawSkillDefinition, Skill};
use crate::data::loader::{parse_table, read_table_dir};
use crate::error::DataResult;

/// Registry for all skill definitions
pub struct SkillRegistry {
    skills: HashMap<String, Skill>,
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self {
            skills: HashMap::new(),
        }
    }

    /// Load all skill definitions from `<data_dir>/skills`
    pub fn load_from_directory(&mut self, data_dir: &Path) -> DataResult<()> {
        for (origin, table) in read_table_dir::<RawSkillDefinition>(&data_dir.join("skills"))? {
            self.insert_table(&origin, table);
        }

        info!("Loaded {} skill definitions", self.skills.len());

        Ok(())
    }

    /// Load skill definitions from an in-memory TOML document
    pub fn load_from_str(&mut self, origin: &str, content: &str) -> DataResult<()> {
        let table = parse_table::<RawSkillDefinition>(origin, content)?;
        self.insert_table(origin, table);
        Ok(())
    }

    fn insert_table(&mut self, origin: &str, table: HashMap<String, RawSkillDefinition>) {
        for (id, raw) in table {
            if self.skills.contains_key(&id) {
                warn!("Duplicate skill ID '{}' in {}, overwriting", id, origin);
            }
            let skill = Skill::from_raw(&id, &raw);
            self.skills.insert(id, skill);
        }
    }

    /// Get a skill definition by ID
    pub fn get(&self, id: &str) -> Option<&Skill> {
        self.skills.get(id)
    }

    /// Find a skill by its display name
    pub fn find_by_name(&self, name: &str) -> Option<&Skill> {
        self.skills.values().find(|s| s.name == name)
    }

    /// Get all skill IDs
    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.skills.keys()
    }

    /// Get all skills
    pub fn all(&self) -> impl Iterator<Item = &Skill> {
        self.skills.values()
    }

    /// Check if a skill exists
    pub fn contains(&self, id: &str) -> bool {
        self.skills.contains_key(id)
    }

    /// Get the number of loaded skills
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_skills_from_directory() {
        let temp_dir = TempDir::new().unwrap();
        let skills_dir = temp_dir.path().join("skills");
        std::fs::create_dir(&skills_dir).unwrap();

        std::fs::write(
            skills_dir.join("warrior.toml"),
            r#"
[shield_bash]
name = "Shield Bash"
description = "Bashes the enemy with your shield."
temporary_bonus = { attack = 5 }
cost = { stamina = 5 }
"#,
        )
        .unwrap();
        std::fs::write(
            skills_dir.join("mage.toml"),
            r#"
[arcane_blast]
name = "Arcane Blast"
damage_multiplier = 2.5
cost = { mana = 15 }
"#,
        )
        .unwrap();

        let mut registry = SkillRegistry::new();
        registry.load_from_directory(temp_dir.path()).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("arcane_blast").unwrap().damage_multiplier, 2.5);
        assert_eq!(registry.find_by_name("Shield Bash").unwrap().id, "shield_bash");
        assert!(registry.get("fireball").is_none());
    }
}
