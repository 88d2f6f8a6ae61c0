use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Resource Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Ore,
    Plant,
    Magic,
    Food,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Ore => "ore",
            ResourceType::Plant => "plant",
            ResourceType::Magic => "magic",
            ResourceType::Food => "food",
        }
    }
}

// ============================================================================
// Rarity
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Divine,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
            Rarity::Divine => "divine",
        }
    }
}

// ============================================================================
// Raw Resource Definition (direct from TOML)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RawResourceDefinition {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[serde(default)]
    pub rarity: Rarity,
    pub description: Option<String>,
    #[serde(default)]
    pub value: u32,
}

// ============================================================================
// Resolved Resource
// ============================================================================

/// An immutable crafting material, built on demand from its catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub resource_type: ResourceType,
    pub rarity: Rarity,
    pub description: String,
    pub value: u32,
}

impl Resource {
    pub fn from_raw(id: &str, raw: &RawResourceDefinition) -> Self {
        Self {
            id: id.to_string(),
            name: raw.name.clone().unwrap_or_else(|| id.replace('_', " ")),
            resource_type: raw.resource_type,
            rarity: raw.rarity,
            description: raw.description.clone().unwrap_or_default(),
            value: raw.value,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {}", self.name, self.rarity.as_str(), self.description)
    }
}
