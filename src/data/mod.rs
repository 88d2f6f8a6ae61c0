pub mod loader;
pub mod resource_def;
pub mod resource_registry;

pub use resource_def::{Rarity, Resource, ResourceType};
pub use resource_registry::ResourceRegistry;
