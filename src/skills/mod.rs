//! Skill catalog: special attacks with damage multipliers, costs and
//! temporary stat bonuses.

pub mod definition;
pub mod registry;

pub use definition::Skill;
pub use registry::SkillRegistry;
