use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Raw Skill Definition (direct from TOML)
// ============================================================================

fn default_multiplier() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSkillDefinition {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_multiplier")]
    pub damage_multiplier: f64,
    /// stat name -> delta applied while the skill is active
    #[serde(default)]
    pub temporary_bonus: BTreeMap<String, i32>,
    /// pool name (stamina, mana, hp) -> amount spent on use
    #[serde(default)]
    pub cost: BTreeMap<String, u32>,
}

// ============================================================================
// Resolved Skill
// ============================================================================

/// A special attack or spell a player can activate in combat
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub description: String,
    pub damage_multiplier: f64,
    pub temporary_bonus: BTreeMap<String, i32>,
    pub cost: BTreeMap<String, u32>,
}

impl Skill {
    /// Negative multipliers are clamped to zero.
    pub fn from_raw(id: &str, raw: &RawSkillDefinition) -> Self {
        Self {
            id: id.to_string(),
            name: raw.name.clone().unwrap_or_else(|| id.replace('_', " ")),
            description: raw.description.clone().unwrap_or_default(),
            damage_multiplier: raw.damage_multiplier.max(0.0),
            temporary_bonus: raw.temporary_bonus.clone(),
            cost: raw.cost.clone(),
        }
    }

    /// Check if `pools` (e.g. current stamina and mana) cover the cost
    pub fn can_afford(&self, pools: &HashMap<String, u32>) -> bool {
        self.cost
            .iter()
            .all(|(pool, &amount)| pools.get(pool).copied().unwrap_or(0) >= amount)
    }

    /// Key under which usage of this skill accrues mastery
    pub fn mastery_key(&self) -> String {
        format!("skill::{}", self.id)
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cost = if self.cost.is_empty() {
            "No cost".to_string()
        } else {
            self.cost
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let bonus = if self.temporary_bonus.is_empty() {
            "No bonus".to_string()
        } else {
            self.temporary_bonus
                .iter()
                .map(|(k, v)| format!("{}: {:+}", k, v))
                .collect::<Vec<_>>()
                .join(", ")
        };

        write!(
            f,
            "{}: {} | Multiplier: {} | Cost: {} | Bonus: {}",
            self.name, self.description, self.damage_multiplier, cost, bonus
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> HashMap<String, RawSkillDefinition> {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_parse_skill() {
        let parsed = parse(
            r#"
            [divine_shield]
            name = "Divine Shield"
            description = "Raises a protective barrier reducing damage."
            damage_multiplier = 1.0
            temporary_bonus = { defense = 5 }
            cost = { mana = 10 }
        "#,
        );

        let skill = Skill::from_raw("divine_shield", &parsed["divine_shield"]);
        assert_eq!(skill.name, "Divine Shield");
        assert_eq!(skill.temporary_bonus.get("defense"), Some(&5));
        assert_eq!(skill.cost.get("mana"), Some(&10));
        assert_eq!(skill.mastery_key(), "skill::divine_shield");
        assert_eq!(
            skill.to_string(),
            "Divine Shield: Raises a protective barrier reducing damage. | Multiplier: 1 | Cost: mana: 10 | Bonus: defense: +5"
        );
    }

    #[test]
    fn test_skill_defaults() {
        let parsed = parse(
            r#"
            [jab]
        "#,
        );

        let skill = Skill::from_raw("jab", &parsed["jab"]);
        assert_eq!(skill.name, "jab");
        assert_eq!(skill.damage_multiplier, 1.0);
        assert!(skill.temporary_bonus.is_empty());
        assert!(skill.cost.is_empty());
        assert!(skill.to_string().ends_with("Cost: No cost | Bonus: No bonus"));
    }

    #[test]
    fn test_can_afford() {
        let parsed = parse(
            r#"
            [berserk_rage]
            damage_multiplier = 2.0
            cost = { stamina = 10 }
        "#,
        );
        let skill = Skill::from_raw("berserk_rage", &parsed["berserk_rage"]);

        let mut pools = HashMap::from([("stamina".to_string(), 9)]);
        assert!(!skill.can_afford(&pools));

        pools.insert("stamina".to_string(), 10);
        assert!(skill.can_afford(&pools));
        assert!(!skill.can_afford(&HashMap::new()));
    }
}
