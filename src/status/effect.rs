use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::combatant::Stats;

/// Broad category of an effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectType {
    Buff,
    Debuff,
    Control,
}

impl EffectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectType::Buff => "buff",
            EffectType::Debuff => "debuff",
            EffectType::Control => "control",
        }
    }
}

/// Every status effect the game knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Poison,
    Burn,
    Freeze,
    FireResistance,
    AttackBoost,
    DefenseBoost,
    LuckBoost,
    Healing,
}

impl EffectKind {
    pub const ALL: [EffectKind; 8] = [
        EffectKind::Poison,
        EffectKind::Burn,
        EffectKind::Freeze,
        EffectKind::FireResistance,
        EffectKind::AttackBoost,
        EffectKind::DefenseBoost,
        EffectKind::LuckBoost,
        EffectKind::Healing,
    ];

    /// Display name, also the key used in save records
    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::Poison => "Poison",
            EffectKind::Burn => "Burn",
            EffectKind::Freeze => "Freeze",
            EffectKind::FireResistance => "Fire Resistance",
            EffectKind::AttackBoost => "Attack Boost",
            EffectKind::DefenseBoost => "Defense Boost",
            EffectKind::LuckBoost => "Luck Boost",
            EffectKind::Healing => "Healing",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Stat raised by the boost variants
    fn boosted_stat(&self) -> Option<&'static str> {
        match self {
            EffectKind::AttackBoost => Some("attack"),
            EffectKind::DefenseBoost => Some("defense"),
            EffectKind::LuckBoost => Some("luck"),
            _ => None,
        }
    }
}

/// Something observable that happened to a combatant because of an effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectEvent {
    Damaged { target: String, effect: EffectKind, amount: u32 },
    Healed { target: String, amount: i32 },
    StatChanged { target: String, stat: String, delta: i32 },
    ResistanceChanged { target: String, element: String, delta: i32 },
    Immobilized { target: String },
    Released { target: String },
}

/// A timed modifier attached to a combatant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEffect {
    pub kind: EffectKind,
    /// Turns left. The effect is expired once this reaches zero or below.
    pub duration: i32,
    pub damage_per_turn: u32,
    pub effect_type: EffectType,
    /// Boost size for stat buffs, hit points for healing, unused otherwise.
    pub amount: i32,
}

impl StatusEffect {
    /// Default instance of a variant
    pub fn new(kind: EffectKind) -> Self {
        let (duration, damage_per_turn, effect_type, amount) = match kind {
            EffectKind::Poison => (3, 5, EffectType::Debuff, 0),
            EffectKind::Burn => (2, 8, EffectType::Debuff, 0),
            EffectKind::Freeze => (1, 0, EffectType::Control, 0),
            EffectKind::FireResistance => (2, 0, EffectType::Buff, 1),
            EffectKind::AttackBoost => (3, 0, EffectType::Buff, 5),
            EffectKind::DefenseBoost => (3, 0, EffectType::Buff, 5),
            EffectKind::LuckBoost => (3, 0, EffectType::Buff, 3),
            EffectKind::Healing => (0, 0, EffectType::Buff, 0),
        };
        Self {
            kind,
            duration,
            damage_per_turn,
            effect_type,
            amount,
        }
    }

    pub fn poison() -> Self {
        Self::new(EffectKind::Poison)
    }

    pub fn burn() -> Self {
        Self::new(EffectKind::Burn)
    }

    pub fn freeze() -> Self {
        Self::new(EffectKind::Freeze)
    }

    pub fn healing(amount: i32) -> Self {
        Self {
            amount,
            ..Self::new(EffectKind::Healing)
        }
    }

    pub fn with_duration(mut self, duration: i32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_damage(mut self, damage_per_turn: u32) -> Self {
        self.damage_per_turn = damage_per_turn;
        self
    }

    pub fn with_amount(mut self, amount: i32) -> Self {
        self.amount = amount;
        self
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn is_expired(&self) -> bool {
        self.duration <= 0
    }

    /// One-shot effect when the status is attached to `target`
    pub fn apply(&self, target: &str, stats: &mut Stats) -> Option<EffectEvent> {
        match self.kind {
            EffectKind::Poison | EffectKind::Burn => None,
            EffectKind::Freeze => {
                stats.can_act = false;
                info!(target_name = target, "{} is frozen and cannot act", target);
                Some(EffectEvent::Immobilized {
                    target: target.to_string(),
                })
            }
            EffectKind::FireResistance => {
                let resistance = stats.resistances.entry("burn".to_string()).or_insert(0);
                *resistance = resistance.saturating_add(self.amount);
                info!(
                    "{}'s burn resistance increased by {} for {} turns",
                    target, self.amount, self.duration
                );
                Some(EffectEvent::ResistanceChanged {
                    target: target.to_string(),
                    element: "burn".to_string(),
                    delta: self.amount,
                })
            }
            EffectKind::AttackBoost | EffectKind::DefenseBoost | EffectKind::LuckBoost => {
                let stat = self.kind.boosted_stat()?;
                let value = stats.temporary.entry(stat.to_string()).or_insert(0);
                *value = value.saturating_add(self.amount);
                info!(
                    "{}'s {} increased by {} for {} turns",
                    target, stat, self.amount, self.duration
                );
                Some(EffectEvent::StatChanged {
                    target: target.to_string(),
                    stat: stat.to_string(),
                    delta: self.amount,
                })
            }
            EffectKind::Healing => {
                let healed = stats.heal(self.amount);
                info!("{} healed for {} HP", target, healed);
                Some(EffectEvent::Healed {
                    target: target.to_string(),
                    amount: healed,
                })
            }
        }
    }

    /// Per-turn tick: deal damage over time, then count down one turn.
    pub fn on_turn_start(&mut self, target: &str, stats: &mut Stats) -> Option<EffectEvent> {
        let event = if self.damage_per_turn > 0 {
            stats.hp = stats
                .hp
                .saturating_sub(i32::try_from(self.damage_per_turn).unwrap_or(i32::MAX));
            info!(
                target_name = target,
                effect = self.name(),
                damage = self.damage_per_turn,
                "{} suffers {} damage from {}",
                target,
                self.damage_per_turn,
                self.name()
            );
            Some(EffectEvent::Damaged {
                target: target.to_string(),
                effect: self.kind,
                amount: self.damage_per_turn,
            })
        } else {
            None
        };

        self.duration = self.duration.saturating_sub(1);
        event
    }

    /// Undo the lasting part of [`StatusEffect::apply`] once the effect has
    /// been removed. `remaining` holds the effects still active on the target.
    pub fn expire(&self, target: &str, stats: &mut Stats, remaining: &[StatusEffect]) -> Option<EffectEvent> {
        match self.kind {
            EffectKind::Freeze => {
                let still_controlled = remaining.iter().any(|e| e.effect_type == EffectType::Control);
                if still_controlled || stats.can_act {
                    return None;
                }
                stats.can_act = true;
                info!(target_name = target, "{} can act again", target);
                Some(EffectEvent::Released {
                    target: target.to_string(),
                })
            }
            EffectKind::FireResistance => {
                let resistance = stats.resistances.entry("burn".to_string()).or_insert(0);
                *resistance = resistance.saturating_sub(self.amount);
                Some(EffectEvent::ResistanceChanged {
                    target: target.to_string(),
                    element: "burn".to_string(),
                    delta: self.amount.saturating_neg(),
                })
            }
            EffectKind::AttackBoost | EffectKind::DefenseBoost | EffectKind::LuckBoost => {
                let stat = self.kind.boosted_stat()?;
                let value = stats.temporary.entry(stat.to_string()).or_insert(0);
                *value = value.saturating_sub(self.amount);
                Some(EffectEvent::StatChanged {
                    target: target.to_string(),
                    stat: stat.to_string(),
                    delta: self.amount.saturating_neg(),
                })
            }
            EffectKind::Poison | EffectKind::Burn | EffectKind::Healing => None,
        }
    }
}

impl fmt::Display for StatusEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} turns)", self.name(), self.duration)
    }
}
