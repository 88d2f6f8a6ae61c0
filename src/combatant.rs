use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::Record;
use crate::status::{EffectEvent, EffectKind, EffectType, StatusEffect};

/// Mutable combat state that status effects act on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: i32,
    pub max_hp: i32,
    pub can_act: bool,
    /// Temporary stat deltas from buffs (attack, defense, luck, ...)
    #[serde(default)]
    pub temporary: BTreeMap<String, i32>,
    /// Elemental resistances keyed by effect family (burn, ...)
    #[serde(default)]
    pub resistances: BTreeMap<String, i32>,
}

impl Stats {
    pub fn new(max_hp: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            can_act: true,
            temporary: BTreeMap::new(),
            resistances: BTreeMap::new(),
        }
    }

    /// Restore up to `amount` hp without exceeding `max_hp`.
    /// Returns the hp actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount.max(0)).min(self.max_hp).max(before);
        self.hp.saturating_sub(before)
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// Anything that fights: a player or an enemy.
///
/// Owns its active effects and is responsible for dropping them once they
/// expire.
#[derive(Debug, Clone)]
pub struct Combatant {
    pub name: String,
    pub stats: Stats,
    effects: Vec<StatusEffect>,
}

impl Combatant {
    pub fn new(name: impl Into<String>, max_hp: i32) -> Self {
        Self {
            name: name.into(),
            stats: Stats::new(max_hp),
            effects: Vec::new(),
        }
    }

    /// Active effects in attachment order
    pub fn effects(&self) -> &[StatusEffect] {
        &self.effects
    }

    pub fn has_effect(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn can_act(&self) -> bool {
        self.stats.can_act
    }

    /// Attach an effect and run its immediate part.
    ///
    /// Effects that are already expired (instant healing) fire once and are
    /// not kept.
    pub fn add_effect(&mut self, effect: StatusEffect) -> Option<EffectEvent> {
        let event = effect.apply(&self.name, &mut self.stats);
        if effect.is_expired() {
            debug!("{} resolved instantly on {}", effect.name(), self.name);
        } else {
            debug!("{} gains {}", self.name, effect);
            self.effects.push(effect);
        }
        event
    }

    /// Tick every active effect once, then remove the expired ones.
    pub fn start_turn(&mut self) -> Vec<EffectEvent> {
        let mut events = Vec::new();

        for effect in self.effects.iter_mut() {
            if let Some(event) = effect.on_turn_start(&self.name, &mut self.stats) {
                events.push(event);
            }
        }

        let (expired, active): (Vec<StatusEffect>, Vec<StatusEffect>) =
            std::mem::take(&mut self.effects).into_iter().partition(StatusEffect::is_expired);
        self.effects = active;

        for effect in expired {
            debug!("{} wears off {}", effect.name(), self.name);
            if let Some(event) = effect.expire(&self.name, &mut self.stats, &self.effects) {
                events.push(event);
            }
        }

        events
    }

    /// Save records of all active effects
    pub fn effect_records(&self) -> Vec<Record> {
        self.effects.iter().map(StatusEffect::to_record).collect()
    }

    /// Reattach effects from save records without re-running their immediate
    /// part. Unknown records are skipped. Returns how many were restored.
    ///
    /// Stats are assumed to come from the same save, so only the control
    /// state is rebuilt: an active control effect keeps the target from acting.
    pub fn restore_effects(&mut self, records: &[Record]) -> usize {
        let before = self.effects.len();
        self.effects
            .extend(records.iter().filter_map(StatusEffect::from_record));

        let controlled = self.effects[before..]
            .iter()
            .any(|e| e.effect_type == EffectType::Control && !e.is_expired());
        if controlled {
            debug!("{} restored under a control effect", self.name);
            self.stats.can_act = false;
        }

        self.effects.len() - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heal_caps_at_max() {
        let mut stats = Stats::new(50);
        stats.hp = 45;
        assert_eq!(stats.heal(20), 5);
        assert_eq!(stats.hp, 50);
        assert_eq!(stats.heal(-3), 0);
    }

    #[test]
    fn test_poison_runs_out() {
        let mut goblin = Combatant::new("Goblin", 40);
        goblin.add_effect(StatusEffect::poison());

        for _ in 0..2 {
            let events = goblin.start_turn();
            assert_eq!(events.len(), 1);
            assert!(goblin.has_effect(EffectKind::Poison));
        }

        goblin.start_turn();
        assert!(goblin.effects().is_empty());
        assert_eq!(goblin.stats.hp, 25);

        // Nothing left to tick
        assert!(goblin.start_turn().is_empty());
        assert_eq!(goblin.stats.hp, 25);
    }

    #[test]
    fn test_effects_tick_in_attachment_order() {
        let mut goblin = Combatant::new("Goblin", 40);
        goblin.add_effect(StatusEffect::burn());
        goblin.add_effect(StatusEffect::poison());

        let events = goblin.start_turn();
        let kinds: Vec<EffectKind> = events
            .iter()
            .filter_map(|e| match e {
                EffectEvent::Damaged { effect, .. } => Some(*effect),
                _ => None,
            })
            .collect();
        assert_eq!(kinds, vec![EffectKind::Burn, EffectKind::Poison]);
        assert_eq!(goblin.stats.hp, 27);
    }

    #[test]
    fn test_freeze_clears_on_expiry() {
        let mut hero = Combatant::new("Hero", 30);
        hero.add_effect(StatusEffect::freeze());
        assert!(!hero.can_act());

        let events = hero.start_turn();
        assert!(hero.can_act());
        assert!(events.iter().any(|e| matches!(e, EffectEvent::Released { .. })));
        assert!(!hero.has_effect(EffectKind::Freeze));
    }

    #[test]
    fn test_overlapping_freeze_keeps_target_frozen() {
        let mut hero = Combatant::new("Hero", 30);
        hero.add_effect(StatusEffect::freeze());
        hero.add_effect(StatusEffect::freeze().with_duration(2));

        hero.start_turn();
        assert!(!hero.can_act());

        hero.start_turn();
        assert!(hero.can_act());
    }

    #[test]
    fn test_instant_healing_not_kept() {
        let mut hero = Combatant::new("Hero", 30);
        hero.stats.hp = 10;

        let event = hero.add_effect(StatusEffect::healing(15));
        assert!(matches!(event, Some(EffectEvent::Healed { amount: 15, .. })));
        assert!(hero.effects().is_empty());
    }

    #[test]
    fn test_boost_reverts() {
        let mut hero = Combatant::new("Hero", 30);
        hero.add_effect(StatusEffect::new(EffectKind::DefenseBoost).with_duration(1));
        assert_eq!(hero.stats.temporary["defense"], 5);

        hero.start_turn();
        assert_eq!(hero.stats.temporary["defense"], 0);
    }

    #[test]
    fn test_effect_records_restore() {
        let mut hero = Combatant::new("Hero", 30);
        hero.add_effect(StatusEffect::poison());
        hero.add_effect(StatusEffect::burn());

        let mut records = hero.effect_records();
        let mut bogus = Record::new();
        bogus.insert("name".into(), "Bleed".into());
        records.push(bogus);

        let mut copy = Combatant::new("Hero", 30);
        assert_eq!(copy.restore_effects(&records), 2);
        assert_eq!(copy.effects(), hero.effects());
        assert!(copy.can_act());
    }

    #[test]
    fn test_restored_freeze_blocks_action() {
        let mut hero = Combatant::new("Hero", 30);
        hero.add_effect(StatusEffect::freeze().with_duration(3));
        let records = hero.effect_records();

        let mut copy = Combatant::new("Hero", 30);
        assert_eq!(copy.restore_effects(&records), 1);
        assert!(copy.has_effect(EffectKind::Freeze));
        assert!(!copy.can_act());

        copy.start_turn();
        copy.start_turn();
        assert!(!copy.can_act());

        let events = copy.start_turn();
        assert!(events.iter().any(|e| matches!(e, EffectEvent::Released { .. })));
        assert!(copy.can_act());
    }

    #[test]
    fn test_extreme_damage_record_saturates() {
        let mut record = Record::new();
        record.insert("name".into(), "Poison".into());
        record.insert("damage_per_turn".into(), u32::MAX.into());

        let mut goblin = Combatant::new("Goblin", 40);
        assert_eq!(goblin.restore_effects(&[record]), 1);

        goblin.start_turn();
        goblin.start_turn();
        assert_eq!(goblin.stats.hp, i32::MIN);
        assert!(!goblin.stats.is_alive());

        goblin.start_turn();
        assert!(goblin.effects().is_empty());
        assert_eq!(goblin.stats.hp, i32::MIN);
    }

    #[test]
    fn test_lowest_duration_record_expires() {
        let mut record = Record::new();
        record.insert("name".into(), "Burn".into());
        record.insert("duration".into(), i32::MIN.into());

        let mut goblin = Combatant::new("Goblin", 40);
        assert_eq!(goblin.restore_effects(&[record]), 1);

        goblin.start_turn();
        assert!(goblin.effects().is_empty());
        assert_eq!(goblin.stats.hp, 32);
    }

    #[test]
    fn test_huge_healing_record_caps_at_max() {
        let mut record = Record::new();
        record.insert("name".into(), "Healing".into());
        record.insert("heal_amount".into(), i32::MAX.into());

        let mut hero = Combatant::new("Hero", 30);
        hero.stats.hp = 12;
        let effect = StatusEffect::from_record(&record).unwrap();

        let event = hero.add_effect(effect);
        assert!(matches!(event, Some(EffectEvent::Healed { amount: 18, .. })));
        assert_eq!(hero.stats.hp, 30);
    }

    #[test]
    fn test_heal_from_lowest_hp() {
        let mut stats = Stats::new(50);
        stats.hp = i32::MIN;
        assert_eq!(stats.heal(i32::MAX), i32::MAX);
        assert_eq!(stats.hp, -1);
    }
}
