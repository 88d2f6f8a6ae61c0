//! Save records for status effects.
//!
//! Loading is lenient: the `name` picks the variant, its defaults are built,
//! and whichever other fields are present with a usable type overwrite them.
//! Anything else in the record is ignored.

use serde_json::Value;
use tracing::debug;

use super::effect::{EffectKind, EffectType, StatusEffect};
use crate::record::Record;

impl StatusEffect {
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("name".into(), self.name().into());
        record.insert("duration".into(), self.duration.into());
        record.insert("damage_per_turn".into(), self.damage_per_turn.into());
        record.insert("effect_type".into(), self.effect_type.as_str().into());
        record.insert("amount".into(), self.amount.into());
        record
    }

    /// Rebuild an effect from a save record.
    ///
    /// Returns `None` when the name is missing or unknown; the caller should
    /// drop such records.
    pub fn from_record(record: &Record) -> Option<Self> {
        let name = record.get("name").and_then(Value::as_str)?;
        let Some(kind) = EffectKind::from_name(name) else {
            debug!("Discarding record for unknown status effect '{}'", name);
            return None;
        };

        let mut effect = StatusEffect::new(kind);

        if let Some(duration) = int_field(record, "duration") {
            effect.duration = duration;
        }
        if let Some(damage) = record
            .get("damage_per_turn")
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
        {
            effect.damage_per_turn = damage;
        }
        if let Some(effect_type) = record
            .get("effect_type")
            .and_then(|v| serde_json::from_value::<EffectType>(v.clone()).ok())
        {
            effect.effect_type = effect_type;
        }
        // Older saves stored the magnitude under the variant's own key.
        for key in ["amount", "boost_amount", "heal_amount"] {
            if let Some(amount) = int_field(record, key) {
                effect.amount = amount;
            }
        }

        Some(effect)
    }
}

fn int_field(record: &Record, key: &str) -> Option<i32> {
    record
        .get(key)
        .and_then(Value::as_i64)
        .and_then(|v| i32::try_from(v).ok())
}
