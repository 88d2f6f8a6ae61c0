//! Per-skill mastery tracking.
//!
//! Each mastery levels independently. The curve is linear in the current
//! level: reaching level `L + 1` from level `L` costs `100 + 50 * L` xp, and
//! any surplus carries over into the next level.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DataResult;
use crate::record::Record;

/// Flat part of the xp threshold
pub const BASE_XP_TO_NEXT: u64 = 100;
/// Threshold growth per level
pub const XP_TO_NEXT_PER_LEVEL: u64 = 50;

/// XP required to advance from `level` to `level + 1`
pub fn xp_to_next_level(level: u32) -> u64 {
    BASE_XP_TO_NEXT + XP_TO_NEXT_PER_LEVEL * u64::from(level)
}

/// Total xp to climb `levels` levels starting at `level`
fn cost_of_levels(level: u32, levels: u64) -> u128 {
    let levels = u128::from(levels);
    let first = u128::from(xp_to_next_level(level));
    levels * first + u128::from(XP_TO_NEXT_PER_LEVEL) * levels * levels.saturating_sub(1) / 2
}

/// Most levels `xp` pays for from `level`, bounded by `u32::MAX`, and what
/// they cost.
fn affordable_levels(level: u32, xp: u64) -> (u32, u64) {
    let budget = u128::from(xp);
    let (mut lo, mut hi) = (0u64, u64::from(u32::MAX - level));
    while lo < hi {
        let mid = lo + (hi - lo).div_ceil(2);
        if cost_of_levels(level, mid) <= budget {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    // Both fit: lo <= u32::MAX - level and the cost is within xp.
    let gained = u32::try_from(lo).unwrap_or(0);
    let cost = u64::try_from(cost_of_levels(level, lo)).unwrap_or(0);
    (gained, cost)
}

/// Combat modifiers granted by a mastery level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MasteryBonus {
    pub damage_multiplier: f64,
    pub accuracy: f64,
}

impl MasteryBonus {
    pub const NEUTRAL: MasteryBonus = MasteryBonus {
        damage_multiplier: 1.0,
        accuracy: 0.0,
    };
}

/// Experience and level for a single skill or weapon family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mastery {
    pub name: String,
    pub xp: u64,
    pub level: u32,
}

impl Mastery {
    /// Create a new mastery at level 1 with no xp
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            xp: 0,
            level: 1,
        }
    }

    /// XP needed to reach the next level
    pub fn xp_to_next(&self) -> u64 {
        xp_to_next_level(self.level)
    }

    /// Add xp, levelling up as many times as the total allows.
    /// Returns the number of levels gained.
    ///
    /// XP saturates at `u64::MAX` and the level stops at `u32::MAX`; once
    /// capped, further xp is banked without levelling.
    pub fn gain_xp(&mut self, amount: u64) -> u32 {
        self.xp = self.xp.saturating_add(amount);

        let (gained, cost) = affordable_levels(self.level, self.xp);
        self.level += gained;
        self.xp -= cost;
        gained
    }

    /// Damage and accuracy modifiers for the current level.
    ///
    /// Level 0 (only reachable through a loaded record) is a penalty, level 1
    /// is neutral and every level above adds 5% damage and 2% accuracy.
    pub fn bonus(&self) -> MasteryBonus {
        match self.level {
            0 => MasteryBonus {
                damage_multiplier: 0.9,
                accuracy: -0.10,
            },
            1 => MasteryBonus::NEUTRAL,
            level => {
                let above = f64::from(level - 1);
                MasteryBonus {
                    damage_multiplier: 1.0 + 0.05 * above,
                    accuracy: 0.02 * above,
                }
            }
        }
    }

    /// Save form: `{"name", "xp", "level"}`
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("name".into(), self.name.clone().into());
        record.insert("xp".into(), self.xp.into());
        record.insert("level".into(), self.level.into());
        record
    }

    /// Restore from the save form produced by [`Mastery::to_record`]
    pub fn from_record(record: Record) -> DataResult<Self> {
        Ok(serde_json::from_value(serde_json::Value::Object(record))?)
    }
}

impl fmt::Display for Mastery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: Lvl {} ({}/{})", self.name, self.level, self.xp, self.xp_to_next())
    }
}
