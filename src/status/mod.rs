//! Status effect engine.
//!
//! Effects are a closed set of variants sharing one data layout. Each turn
//! the owning combatant ticks its active effects in attachment order; an
//! effect whose duration has run out is expired and gets removed by the
//! owner, never by the effect itself.

pub mod effect;
pub mod record;

pub use effect::{EffectEvent, EffectKind, EffectType, StatusEffect};
