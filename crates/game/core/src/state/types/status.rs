//! Status effect system for the player.
//!
//! Effects are step-based: each completed player move ticks every active
//! effect exactly once. At most one effect of each kind is active; applying a
//! kind that is already present replaces it instead of stacking.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

/// Active status effects on the player.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

/// A single timed modifier.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    pub remaining_steps: u32,
    pub damage_per_step: i32,
    /// Multiplier applied to move duration (2.0 = half speed).
    pub movement_multiplier: f32,
}

impl StatusEffect {
    pub fn new(
        kind: StatusEffectKind,
        remaining_steps: u32,
        damage_per_step: i32,
        movement_multiplier: f32,
    ) -> Self {
        Self {
            kind,
            remaining_steps,
            damage_per_step,
            movement_multiplier,
        }
    }
}

/// Lingering effects a hazard's damage type can leave behind.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    /// Fire damage over time.
    Burning,
    /// Poison damage over time.
    Poisoned,
    /// Movement slowed.
    Chilled,
}

impl StatusEffectKind {
    /// Display label used in status messages.
    pub fn label(self) -> &'static str {
        match self {
            StatusEffectKind::Burning => "Burn",
            StatusEffectKind::Poisoned => "Poison",
            StatusEffectKind::Chilled => "Chill",
        }
    }
}

/// One damage or expiry event produced while ticking effects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusTick {
    Damaged {
        kind: StatusEffectKind,
        amount: i32,
    },
    Expired {
        kind: StatusEffectKind,
    },
}

impl StatusTick {
    pub fn message(&self) -> String {
        match self {
            StatusTick::Damaged { kind, amount } => {
                format!("{} deals {} damage!", kind.label(), amount)
            }
            StatusTick::Expired { kind } => format!("{} wore off.", kind.label()),
        }
    }
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: StatusEffectKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Removes any effect of the same kind, then appends `effect`.
    pub fn apply(&mut self, effect: StatusEffect) {
        self.remove(effect.kind);
        // One slot per kind, so capacity is never exceeded.
        let _ = self.effects.try_push(effect);
    }

    pub fn remove(&mut self, kind: StatusEffectKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    /// Advances every effect by one step.
    ///
    /// Returns the ticks in effect order; the caller applies the damage.
    pub fn tick(&mut self) -> Vec<StatusTick> {
        let mut ticks = Vec::new();
        for effect in self.effects.iter_mut() {
            if effect.damage_per_step > 0 {
                ticks.push(StatusTick::Damaged {
                    kind: effect.kind,
                    amount: effect.damage_per_step,
                });
            }
            effect.remaining_steps = effect.remaining_steps.saturating_sub(1);
            if effect.remaining_steps == 0 {
                ticks.push(StatusTick::Expired { kind: effect.kind });
            }
        }
        self.effects.retain(|e| e.remaining_steps > 0);
        ticks
    }

    /// Product of all active multipliers (1.0 when none).
    pub fn movement_multiplier(&self) -> f32 {
        self.effects
            .iter()
            .map(|e| e.movement_multiplier)
            .product()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
