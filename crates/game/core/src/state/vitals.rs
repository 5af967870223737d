//! Player health and status effects.

use super::{GameState, StatusEffect, StatusEffectKind, StatusTick};

impl GameState {
    /// Reduces health, clamped at zero. Returns the damage actually taken.
    pub fn damage_player(&mut self, amount: i32) -> i32 {
        let before = self.player.health;
        self.player.health = (before - amount.max(0)).clamp(0, self.player.stats.max_health);
        before - self.player.health
    }

    /// Restores health, clamped at max. Returns the amount actually healed.
    pub fn heal_player(&mut self, amount: i32) -> i32 {
        let before = self.player.health;
        self.player.health = (before + amount.max(0)).clamp(0, self.player.stats.max_health);
        self.player.health - before
    }

    /// Attaches an effect, replacing any active effect of the same kind.
    pub fn apply_status_effect(
        &mut self,
        kind: StatusEffectKind,
        steps: u32,
        damage_per_step: i32,
        movement_multiplier: f32,
    ) {
        self.player.status_effects.apply(StatusEffect::new(
            kind,
            steps,
            damage_per_step,
            movement_multiplier,
        ));
    }

    /// Ticks every effect once, applying their damage.
    ///
    /// Called exactly once per completed player move. Returns one message per
    /// damage or expiry event.
    pub fn process_status_effects(&mut self) -> Vec<String> {
        let ticks = self.player.status_effects.tick();
        ticks
            .iter()
            .map(|tick| {
                if let StatusTick::Damaged { amount, .. } = tick {
                    self.damage_player(*amount);
                }
                tick.message()
            })
            .collect()
    }

    pub fn effective_movement_multiplier(&self) -> f32 {
        self.player.status_effects.movement_multiplier()
    }
}
