//! Combat result records.

/// Outcome of the player striking an entity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub damage: i32,
    pub remaining_health: i32,
    pub killed: bool,
    pub message: String,
}

impl AttackResult {
    pub fn new(name: &str, damage: i32, remaining_health: i32, max_health: i32) -> Self {
        let killed = remaining_health <= 0;
        let message = if killed {
            format!("Defeated {}!", name)
        } else {
            format!(
                "Hit {} for {}! ({}/{} HP)",
                name, damage, remaining_health, max_health
            )
        };
        Self {
            damage,
            remaining_health,
            killed,
            message,
        }
    }
}
