//! Damage calculation.

/// Every successful hit deals at least this much.
pub const MINIMUM_DAMAGE: i32 = 1;

/// Calculate damage from an attack.
///
/// # Formula
///
/// ```text
/// damage = max(1, attack - defense)
/// ```
pub fn calculate_damage(attack: i32, defense: i32) -> i32 {
    attack.saturating_sub(defense).max(MINIMUM_DAMAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attack_above_defense_deals_difference() {
        assert_eq!(calculate_damage(5, 2), 3);
    }

    #[test]
    fn damage_is_never_below_one() {
        for attack in -20..20 {
            for defense in -20..40 {
                assert!(calculate_damage(attack, defense) >= 1);
            }
        }
        assert_eq!(calculate_damage(i32::MIN, i32::MAX), 1);
    }
}
