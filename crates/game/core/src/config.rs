/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Seconds a one-tile move takes on cost-1 terrain with no effects.
    pub base_move_duration: f32,
    /// Seconds a status message stays visible.
    pub status_message_duration: f32,
    /// Seconds the hit flash lasts after a blow lands.
    pub hit_flash_duration: f32,
    pub player_max_health: i32,
    pub player_attack: i32,
    pub player_defense: i32,
    /// Used for new players and to back-fill saves that lack it.
    pub default_max_ap: i32,
    pub default_aggro_range: u32,
    pub default_patrol_range: u32,
    /// Characters revealed per second by the dialogue typewriter.
    pub text_speed: f32,
    /// Separator used to split inline dialogue text into pages.
    pub inline_dialogue_delimiter: String,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// One slot per [`StatusEffectKind`](crate::state::StatusEffectKind).
    pub const MAX_STATUS_EFFECTS: usize = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MOVE_DURATION: f32 = 0.15;
    pub const DEFAULT_STATUS_MESSAGE_DURATION: f32 = 2.0;
    pub const DEFAULT_HIT_FLASH_DURATION: f32 = 0.2;
    pub const DEFAULT_MAX_AP: i32 = 10;
    pub const DEFAULT_AGGRO_RANGE: u32 = 5;
    pub const DEFAULT_PATROL_RANGE: u32 = 3;

    pub fn new() -> Self {
        Self {
            base_move_duration: Self::DEFAULT_MOVE_DURATION,
            status_message_duration: Self::DEFAULT_STATUS_MESSAGE_DURATION,
            hit_flash_duration: Self::DEFAULT_HIT_FLASH_DURATION,
            player_max_health: 20,
            player_attack: 5,
            player_defense: 1,
            default_max_ap: Self::DEFAULT_MAX_AP,
            default_aggro_range: Self::DEFAULT_AGGRO_RANGE,
            default_patrol_range: Self::DEFAULT_PATROL_RANGE,
            text_speed: 40.0,
            inline_dialogue_delimiter: "|".to_string(),
        }
    }

    /// Base stats for a fresh player.
    pub fn player_stats(&self) -> crate::state::PlayerStats {
        crate::state::PlayerStats::new(
            self.player_max_health,
            self.player_attack,
            self.player_defense,
            self.default_max_ap,
        )
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
