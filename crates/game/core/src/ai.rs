//! Per-entity behaviour.
//!
//! Behaviour is configured through string properties on the entity. They are
//! read once per turn into an [`AiProfile`]; decisions are computed against an
//! immutable view of the state and applied afterwards. Patrol memory (origin
//! and heading) is written back into the entity's own property bag so it
//! survives across turns without side tables.

use crate::combat::calculate_damage;
use crate::config::GameConfig;
use crate::env::MapData;
use crate::pathfinding::Pathfinder;
use crate::state::{EntityId, EntityInstance, GameState, Position, PropertyBag};

const ORIGIN_X: &str = "patrol_origin_x";
const ORIGIN_Y: &str = "patrol_origin_y";
const HEADING: &str = "patrol_dir";

/// Behaviour tag; unknown or missing tags are [`Behavior::Idle`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Behavior {
    #[default]
    Idle,
    Chase,
    Patrol,
    ChasePatrol,
}

impl Behavior {
    pub fn parse(tag: Option<&str>) -> Self {
        tag.and_then(|tag| tag.trim().parse().ok())
            .unwrap_or_default()
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PatrolAxis {
    #[default]
    X,
    Y,
}

/// Remembered patrol leg.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatrolMemory {
    pub origin: Position,
    /// +1 or -1 along the patrol axis.
    pub heading: i32,
}

impl PatrolMemory {
    fn read(properties: &PropertyBag) -> Option<Self> {
        let x = properties.get(ORIGIN_X)?.trim().parse().ok()?;
        let y = properties.get(ORIGIN_Y)?.trim().parse().ok()?;
        let heading = if properties.get_i32(HEADING, 1) < 0 { -1 } else { 1 };
        Some(Self {
            origin: Position::new(x, y),
            heading,
        })
    }

    fn write(&self, properties: &mut PropertyBag) {
        properties.insert(ORIGIN_X, self.origin.x);
        properties.insert(ORIGIN_Y, self.origin.y);
        properties.insert(HEADING, self.heading);
    }
}

/// Typed view of an entity's AI properties.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AiProfile {
    pub behavior: Behavior,
    pub aggro_range: u32,
    pub patrol_range: u32,
    pub axis: PatrolAxis,
    pub requires_sight: bool,
    pub attack: i32,
    pub patrol: Option<PatrolMemory>,
}

impl AiProfile {
    pub fn from_entity(entity: &EntityInstance, config: &GameConfig) -> Self {
        let props = &entity.properties;
        Self {
            behavior: Behavior::parse(props.get_str("behavior")),
            aggro_range: props.get_u32("aggro_range", config.default_aggro_range),
            patrol_range: props.get_u32("patrol_range", config.default_patrol_range),
            axis: props
                .get_str("patrol_axis")
                .and_then(|axis| axis.parse().ok())
                .unwrap_or_default(),
            requires_sight: props.get_bool("requires_sight", false),
            attack: props.get_i32("attack", 1),
            patrol: PatrolMemory::read(props),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiAction {
    Idle,
    MoveTo(Position),
    /// Melee the adjacent player.
    Attack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AiDecision {
    pub action: AiAction,
    /// Patrol memory to store back, when it changed.
    pub patrol: Option<PatrolMemory>,
}

impl AiDecision {
    const IDLE: Self = Self {
        action: AiAction::Idle,
        patrol: None,
    };
}

/// Damage an entity dealt to the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityAttack {
    pub entity: EntityId,
    pub damage: i32,
    pub message: String,
}

/// Decides what entity `id` does this turn. Pure.
pub fn decide(
    id: EntityId,
    entity: &EntityInstance,
    profile: &AiProfile,
    player: Position,
    pathfinder: &Pathfinder<'_>,
) -> AiDecision {
    match profile.behavior {
        Behavior::Idle => AiDecision::IDLE,
        Behavior::Chase => chase(id, entity, profile, player, pathfinder).unwrap_or(AiDecision::IDLE),
        Behavior::Patrol => patrol(id, entity, profile, pathfinder),
        Behavior::ChasePatrol => chase(id, entity, profile, player, pathfinder)
            .unwrap_or_else(|| patrol(id, entity, profile, pathfinder)),
    }
}

/// `None` when the player is out of reach (range or sight).
fn chase(
    id: EntityId,
    entity: &EntityInstance,
    profile: &AiProfile,
    player: Position,
    pathfinder: &Pathfinder<'_>,
) -> Option<AiDecision> {
    let distance = entity.position.manhattan_distance(player);
    if distance > profile.aggro_range {
        return None;
    }
    if profile.requires_sight && !pathfinder.has_line_of_sight(entity.position, player) {
        return None;
    }
    if distance == 1 {
        return Some(AiDecision {
            action: AiAction::Attack,
            patrol: None,
        });
    }
    let action = match pathfinder.next_step(id, entity.position, player) {
        Some(step) => AiAction::MoveTo(step),
        None => AiAction::Idle,
    };
    Some(AiDecision {
        action,
        patrol: None,
    })
}

fn patrol(
    id: EntityId,
    entity: &EntityInstance,
    profile: &AiProfile,
    pathfinder: &Pathfinder<'_>,
) -> AiDecision {
    let memory = profile.patrol.unwrap_or(PatrolMemory {
        origin: entity.position,
        heading: 1,
    });
    let range = profile.patrol_range as i32;

    let step_toward = |heading: i32| {
        let target = match profile.axis {
            PatrolAxis::X => Position::new(entity.position.x + heading, entity.position.y),
            PatrolAxis::Y => Position::new(entity.position.x, entity.position.y + heading),
        };
        let offset = match profile.axis {
            PatrolAxis::X => target.x - memory.origin.x,
            PatrolAxis::Y => target.y - memory.origin.y,
        };
        (offset.abs() <= range && pathfinder.is_open(target, id)).then_some(target)
    };

    if let Some(target) = step_toward(memory.heading) {
        return AiDecision {
            action: AiAction::MoveTo(target),
            patrol: Some(memory),
        };
    }

    let reversed = PatrolMemory {
        heading: -memory.heading,
        ..memory
    };
    let action = match step_toward(reversed.heading) {
        Some(target) => AiAction::MoveTo(target),
        None => AiAction::Idle,
    };
    AiDecision {
        action,
        patrol: Some(reversed),
    }
}

/// Runs one AI turn for `id` and applies it to `state`.
///
/// Inactive entities and entities without a `behavior` property are skipped.
pub fn take_turn(
    state: &mut GameState,
    map: &MapData,
    id: EntityId,
    config: &GameConfig,
) -> Option<EntityAttack> {
    let decision = {
        let entity = state.entities.get(id)?;
        if !entity.is_active || !entity.has_behavior() {
            return None;
        }
        let profile = AiProfile::from_entity(entity, config);
        let pathfinder = Pathfinder::new(map, state);
        let decision = decide(id, entity, &profile, state.player.position, &pathfinder);
        (decision, profile.attack)
    };
    let (decision, attack) = decision;

    let entity = state.entities.get_mut(id)?;
    if let Some(memory) = decision.patrol {
        memory.write(&mut entity.properties);
    }
    match decision.action {
        AiAction::Idle => None,
        AiAction::MoveTo(target) => {
            entity.position = target;
            None
        }
        AiAction::Attack => {
            let name = entity.name().to_string();
            let damage = calculate_damage(attack, state.effective_defense());
            state.damage_player(damage);
            Some(EntityAttack {
                entity: id,
                damage,
                message: format!("{} hits you for {}!", name, damage),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{EntityType, GroupDefinition, GroupFlags};

    fn map() -> MapData {
        let mut map = MapData::new("field", 10, 10);
        map.add_group(GroupDefinition::new("rock").with_flags(GroupFlags::SOLID));
        map.add_layer("ground");
        map
    }

    fn spawn(state: &mut GameState, at: Position, props: &[(&str, &str)]) -> EntityId {
        let properties: PropertyBag = props.iter().copied().collect();
        state.entities.spawn(
            EntityInstance::new("wolf", "wolf", at, properties)
                .with_type(Some(EntityType::Npc), false),
        )
    }

    fn state(player: Position) -> GameState {
        GameState::new(&GameConfig::default(), player)
    }

    #[test]
    fn unknown_behavior_is_idle() {
        assert_eq!(Behavior::parse(Some("dance")), Behavior::Idle);
        assert_eq!(Behavior::parse(Some("Chase_Patrol")), Behavior::ChasePatrol);
        assert_eq!(Behavior::parse(None), Behavior::Idle);
    }

    #[test]
    fn chaser_closes_in_then_attacks() {
        let config = GameConfig::default();
        let map = map();
        let mut state = state(Position::new(5, 2));
        let id = spawn(
            &mut state,
            Position::new(2, 2),
            &[("behavior", "chase"), ("attack", "4")],
        );

        assert_eq!(take_turn(&mut state, &map, id, &config), None);
        assert_eq!(state.entities.get(id).unwrap().position, Position::new(3, 2));
        assert_eq!(take_turn(&mut state, &map, id, &config), None);

        let attack = take_turn(&mut state, &map, id, &config).unwrap();
        // attack 4 against base defense 1
        assert_eq!(attack.damage, 3);
        assert_eq!(attack.message, "wolf hits you for 3!");
        assert_eq!(state.player.health(), state.player.max_health() - 3);
    }

    #[test]
    fn chaser_ignores_player_beyond_aggro_range() {
        let config = GameConfig::default();
        let map = map();
        let mut state = state(Position::new(9, 9));
        let id = spawn(
            &mut state,
            Position::new(0, 0),
            &[("behavior", "chase"), ("aggro_range", "3")],
        );

        take_turn(&mut state, &map, id, &config);
        assert_eq!(state.entities.get(id).unwrap().position, Position::ORIGIN);
    }

    #[test]
    fn patrol_turns_around_at_range() {
        let config = GameConfig::default();
        let map = map();
        let mut state = state(Position::new(9, 9));
        let id = spawn(
            &mut state,
            Position::new(4, 4),
            &[("behavior", "patrol"), ("patrol_range", "1")],
        );

        let mut xs = Vec::new();
        for _ in 0..4 {
            take_turn(&mut state, &map, id, &config);
            xs.push(state.entities.get(id).unwrap().position.x);
        }
        assert_eq!(xs, vec![5, 4, 3, 4]);

        let entity = state.entities.get(id).unwrap();
        assert_eq!(entity.properties.get(ORIGIN_X), Some("4"));
        assert_eq!(entity.properties.get(HEADING), Some("1"));
    }

    #[test]
    fn boxed_in_patroller_idles() {
        let config = GameConfig::default();
        let mut map = map();
        map.set_cell(0, Position::new(3, 4), "rock");
        map.set_cell(0, Position::new(5, 4), "rock");
        let mut state = state(Position::new(9, 9));
        let id = spawn(
            &mut state,
            Position::new(4, 4),
            &[("behavior", "patrol")],
        );

        take_turn(&mut state, &map, id, &config);
        assert_eq!(state.entities.get(id).unwrap().position, Position::new(4, 4));
    }

    #[test]
    fn sight_bound_chaser_waits_behind_walls() {
        let config = GameConfig::default();
        let mut map = map();
        map.set_cell(0, Position::new(3, 2), "rock");
        let mut state = state(Position::new(5, 2));
        let id = spawn(
            &mut state,
            Position::new(1, 2),
            &[("behavior", "chase_patrol"), ("requires_sight", "true"), ("patrol_axis", "y")],
        );

        take_turn(&mut state, &map, id, &config);
        // no sight, so it patrols along y instead of chasing along x
        assert_eq!(state.entities.get(id).unwrap().position, Position::new(1, 3));
    }
}
