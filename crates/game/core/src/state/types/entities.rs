use super::{EntityId, Position, PropertyBag};
use crate::env::EntityType;

/// Arena of live entity instances on the current map.
///
/// Instances are addressed by [`EntityId`] (their arena index). Deactivated
/// instances stay in place so indices remain valid until the map is rebuilt.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntitiesState {
    instances: Vec<EntityInstance>,
}

impl EntitiesState {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends an instance and returns its arena index.
    pub fn spawn(&mut self, instance: EntityInstance) -> EntityId {
        let id = EntityId(self.instances.len() as u32);
        self.instances.push(instance);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&EntityInstance> {
        self.instances.get(id.index())
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut EntityInstance> {
        self.instances.get_mut(id.index())
    }

    /// Looks an instance up by its authored id.
    pub fn find(&self, authored_id: &str) -> Option<(EntityId, &EntityInstance)> {
        self.iter().find(|(_, entity)| entity.id == authored_id)
    }

    /// First active instance standing on `position`.
    pub fn active_at(&self, position: Position) -> Option<(EntityId, &EntityInstance)> {
        self.iter_active().find(|(_, entity)| entity.position == position)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &EntityInstance)> {
        self.instances
            .iter()
            .enumerate()
            .map(|(index, entity)| (EntityId(index as u32), entity))
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (EntityId, &EntityInstance)> {
        self.iter().filter(|(_, entity)| entity.is_active)
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + use<> {
        (0..self.instances.len() as u32).map(EntityId)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// A placed object built from a group definition plus placement overrides.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityInstance {
    /// Authored placement id, stable across visits.
    pub id: String,
    /// Group (definition) name.
    pub group: String,
    pub position: Position,
    pub properties: PropertyBag,
    pub is_active: bool,
    /// Declared type of the group; `None` for purely decorative entities.
    pub entity_type: Option<EntityType>,
    /// Whether the group is flagged SOLID.
    pub solid: bool,
}

impl EntityInstance {
    pub fn new(
        id: impl Into<String>,
        group: impl Into<String>,
        position: Position,
        properties: PropertyBag,
    ) -> Self {
        Self {
            id: id.into(),
            group: group.into(),
            position,
            properties,
            is_active: true,
            entity_type: None,
            solid: false,
        }
    }

    pub fn with_type(mut self, entity_type: Option<EntityType>, solid: bool) -> Self {
        self.entity_type = entity_type;
        self.solid = solid;
        self
    }

    pub fn is(&self, entity_type: EntityType) -> bool {
        self.entity_type == Some(entity_type)
    }

    /// Whether the player is stopped by this entity.
    ///
    /// NPCs and interactables always block; anything else only when its group
    /// is solid or it sets `blocking=true`.
    pub fn blocks_player(&self) -> bool {
        match self.entity_type {
            Some(EntityType::Npc | EntityType::Interactable) => true,
            _ => self.solid || self.properties.get_bool("blocking", false),
        }
    }

    /// Display name: the `name` property, else the group name.
    pub fn name(&self) -> &str {
        self.properties.get_str("name").unwrap_or(&self.group)
    }

    pub fn health(&self) -> i32 {
        self.properties.get_i32("health", 0)
    }

    pub fn max_health(&self) -> i32 {
        self.properties.get_i32("max_health", self.health())
    }

    pub fn has_behavior(&self) -> bool {
        self.properties.get_str("behavior").is_some()
    }
}
