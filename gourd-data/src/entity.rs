use gourd_util::math::boundingbox::EntityDimensions;

/// Static entity-type data for the types the server core spawns or reasons
/// about. Sizes and health values follow the vanilla registry.
pub struct EntityType {
    pub id: u16,
    pub name: &'static str,
    pub max_health: f32,
    pub dimensions: EntityDimensions,
}

impl PartialEq for EntityType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EntityType {}

impl std::fmt::Debug for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityType")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

const fn entity_type(
    id: u16,
    name: &'static str,
    max_health: f32,
    width: f32,
    height: f32,
    eye_height: f32,
) -> EntityType {
    EntityType {
        id,
        name,
        max_health,
        dimensions: EntityDimensions::new(width, height, eye_height),
    }
}

impl EntityType {
    pub const PLAYER: Self = entity_type(0, "player", 20.0, 0.6, 1.8, 1.62);
    pub const ZOMBIE: Self = entity_type(1, "zombie", 20.0, 0.6, 1.95, 1.74);
    pub const HUSK: Self = entity_type(2, "husk", 20.0, 0.6, 1.95, 1.74);
    pub const ZOMBIE_VILLAGER: Self = entity_type(3, "zombie_villager", 20.0, 0.6, 1.95, 1.74);
    pub const SKELETON: Self = entity_type(4, "skeleton", 20.0, 0.6, 1.99, 1.74);
    pub const STRAY: Self = entity_type(5, "stray", 20.0, 0.6, 1.99, 1.74);
    pub const CREEPER: Self = entity_type(6, "creeper", 20.0, 0.6, 1.7, 1.445);
    pub const SPIDER: Self = entity_type(7, "spider", 16.0, 1.4, 0.9, 0.65);
    pub const CAVE_SPIDER: Self = entity_type(8, "cave_spider", 12.0, 0.7, 0.5, 0.45);
    pub const DROWNED: Self = entity_type(9, "drowned", 20.0, 0.6, 1.95, 1.74);
    pub const ENDERMAN: Self = entity_type(10, "enderman", 40.0, 0.6, 2.9, 2.55);
    pub const WITCH: Self = entity_type(11, "witch", 26.0, 0.6, 1.95, 1.62);
    pub const PHANTOM: Self = entity_type(12, "phantom", 20.0, 0.9, 0.5, 0.175);
    pub const PILLAGER: Self = entity_type(13, "pillager", 24.0, 0.6, 1.95, 1.62);
    pub const VINDICATOR: Self = entity_type(14, "vindicator", 24.0, 0.6, 1.95, 1.62);
    pub const SILVERFISH: Self = entity_type(15, "silverfish", 8.0, 0.4, 0.3, 0.13);
    pub const WARDEN: Self = entity_type(16, "warden", 500.0, 0.9, 2.9, 2.55);
    pub const COW: Self = entity_type(17, "cow", 10.0, 0.9, 1.4, 1.3);
    pub const SHEEP: Self = entity_type(18, "sheep", 8.0, 0.9, 1.3, 1.235);
    pub const VILLAGER: Self = entity_type(19, "villager", 20.0, 0.6, 1.95, 1.62);
}

/// Body poses an entity can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EntityPose {
    #[default]
    Standing,
    Sleeping,
}
