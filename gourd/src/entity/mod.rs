use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use arc_swap::ArcSwap;
use crossbeam::atomic::AtomicCell;
use gourd_data::block_properties::HorizontalFacing;
use gourd_data::entity::{EntityPose, EntityType};
use gourd_util::math::boundingbox::BoundingBox;
use gourd_util::math::position::BlockPos;
use gourd_util::math::vector3::Vector3;
use uuid::Uuid;

use crate::world::World;

use self::living::LivingEntity;
use self::mob::MobEntity;
use self::player::Player;

pub mod living;
pub mod mob;
pub mod player;

static CURRENT_ID: AtomicI32 = AtomicI32::new(0);

/// State shared by every entity in a world.
pub struct Entity {
    /// A unique network identifier, assigned at construction.
    pub entity_id: i32,
    pub entity_uuid: Uuid,
    pub entity_type: &'static EntityType,
    /// The world this entity currently lives in.
    pub world: ArcSwap<World>,
    /// The entity's position, at its feet.
    pub pos: AtomicCell<Vector3<f64>>,
    /// Horizontal rotation in degrees.
    pub yaw: AtomicCell<f32>,
    /// Vertical rotation in degrees.
    pub pitch: AtomicCell<f32>,
    pub pose: AtomicCell<EntityPose>,
    pub velocity: AtomicCell<Vector3<f64>>,
}

impl Entity {
    pub fn new(
        entity_type: &'static EntityType,
        world: Arc<World>,
        position: Vector3<f64>,
    ) -> Self {
        Self {
            entity_id: CURRENT_ID.fetch_add(1, Ordering::Relaxed),
            entity_uuid: Uuid::new_v4(),
            entity_type,
            world: ArcSwap::from(world),
            pos: AtomicCell::new(position),
            yaw: AtomicCell::new(0.0),
            pitch: AtomicCell::new(0.0),
            pose: AtomicCell::new(EntityPose::Standing),
            velocity: AtomicCell::new(Vector3::new(0.0, 0.0, 0.0)),
        }
    }

    #[must_use]
    pub fn world(&self) -> Arc<World> {
        self.world.load_full()
    }

    pub fn set_pos(&self, new_position: Vector3<f64>) {
        self.pos.store(new_position);
    }

    /// The block position the entity's feet are in.
    #[must_use]
    pub fn block_pos(&self) -> BlockPos {
        BlockPos::floored_v(self.pos.load())
    }

    #[must_use]
    pub fn get_eye_pos(&self) -> Vector3<f64> {
        let pos = self.pos.load();
        Vector3::new(
            pos.x,
            pos.y + f64::from(self.entity_type.dimensions.eye_height),
            pos.z,
        )
    }

    /// The cardinal direction the entity is looking towards.
    #[must_use]
    pub fn get_horizontal_facing(&self) -> HorizontalFacing {
        let adjusted_yaw = f64::from(self.yaw.load()).rem_euclid(360.0);

        match adjusted_yaw {
            0.0..=45.0 | 315.0..=360.0 => HorizontalFacing::South,
            45.0..=135.0 => HorizontalFacing::West,
            135.0..=225.0 => HorizontalFacing::North,
            225.0..=315.0 => HorizontalFacing::East,
            _ => HorizontalFacing::South,
        }
    }

    pub fn add_velocity(&self, delta: Vector3<f64>) {
        self.velocity.store(self.velocity.load().add(&delta));
    }

    pub fn set_pose(&self, pose: EntityPose) {
        self.pose.store(pose);
    }

    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        let pos = self.pos.load();
        BoundingBox::new_from_pos(pos.x, pos.y, pos.z, &self.entity_type.dimensions)
    }
}

/// Anything a world can hold as an entity.
pub trait EntityBase: Send + Sync {
    fn get_entity(&self) -> &Entity;

    fn get_living_entity(&self) -> Option<&LivingEntity> {
        None
    }

    fn get_player(&self) -> Option<&Player> {
        None
    }
}

/// Creates a living entity of the given type at the given position.
#[must_use]
pub fn from_type(
    entity_type: &'static EntityType,
    world: Arc<World>,
    position: Vector3<f64>,
) -> Arc<MobEntity> {
    Arc::new(MobEntity::new(entity_type, world, position))
}
