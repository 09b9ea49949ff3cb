use std::sync::Arc;

use gourd_data::entity::EntityType;
use gourd_util::math::vector3::Vector3;

use crate::world::World;

use super::living::LivingEntity;
use super::{Entity, EntityBase};

/// A computer-controlled living entity.
pub struct MobEntity {
    pub living_entity: LivingEntity,
}

impl MobEntity {
    pub fn new(
        entity_type: &'static EntityType,
        world: Arc<World>,
        position: Vector3<f64>,
    ) -> Self {
        Self {
            living_entity: LivingEntity::new(Entity::new(entity_type, world, position)),
        }
    }
}

impl EntityBase for MobEntity {
    fn get_entity(&self) -> &Entity {
        &self.living_entity.entity
    }

    fn get_living_entity(&self) -> Option<&LivingEntity> {
        Some(&self.living_entity)
    }
}
