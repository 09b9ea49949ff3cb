use crossbeam::atomic::AtomicCell;
use gourd_data::damage::DamageType;
use tracing::debug;

use super::Entity;

/// An entity that has health and can take damage.
pub struct LivingEntity {
    pub entity: Entity,
    pub health: AtomicCell<f32>,
}

impl LivingEntity {
    pub fn new(entity: Entity) -> Self {
        let health = entity.entity_type.max_health;
        Self {
            entity,
            health: AtomicCell::new(health),
        }
    }

    /// Applies damage, clamping health at zero.
    pub async fn damage(&self, amount: f32, damage_type: &DamageType) {
        if amount <= 0.0 {
            return;
        }
        let health = (self.health.load() - amount).max(0.0);
        self.health.store(health);
        debug!(
            "{} took {amount} {} damage, {health} health left",
            self.entity.entity_type.name, damage_type.message_id
        );
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health.load() > 0.0
    }
}
