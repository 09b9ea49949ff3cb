use std::sync::Arc;

use crossbeam::atomic::AtomicCell;
use gourd_data::dimension::Dimension;
use gourd_data::entity::{EntityPose, EntityType};
use gourd_data::tag::block_has_tag;
use gourd_util::GameMode;
use gourd_util::math::position::BlockPos;
use gourd_util::math::vector3::Vector3;
use gourd_util::text::TextComponent;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::block::blocks::bed::BedBlock;
use crate::plugin::player::bed_leave::PlayerBedLeaveEvent;
use crate::world::World;

use super::living::LivingEntity;
use super::{Entity, EntityBase};

#[derive(Clone, Debug)]
pub struct GameProfile {
    pub id: Uuid,
    pub name: String,
}

/// Where a player respawns, as set by sleeping in a bed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RespawnPoint {
    pub dimension: Dimension,
    pub position: BlockPos,
    pub yaw: f32,
    pub pitch: f32,
}

pub struct Player {
    pub living_entity: LivingEntity,
    pub gameprofile: GameProfile,
    pub gamemode: AtomicCell<GameMode>,
    /// `None` falls back to the world spawn.
    pub respawn_point: AtomicCell<Option<RespawnPoint>>,
    /// Ticks spent in the current sleep, `None` while awake.
    pub sleeping_since: AtomicCell<Option<u16>>,
    /// Buffered system messages, oldest first. The flag marks overlay
    /// (action bar) messages.
    messages: Mutex<Vec<(TextComponent, bool)>>,
}

impl Player {
    pub fn new(
        gameprofile: GameProfile,
        world: Arc<World>,
        position: Vector3<f64>,
        gamemode: GameMode,
    ) -> Self {
        Self {
            living_entity: LivingEntity::new(Entity::new(&EntityType::PLAYER, world, position)),
            gameprofile,
            gamemode: AtomicCell::new(gamemode),
            respawn_point: AtomicCell::new(None),
            sleeping_since: AtomicCell::new(None),
            messages: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn position(&self) -> Vector3<f64> {
        self.living_entity.entity.pos.load()
    }

    #[must_use]
    pub fn world(&self) -> Arc<World> {
        self.living_entity.entity.world()
    }

    pub async fn send_system_message(&self, text: &TextComponent) {
        self.send_system_message_raw(text, false).await;
    }

    pub async fn send_system_message_raw(&self, text: &TextComponent, overlay: bool) {
        self.messages.lock().await.push((text.clone(), overlay));
    }

    /// Drains the buffered system messages, oldest first.
    pub async fn take_messages(&self) -> Vec<(TextComponent, bool)> {
        std::mem::take(&mut *self.messages.lock().await)
    }

    /// Updates the respawn point, returning whether it changed.
    pub fn set_respawn_point(&self, dimension: Dimension, position: BlockPos, yaw: f32) -> bool {
        let new_point = RespawnPoint {
            dimension,
            position,
            yaw,
            pitch: 0.0,
        };
        self.respawn_point.swap(Some(new_point)) != Some(new_point)
    }

    /// Lays the player down on the bed whose head is at `bed_head_pos`.
    pub async fn sleep(&self, bed_head_pos: BlockPos) {
        let entity = &self.living_entity.entity;
        entity.set_pose(EntityPose::Sleeping);
        entity.set_pos(Vector3::new(
            f64::from(bed_head_pos.0.x) + 0.5,
            f64::from(bed_head_pos.0.y) + 0.6875,
            f64::from(bed_head_pos.0.z) + 0.5,
        ));
        self.sleeping_since.store(Some(0));
    }

    /// Gets the player out of bed and frees the bed.
    ///
    /// Does nothing if the player is not sleeping. The bed is located
    /// through the respawn point; if it has been broken in the meantime
    /// there is nothing left to free.
    pub async fn wake_up(self: &Arc<Self>) {
        if self.sleeping_since.load().is_none() {
            return;
        }

        let world = self.world();
        let entity = &self.living_entity.entity;
        let bed_position = self
            .respawn_point
            .load()
            .map_or_else(|| entity.block_pos(), |point| point.position);

        let (block, state_id) = world.get_block_and_state_id(&bed_position).await;
        if block_has_tag(block, "minecraft:beds") {
            BedBlock::set_occupied(false, &world, block, &bed_position, state_id).await;
        }

        entity.set_pose(EntityPose::Standing);
        self.sleeping_since.store(None);

        if let Some(server) = world.server.upgrade() {
            let event = PlayerBedLeaveEvent::new(self.clone(), bed_position.to_f64());
            let _ = server.plugin_manager.fire::<PlayerBedLeaveEvent>(event).await;
        }
    }

    /// Advances the sleep timer. After 100 ticks the player counts as
    /// deeply asleep for the night skip.
    pub fn tick(&self) {
        if let Some(ticks) = self.sleeping_since.load() {
            if ticks < 101 {
                self.sleeping_since.store(Some(ticks + 1));
            }
        }
    }
}

impl EntityBase for Player {
    fn get_entity(&self) -> &Entity {
        &self.living_entity.entity
    }

    fn get_living_entity(&self) -> Option<&LivingEntity> {
        Some(&self.living_entity)
    }

    fn get_player(&self) -> Option<&Player> {
        Some(self)
    }
}
