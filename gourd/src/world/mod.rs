use std::sync::{Arc, Weak};

use gourd_data::dimension::Dimension;
use gourd_data::flags::BlockFlags;
use gourd_data::game_rules::GameRules;
use gourd_data::{Block, BlockState, BlockStateId};
use gourd_util::math::boundingbox::BoundingBox;
use gourd_util::math::position::BlockPos;
use gourd_util::math::vector3::Vector3;
use rustc_hash::FxHashMap;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::block::registry::BlockRegistry;
use crate::entity::EntityBase;
use crate::entity::player::Player;
use crate::plugin::BoxFuture;
use crate::server::Server;

use self::explosion::Explosion;
use self::time::LevelTime;
use self::weather::Weather;

pub mod explosion;
pub mod time;
pub mod weather;

/// Night starts once beds accept sleepers in clear weather.
const NIGHT_START: i64 = 12542;

/// Read access to the blocks of a world.
pub trait BlockAccessor: Send + Sync {
    fn get_block_state<'a>(&'a self, position: &'a BlockPos) -> BoxFuture<'a, &'static BlockState>;
}

/// An in-memory world: a sparse block store plus the entities living in it.
pub struct World {
    pub uuid: Uuid,
    pub dimension: Dimension,
    pub block_registry: Arc<BlockRegistry>,
    /// Back-reference to the owning server, if any.
    pub server: Weak<Server>,
    /// Positions absent from the map are air.
    blocks: RwLock<FxHashMap<BlockPos, BlockStateId>>,
    players: RwLock<Vec<Arc<Player>>>,
    entities: RwLock<Vec<Arc<dyn EntityBase>>>,
    pub level_time: Mutex<LevelTime>,
    pub weather: Mutex<Weather>,
    pub game_rules: RwLock<GameRules>,
}

impl World {
    #[must_use]
    pub fn new(
        dimension: Dimension,
        block_registry: Arc<BlockRegistry>,
        server: Weak<Server>,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            dimension,
            block_registry,
            server,
            blocks: RwLock::new(FxHashMap::default()),
            players: RwLock::new(Vec::new()),
            entities: RwLock::new(Vec::new()),
            level_time: Mutex::new(LevelTime::new()),
            weather: Mutex::new(Weather::new()),
            game_rules: RwLock::new(GameRules::default()),
        }
    }

    pub async fn add_player(&self, player: Arc<Player>) {
        self.players.write().await.push(player);
    }

    pub async fn remove_player(&self, uuid: Uuid) -> Option<Arc<Player>> {
        let mut players = self.players.write().await;
        let index = players
            .iter()
            .position(|player| player.gameprofile.id == uuid)?;
        Some(players.remove(index))
    }

    pub async fn players(&self) -> Vec<Arc<Player>> {
        self.players.read().await.clone()
    }

    pub async fn get_player_by_uuid(&self, uuid: Uuid) -> Option<Arc<Player>> {
        self.players
            .read()
            .await
            .iter()
            .find(|player| player.gameprofile.id == uuid)
            .cloned()
    }

    pub async fn get_player_by_name(&self, name: &str) -> Option<Arc<Player>> {
        self.players
            .read()
            .await
            .iter()
            .find(|player| player.gameprofile.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    pub async fn spawn_entity(&self, entity: Arc<dyn EntityBase>) {
        self.entities.write().await.push(entity);
    }

    /// Every entity, players included, whose bounding box intersects
    /// `bounds`.
    pub async fn get_all_at_box(&self, bounds: &BoundingBox) -> Vec<Arc<dyn EntityBase>> {
        let mut found: Vec<Arc<dyn EntityBase>> = Vec::new();
        for entity in self.entities.read().await.iter() {
            if entity.get_entity().bounding_box().intersects(bounds) {
                found.push(entity.clone());
            }
        }
        for player in self.players.read().await.iter() {
            if player.get_entity().bounding_box().intersects(bounds) {
                found.push(player.clone());
            }
        }
        found
    }

    pub async fn get_block_state_id(&self, position: &BlockPos) -> BlockStateId {
        self.blocks
            .read()
            .await
            .get(position)
            .copied()
            .unwrap_or(Block::AIR.default_state.id)
    }

    pub async fn get_block_state(&self, position: &BlockPos) -> &'static BlockState {
        BlockState::from_id(self.get_block_state_id(position).await)
    }

    pub async fn get_block(&self, position: &BlockPos) -> &'static Block {
        Block::from_state_id(self.get_block_state_id(position).await)
    }

    pub async fn get_block_and_state_id(
        &self,
        position: &BlockPos,
    ) -> (&'static Block, BlockStateId) {
        let state_id = self.get_block_state_id(position).await;
        (Block::from_state_id(state_id), state_id)
    }

    /// Writes a block state and runs the hooks the change triggers.
    ///
    /// Returns the replaced state id.
    pub async fn set_block_state(
        self: &Arc<Self>,
        position: &BlockPos,
        state_id: BlockStateId,
        flags: BlockFlags,
    ) -> BlockStateId {
        let old_state_id = {
            let mut blocks = self.blocks.write().await;
            if state_id == Block::AIR.default_state.id {
                blocks.remove(position)
            } else {
                blocks.insert(*position, state_id)
            }
            .unwrap_or(Block::AIR.default_state.id)
        };

        if old_state_id == state_id {
            return old_state_id;
        }

        let old_block = Block::from_state_id(old_state_id);
        let new_block = Block::from_state_id(state_id);

        if old_block != new_block {
            let moved = flags.contains(BlockFlags::MOVED);
            self.block_registry
                .on_state_replaced(self, old_block, old_state_id, position, moved)
                .await;
        }

        if !flags.contains(BlockFlags::SKIP_BLOCK_ADDED_CALLBACK) {
            self.block_registry
                .on_placed(self, new_block, state_id, old_state_id, position)
                .await;
        }

        old_state_id
    }

    /// Removes a block, running its broken hook.
    ///
    /// The block is gone before the hook runs, so hooks that break further
    /// blocks cannot loop back into this one.
    pub async fn break_block(
        self: &Arc<Self>,
        position: &BlockPos,
        cause: Option<Arc<Player>>,
        flags: BlockFlags,
    ) {
        let (block, state_id) = self.get_block_and_state_id(position).await;
        if BlockState::from_id(state_id).is_air() {
            return;
        }

        self.set_block_state(position, Block::AIR.default_state.id, flags)
            .await;

        if let Some(server) = self.server.upgrade() {
            self.block_registry
                .broken(
                    self,
                    block,
                    cause,
                    position,
                    &server,
                    BlockState::from_id(state_id),
                    flags,
                )
                .await;
        }
    }

    pub async fn explode(self: &Arc<Self>, position: Vector3<f64>, power: f32) {
        Explosion::new(power, position).explode(self).await;
    }

    /// Whether enough players sleep to skip the night.
    ///
    /// The threshold comes from the `players_sleeping_percentage` game rule;
    /// values above 100 make the night unskippable. Only players who slept
    /// for at least 100 ticks count.
    pub async fn should_skip_night(&self) -> bool {
        let percentage = self.game_rules.read().await.players_sleeping_percentage;
        let players = self.players.read().await;
        if players.is_empty() {
            return false;
        }

        let total = players.len() as i32;
        let needed = ((f64::from(total) * f64::from(percentage)) / 100.0).ceil() as i32;
        let needed = needed.max(1);

        let sleeping = players
            .iter()
            .filter(|player| {
                player
                    .sleeping_since
                    .load()
                    .is_some_and(|ticks| ticks >= 100)
            })
            .count() as i32;

        sleeping >= needed
    }

    /// Advances the world one tick: sleep timers, time, weather, and the
    /// night skip.
    pub async fn tick(self: &Arc<Self>) {
        let players = self.players().await;
        for player in &players {
            player.tick();
        }

        let game_rules = self.game_rules.read().await.clone();
        self.level_time
            .lock()
            .await
            .tick(game_rules.do_daylight_cycle);
        if game_rules.do_weather_cycle {
            self.weather.lock().await.tick();
        }

        if self.should_skip_night().await {
            {
                let mut time = self.level_time.lock().await;
                if time.time_of_day >= NIGHT_START {
                    time.set_time(0);
                }
            }
            self.weather.lock().await.reset_weather_cycle();
            debug!("Enough players sleep, skipping the night");

            for player in players {
                player.wake_up().await;
            }
        }
    }
}

impl BlockAccessor for World {
    fn get_block_state<'a>(&'a self, position: &'a BlockPos) -> BoxFuture<'a, &'static BlockState> {
        Box::pin(async move { Self::get_block_state(self, position).await })
    }
}
