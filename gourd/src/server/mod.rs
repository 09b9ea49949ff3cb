use std::sync::Arc;

use gourd_config::BasicConfiguration;
use gourd_data::dimension::Dimension;
use gourd_util::math::vector3::Vector3;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::block::registry::{BlockRegistry, default_registry};
use crate::entity::player::{GameProfile, Player};
use crate::plugin::PluginManager;
use crate::world::World;

/// Where newly created players appear.
const SPAWN_POSITION: Vector3<f64> = Vector3::new(0.5, 64.0, 0.5);

/// The game server: its worlds, its players and the plugin system.
pub struct Server {
    pub basic_config: BasicConfiguration,
    pub plugin_manager: Arc<PluginManager>,
    pub block_registry: Arc<BlockRegistry>,
    worlds: RwLock<Vec<Arc<World>>>,
}

impl Server {
    #[must_use]
    pub fn new(basic_config: BasicConfiguration) -> Arc<Self> {
        Arc::new(Self {
            basic_config,
            plugin_manager: Arc::new(PluginManager::new()),
            block_registry: default_registry(),
            worlds: RwLock::new(Vec::new()),
        })
    }

    /// Creates an empty world for `dimension` and adds it to the server.
    pub async fn create_world(self: &Arc<Self>, dimension: Dimension) -> Arc<World> {
        let world = Arc::new(World::new(
            dimension,
            self.block_registry.clone(),
            Arc::downgrade(self),
        ));
        self.worlds.write().await.push(world.clone());
        info!("Created world {}", dimension.name);
        world
    }

    pub async fn worlds(&self) -> Vec<Arc<World>> {
        self.worlds.read().await.clone()
    }

    /// Creates a player at the spawn point of `world` and adds them to it.
    ///
    /// The player starts in the configured default game mode.
    pub async fn create_player(&self, world: &Arc<World>, name: &str) -> Arc<Player> {
        let player = Arc::new(Player::new(
            GameProfile {
                id: Uuid::new_v4(),
                name: name.to_string(),
            },
            world.clone(),
            SPAWN_POSITION,
            self.basic_config.default_gamemode,
        ));
        world.add_player(player.clone()).await;
        info!("{} joined {}", name, world.dimension.name);
        player
    }

    /// Finds an online player by name, across all worlds.
    pub async fn get_player_by_name(&self, name: &str) -> Option<Arc<Player>> {
        for world in self.worlds.read().await.iter() {
            if let Some(player) = world.get_player_by_name(name).await {
                return Some(player);
            }
        }
        None
    }

    pub async fn get_player_by_uuid(&self, uuid: Uuid) -> Option<Arc<Player>> {
        for world in self.worlds.read().await.iter() {
            if let Some(player) = world.get_player_by_uuid(uuid).await {
                return Some(player);
            }
        }
        None
    }

    /// Advances every world one tick.
    pub async fn tick(&self) {
        for world in self.worlds().await {
            world.tick().await;
        }
    }
}
