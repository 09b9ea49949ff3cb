use std::sync::Arc;

use gourd_data::flags::BlockFlags;
use gourd_data::{Block, BlockState, BlockStateId};
use gourd_util::math::position::BlockPos;
use rustc_hash::FxHashMap;

use crate::entity::player::Player;
use crate::server::Server;
use crate::world::{BlockAccessor, World};

use super::blocks::bed::BedBlock;
use super::{
    BlockActionResult, BlockBehaviour, BlockMetadata, BrokenArgs, CanPlaceAtArgs, NormalUseArgs,
    OnPlaceArgs, OnStateReplacedArgs, PlacedArgs,
};

/// Maps block ids to their registered server-side behaviour.
#[derive(Default)]
pub struct BlockRegistry {
    blocks: FxHashMap<u16, Arc<dyn BlockBehaviour>>,
}

/// The block behaviours the server ships with.
#[must_use]
pub fn default_registry() -> Arc<BlockRegistry> {
    let mut registry = BlockRegistry::default();
    registry.register(BedBlock);
    Arc::new(registry)
}

impl BlockRegistry {
    pub fn register<T: BlockBehaviour + BlockMetadata + 'static>(&mut self, block: T) {
        let behaviour: Arc<dyn BlockBehaviour> = Arc::new(block);
        for id in T::ids().iter().copied() {
            self.blocks.insert(id, behaviour.clone());
        }
    }

    #[must_use]
    pub fn get_block_behaviour(&self, block: &Block) -> Option<&Arc<dyn BlockBehaviour>> {
        self.blocks.get(&block.id)
    }

    pub async fn on_use(
        &self,
        block: &'static Block,
        player: &Arc<Player>,
        position: &BlockPos,
        server: &Arc<Server>,
        world: &Arc<World>,
    ) -> BlockActionResult {
        if let Some(behaviour) = self.blocks.get(&block.id) {
            return behaviour
                .normal_use(NormalUseArgs {
                    server,
                    world,
                    block,
                    position,
                    player,
                })
                .await;
        }
        BlockActionResult::Pass
    }

    pub async fn can_place_at(
        &self,
        block_accessor: &dyn BlockAccessor,
        block: &'static Block,
        position: &BlockPos,
        player: Option<&Player>,
    ) -> bool {
        if let Some(behaviour) = self.blocks.get(&block.id) {
            return behaviour
                .can_place_at(CanPlaceAtArgs {
                    block_accessor,
                    block,
                    position,
                    player,
                })
                .await;
        }
        true
    }

    /// Runs the placement flow for a player-placed block: target check,
    /// behaviour validity check, state pick, write.
    ///
    /// Returns whether the block was placed. The write runs the placed
    /// hook, so multi-block arrangements finish themselves from there.
    pub async fn place_block(
        &self,
        world: &Arc<World>,
        player: &Arc<Player>,
        block: &'static Block,
        position: &BlockPos,
    ) -> bool {
        if !world.get_block_state(position).await.replaceable() {
            return false;
        }
        if !self
            .can_place_at(world.as_ref(), block, position, Some(player))
            .await
        {
            return false;
        }

        let state_id = if let Some(behaviour) = self.blocks.get(&block.id) {
            behaviour
                .on_place(OnPlaceArgs {
                    world,
                    block,
                    position,
                    player,
                })
                .await
        } else {
            block.default_state.id
        };

        world
            .set_block_state(position, state_id, BlockFlags::NOTIFY_ALL)
            .await;
        true
    }

    pub async fn on_placed(
        &self,
        world: &Arc<World>,
        block: &'static Block,
        state_id: BlockStateId,
        old_state_id: BlockStateId,
        position: &BlockPos,
    ) {
        if let Some(behaviour) = self.blocks.get(&block.id) {
            behaviour
                .placed(PlacedArgs {
                    world,
                    block,
                    state_id,
                    old_state_id,
                    position,
                })
                .await;
        }
    }

    pub async fn broken(
        &self,
        world: &Arc<World>,
        block: &'static Block,
        cause: Option<Arc<Player>>,
        position: &BlockPos,
        server: &Arc<Server>,
        state: &'static BlockState,
        flags: BlockFlags,
    ) {
        if let Some(behaviour) = self.blocks.get(&block.id) {
            behaviour
                .broken(BrokenArgs {
                    block,
                    player: cause.as_ref(),
                    position,
                    server,
                    world,
                    state,
                    flags,
                })
                .await;
        }
    }

    pub async fn on_state_replaced(
        &self,
        world: &Arc<World>,
        block: &'static Block,
        old_state_id: BlockStateId,
        position: &BlockPos,
        moved: bool,
    ) {
        if let Some(behaviour) = self.blocks.get(&block.id) {
            behaviour
                .on_state_replaced(OnStateReplacedArgs {
                    world,
                    block,
                    old_state_id,
                    position,
                    moved,
                })
                .await;
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::{Arc, Weak};

    use gourd_data::Block;
    use gourd_data::dimension::Dimension;
    use gourd_util::GameMode;
    use gourd_util::math::position::BlockPos;
    use gourd_util::math::vector3::Vector3;
    use uuid::Uuid;

    use crate::entity::player::{GameProfile, Player};
    use crate::world::World;

    use super::default_registry;

    #[test]
    fn the_default_registry_covers_every_bed_color() {
        let registry = default_registry();
        assert!(registry.get_block_behaviour(&Block::WHITE_BED).is_some());
        assert!(registry.get_block_behaviour(&Block::RED_BED).is_some());
        assert!(registry.get_block_behaviour(&Block::STONE).is_none());
    }

    #[tokio::test]
    async fn placement_needs_a_replaceable_target() {
        let registry = default_registry();
        let world = Arc::new(World::new(
            Dimension::OVERWORLD,
            registry.clone(),
            Weak::new(),
        ));
        let player = Arc::new(Player::new(
            GameProfile {
                id: Uuid::new_v4(),
                name: "steve".to_string(),
            },
            world.clone(),
            Vector3::new(0.5, 64.0, 0.5),
            GameMode::Survival,
        ));

        let position = BlockPos::new(0, 64, 3);
        assert!(
            registry
                .place_block(&world, &player, &Block::STONE, &position)
                .await
        );
        assert_eq!(world.get_block(&position).await, &Block::STONE);

        // The spot is taken now.
        assert!(
            !registry
                .place_block(&world, &player, &Block::DIRT, &position)
                .await
        );
        assert_eq!(world.get_block(&position).await, &Block::STONE);
    }
}
