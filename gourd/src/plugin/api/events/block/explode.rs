use gourd_data::Block;
use gourd_macros::{Event, cancellable};
use gourd_util::math::position::BlockPos;

use super::BlockEvent;

/// An event that occurs when a block explodes.
///
/// Handlers may shrink or extend the block list; only the positions left in
/// it when dispatch finishes are destroyed.
#[cancellable]
#[derive(Event, Clone)]
pub struct BlockExplodeEvent {
    /// The block that caused the explosion.
    pub block: &'static Block,

    /// The position of the block that caused the explosion.
    pub block_position: BlockPos,

    /// The world the explosion occurs in.
    pub world_uuid: uuid::Uuid,

    /// The blocks the explosion is about to destroy.
    pub blocks: Vec<BlockPos>,

    /// The chance for each destroyed block to drop as an item (0.0 - 1.0).
    pub yield_rate: f32,
}

impl BlockExplodeEvent {
    #[must_use]
    pub const fn new(
        block: &'static Block,
        block_position: BlockPos,
        world_uuid: uuid::Uuid,
        blocks: Vec<BlockPos>,
        yield_rate: f32,
    ) -> Self {
        Self {
            block,
            block_position,
            world_uuid,
            blocks,
            yield_rate,
            cancelled: false,
        }
    }
}

impl BlockEvent for BlockExplodeEvent {
    fn get_block(&self) -> &Block {
        self.block
    }
}
