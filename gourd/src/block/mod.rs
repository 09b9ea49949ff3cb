use std::sync::Arc;

use gourd_data::flags::BlockFlags;
use gourd_data::{Block, BlockState, BlockStateId};
use gourd_util::math::position::BlockPos;

use crate::entity::player::Player;
use crate::plugin::BoxFuture;
use crate::server::Server;
use crate::world::{BlockAccessor, World};

pub mod blocks;
pub mod registry;

pub use registry::BlockRegistry;

/// Which block ids a behaviour is registered for. Implemented by
/// `#[gourd_block_from_tag]`.
pub trait BlockMetadata {
    fn ids() -> Box<[u16]>;
}

pub struct NormalUseArgs<'a> {
    pub server: &'a Arc<Server>,
    pub world: &'a Arc<World>,
    pub block: &'static Block,
    pub position: &'a BlockPos,
    pub player: &'a Arc<Player>,
}

pub struct CanPlaceAtArgs<'a> {
    pub block_accessor: &'a dyn BlockAccessor,
    pub block: &'static Block,
    pub position: &'a BlockPos,
    pub player: Option<&'a Player>,
}

pub struct OnPlaceArgs<'a> {
    pub world: &'a Arc<World>,
    pub block: &'static Block,
    pub position: &'a BlockPos,
    pub player: &'a Arc<Player>,
}

pub struct PlacedArgs<'a> {
    pub world: &'a Arc<World>,
    pub block: &'static Block,
    pub state_id: BlockStateId,
    pub old_state_id: BlockStateId,
    pub position: &'a BlockPos,
}

pub struct BrokenArgs<'a> {
    pub block: &'static Block,
    /// The player who broke the block, if any.
    pub player: Option<&'a Arc<Player>>,
    pub position: &'a BlockPos,
    pub server: &'a Arc<Server>,
    pub world: &'a Arc<World>,
    pub state: &'static BlockState,
    /// The flags the block was broken with, `SKIP_DROPS` included.
    pub flags: BlockFlags,
}

pub struct OnStateReplacedArgs<'a> {
    pub world: &'a Arc<World>,
    pub block: &'static Block,
    pub old_state_id: BlockStateId,
    pub position: &'a BlockPos,
    pub moved: bool,
}

/// Per-block server behaviour. Every hook has a do-nothing default, so
/// implementations override only what their block reacts to.
pub trait BlockBehaviour: Send + Sync {
    /// Called when a player right-clicks the block.
    fn normal_use<'a>(&'a self, _args: NormalUseArgs<'a>) -> BoxFuture<'a, BlockActionResult> {
        Box::pin(async move { BlockActionResult::Pass })
    }

    fn can_place_at<'a>(&'a self, _args: CanPlaceAtArgs<'a>) -> BoxFuture<'a, bool> {
        Box::pin(async move { true })
    }

    /// Picks the state to place. Defaults to the block's default state.
    fn on_place<'a>(&'a self, args: OnPlaceArgs<'a>) -> BoxFuture<'a, BlockStateId> {
        Box::pin(async move { args.block.default_state.id })
    }

    /// Called after the block state has been written to the world.
    fn placed<'a>(&'a self, _args: PlacedArgs<'a>) -> BoxFuture<'a, ()> {
        Box::pin(async move {})
    }

    fn broken<'a>(&'a self, _args: BrokenArgs<'a>) -> BoxFuture<'a, ()> {
        Box::pin(async move {})
    }

    /// Called when this block is replaced by a different block.
    fn on_state_replaced<'a>(&'a self, _args: OnStateReplacedArgs<'a>) -> BoxFuture<'a, ()> {
        Box::pin(async move {})
    }
}

/// The outcome of using a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockActionResult {
    /// The interaction succeeded.
    Success,
    /// The interaction succeeded and the server decided the outcome.
    SuccessServer,
    /// The interaction was handled; stop further action.
    Consume,
    /// The block does not care; let other actions run.
    Pass,
    /// The interaction failed.
    Fail,
}

impl BlockActionResult {
    #[must_use]
    pub const fn consumes_action(self) -> bool {
        matches!(self, Self::Success | Self::SuccessServer | Self::Consume)
    }
}
