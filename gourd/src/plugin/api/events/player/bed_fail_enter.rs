use std::sync::Arc;

use gourd_data::Block;
use gourd_macros::{Event, cancellable};
use gourd_util::math::position::BlockPos;
use gourd_util::text::TextComponent;

use crate::entity::player::Player;
use crate::plugin::block::BlockEvent;

use super::PlayerEvent;

/// Why a sleep attempt was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BedFailReason {
    /// The dimension does not allow beds at all; using one makes it explode.
    NotPossibleHere,
    /// Sleeping is not possible right now, e.g. it is neither night nor a
    /// thunderstorm.
    NotPossibleNow,
    /// The player is too far away from the bed.
    TooFarAway,
    /// The block above the bed blocks entry.
    Obstructed,
    /// Any other problem, e.g. the bed is already occupied.
    OtherProblem,
    /// Hostile monsters are near the bed.
    NotSafe,
}

/// An event that occurs when a player tried to enter a bed and the attempt
/// was rejected.
///
/// By the time handlers run, the attempt has already failed; only the
/// follow-up effects are still undecided. After the last handler returns,
/// the server reads `will_explode` and `message` back and applies them.
/// Cancelling suppresses those follow-up effects, not the failure itself:
/// the player stays out of the bed either way.
#[cancellable]
#[derive(Event, Clone)]
pub struct PlayerBedFailEnterEvent {
    /// The player whose sleep attempt failed.
    pub player: Arc<Player>,

    /// Why the attempt was rejected.
    pub fail_reason: BedFailReason,

    /// The bed block that was used.
    pub block: &'static Block,

    /// The position of the bed's head half.
    pub bed_position: BlockPos,

    /// Whether the bed will explode once handlers return.
    pub will_explode: bool,

    /// The message shown to the player afterwards. `None` shows nothing.
    pub message: Option<TextComponent>,
}

impl PlayerBedFailEnterEvent {
    #[must_use]
    pub const fn new(
        player: Arc<Player>,
        fail_reason: BedFailReason,
        block: &'static Block,
        bed_position: BlockPos,
        will_explode: bool,
        message: Option<TextComponent>,
    ) -> Self {
        Self {
            player,
            fail_reason,
            block,
            bed_position,
            will_explode,
            message,
            cancelled: false,
        }
    }
}

impl PlayerEvent for PlayerBedFailEnterEvent {
    fn get_player(&self) -> &Arc<Player> {
        &self.player
    }
}

impl BlockEvent for PlayerBedFailEnterEvent {
    fn get_block(&self) -> &Block {
        self.block
    }
}
