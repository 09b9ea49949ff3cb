pub mod bed_enter;
pub mod bed_fail_enter;
pub mod bed_leave;

use std::sync::Arc;

use crate::entity::player::Player;

/// A trait representing events related to players.
pub trait PlayerEvent: Send + Sync {
    /// The player associated with the event.
    fn get_player(&self) -> &Arc<Player>;
}
