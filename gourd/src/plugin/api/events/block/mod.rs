pub mod explode;

use gourd_data::Block;

/// A trait representing events related to blocks.
pub trait BlockEvent: Send + Sync {
    /// The block involved in the event.
    fn get_block(&self) -> &Block;
}
