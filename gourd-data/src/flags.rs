use bitflags::bitflags;

bitflags! {
    /// Flags controlling how a block-state write propagates.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct BlockFlags: u32 {
        const NOTIFY_NEIGHBORS = 1 << 0;
        const NOTIFY_LISTENERS = 1 << 1;
        /// Suppresses item drops when a block is destroyed.
        const SKIP_DROPS = 1 << 2;
        /// The block is being relocated rather than replaced.
        const MOVED = 1 << 3;
        /// Suppresses the placed callback of the written block.
        const SKIP_BLOCK_ADDED_CALLBACK = 1 << 4;

        const NOTIFY_ALL = Self::NOTIFY_NEIGHBORS.bits() | Self::NOTIFY_LISTENERS.bits();
    }
}
