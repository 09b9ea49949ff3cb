mod block;

pub mod block_properties;
pub mod damage;
pub mod dimension;
pub mod entity;
pub mod flags;
pub mod game_rules;
pub mod tag;
pub mod translation;

pub use block::{Block, BlockState};

/// The numeric id of a block state.
pub type BlockStateId = u16;
