use std::hash::{Hash, Hasher};

use crate::BlockStateId;

/// One concrete state of a block, identified by a globally unique id.
///
/// State ids of a block are contiguous, so a block plus an offset into its
/// `states` slice round-trips through [`BlockState::from_id`].
#[derive(Clone, Debug)]
pub struct BlockState {
    pub id: BlockStateId,
    pub air: bool,
    pub solid: bool,
    pub replaceable: bool,
}

impl BlockState {
    #[must_use]
    pub const fn is_air(&self) -> bool {
        self.air
    }

    #[must_use]
    pub const fn is_solid(&self) -> bool {
        self.solid
    }

    #[must_use]
    pub const fn replaceable(&self) -> bool {
        self.replaceable
    }

    /// Looks up a state by id. Unknown ids resolve to the air state.
    #[must_use]
    pub fn from_id(state_id: BlockStateId) -> &'static Self {
        let block = Block::from_state_id(state_id);
        let offset = (state_id - block.states[0].id) as usize;
        block.states.get(offset).unwrap_or(&block.states[0])
    }
}

pub struct Block {
    pub id: u16,
    pub name: &'static str,
    pub blast_resistance: f32,
    pub default_state: &'static BlockState,
    pub states: &'static [BlockState],
}

impl Hash for Block {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Block {}

impl std::fmt::Debug for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Block")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

const fn bed_state(id: BlockStateId) -> BlockState {
    BlockState {
        id,
        air: false,
        solid: false,
        replaceable: false,
    }
}

const AIR_STATES: &[BlockState] = &[BlockState {
    id: 0,
    air: true,
    solid: false,
    replaceable: true,
}];

const STONE_STATES: &[BlockState] = &[BlockState {
    id: 1,
    air: false,
    solid: true,
    replaceable: false,
}];

const DIRT_STATES: &[BlockState] = &[BlockState {
    id: 2,
    air: false,
    solid: true,
    replaceable: false,
}];

const OBSIDIAN_STATES: &[BlockState] = &[BlockState {
    id: 3,
    air: false,
    solid: true,
    replaceable: false,
}];

// Bed states enumerate facing (north, south, west, east), then occupied
// (true, false), then part (head, foot), last property fastest.
const WHITE_BED_STATES: &[BlockState] = &[
    bed_state(4),
    bed_state(5),
    bed_state(6),
    bed_state(7),
    bed_state(8),
    bed_state(9),
    bed_state(10),
    bed_state(11),
    bed_state(12),
    bed_state(13),
    bed_state(14),
    bed_state(15),
    bed_state(16),
    bed_state(17),
    bed_state(18),
    bed_state(19),
];

const RED_BED_STATES: &[BlockState] = &[
    bed_state(20),
    bed_state(21),
    bed_state(22),
    bed_state(23),
    bed_state(24),
    bed_state(25),
    bed_state(26),
    bed_state(27),
    bed_state(28),
    bed_state(29),
    bed_state(30),
    bed_state(31),
    bed_state(32),
    bed_state(33),
    bed_state(34),
    bed_state(35),
];

impl Block {
    pub const AIR: Self = Self {
        id: 0,
        name: "air",
        blast_resistance: 0.0,
        default_state: &AIR_STATES[0],
        states: AIR_STATES,
    };

    pub const STONE: Self = Self {
        id: 1,
        name: "stone",
        blast_resistance: 6.0,
        default_state: &STONE_STATES[0],
        states: STONE_STATES,
    };

    pub const DIRT: Self = Self {
        id: 2,
        name: "dirt",
        blast_resistance: 0.5,
        default_state: &DIRT_STATES[0],
        states: DIRT_STATES,
    };

    pub const OBSIDIAN: Self = Self {
        id: 3,
        name: "obsidian",
        blast_resistance: 1200.0,
        default_state: &OBSIDIAN_STATES[0],
        states: OBSIDIAN_STATES,
    };

    // The default bed state is facing north, unoccupied, foot part.
    pub const WHITE_BED: Self = Self {
        id: 4,
        name: "white_bed",
        blast_resistance: 0.2,
        default_state: &WHITE_BED_STATES[3],
        states: WHITE_BED_STATES,
    };

    pub const RED_BED: Self = Self {
        id: 5,
        name: "red_bed",
        blast_resistance: 0.2,
        default_state: &RED_BED_STATES[3],
        states: RED_BED_STATES,
    };

    /// The block a given state id belongs to. Unknown ids resolve to air.
    #[must_use]
    pub fn from_state_id(state_id: BlockStateId) -> &'static Self {
        BLOCKS
            .iter()
            .find(|block| {
                let first = block.states[0].id;
                state_id >= first && state_id < first + block.states.len() as u16
            })
            .copied()
            .unwrap_or(&Self::AIR)
    }

    #[must_use]
    pub fn from_id(id: u16) -> Option<&'static Self> {
        BLOCKS.iter().find(|block| block.id == id).copied()
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<&'static Self> {
        BLOCKS.iter().find(|block| block.name == name).copied()
    }
}

pub static BLOCKS: &[&Block] = &[
    &Block::AIR,
    &Block::STONE,
    &Block::DIRT,
    &Block::OBSIDIAN,
    &Block::WHITE_BED,
    &Block::RED_BED,
];

#[cfg(test)]
mod test {
    use super::{Block, BlockState};

    #[test]
    fn state_ids_are_contiguous_and_unique() {
        let mut expected = 0;
        for block in super::BLOCKS {
            for state in block.states {
                assert_eq!(state.id, expected, "gap in state ids at {}", block.name);
                expected += 1;
            }
        }
    }

    #[test]
    fn state_id_lookup_round_trips() {
        assert_eq!(Block::from_state_id(0), &Block::AIR);
        assert_eq!(Block::from_state_id(Block::WHITE_BED.states[15].id), &Block::WHITE_BED);
        assert_eq!(Block::from_state_id(Block::RED_BED.states[0].id), &Block::RED_BED);
        // Out of range falls back to air.
        assert_eq!(Block::from_state_id(u16::MAX), &Block::AIR);
    }

    #[test]
    fn default_bed_state_is_inside_its_block() {
        let default_id = Block::WHITE_BED.default_state.id;
        assert_eq!(Block::from_state_id(default_id), &Block::WHITE_BED);
        assert!(!BlockState::from_id(default_id).is_air());
    }

    #[test]
    fn name_lookup() {
        assert_eq!(Block::from_name("red_bed"), Some(&Block::RED_BED));
        assert_eq!(Block::from_name("lava"), None);
    }
}
