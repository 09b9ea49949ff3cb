use gourd_util::math::vector3::Vector3;

use crate::{Block, BlockStateId};

/// A property value set of some block family, convertible to and from the
/// block's packed state ids.
pub trait BlockProperties: Sized {
    fn to_index(&self) -> u16;
    fn from_index(index: u16) -> Self;
    /// The state id encoding these property values for `block`.
    fn to_state_id(&self, block: &Block) -> BlockStateId;
    /// Decodes the property values out of one of `block`'s state ids.
    fn from_state_id(state_id: BlockStateId, block: &Block) -> Self;
    /// The property values of the block's default state.
    fn default(block: &Block) -> Self;
}

pub trait EnumVariants: Sized {
    fn variant_count() -> u16;
    fn to_index(&self) -> u16;
    fn from_index(index: u16) -> Self;
    fn to_value(&self) -> &str;
    fn from_value(value: &str) -> Self;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HorizontalFacing {
    North,
    South,
    West,
    East,
}

impl HorizontalFacing {
    /// Unit offset towards the direction, on the horizontal plane.
    #[must_use]
    pub const fn to_offset(self) -> Vector3<i32> {
        match self {
            Self::North => Vector3 { x: 0, y: 0, z: -1 },
            Self::South => Vector3 { x: 0, y: 0, z: 1 },
            Self::West => Vector3 { x: -1, y: 0, z: 0 },
            Self::East => Vector3 { x: 1, y: 0, z: 0 },
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::East => Self::West,
        }
    }
}

impl EnumVariants for HorizontalFacing {
    fn variant_count() -> u16 {
        4
    }

    fn to_index(&self) -> u16 {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::West => 2,
            Self::East => 3,
        }
    }

    fn from_index(index: u16) -> Self {
        match index {
            0 => Self::North,
            1 => Self::South,
            2 => Self::West,
            3 => Self::East,
            _ => panic!("Invalid index: {index}"),
        }
    }

    fn to_value(&self) -> &str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::West => "west",
            Self::East => "east",
        }
    }

    fn from_value(value: &str) -> Self {
        match value {
            "north" => Self::North,
            "south" => Self::South,
            "west" => Self::West,
            "east" => Self::East,
            _ => panic!("Invalid value: {value:?}"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BedPart {
    Head,
    Foot,
}

impl EnumVariants for BedPart {
    fn variant_count() -> u16 {
        2
    }

    fn to_index(&self) -> u16 {
        match self {
            Self::Head => 0,
            Self::Foot => 1,
        }
    }

    fn from_index(index: u16) -> Self {
        match index {
            0 => Self::Head,
            1 => Self::Foot,
            _ => panic!("Invalid index: {index}"),
        }
    }

    fn to_value(&self) -> &str {
        match self {
            Self::Head => "head",
            Self::Foot => "foot",
        }
    }

    fn from_value(value: &str) -> Self {
        match value {
            "head" => Self::Head,
            "foot" => Self::Foot,
            _ => panic!("Invalid value: {value:?}"),
        }
    }
}

/// Properties shared by every bed color.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BedLikeProperties {
    pub facing: HorizontalFacing,
    pub occupied: bool,
    pub part: BedPart,
}

const BED_NAMES: &[&str] = &["white_bed", "red_bed"];

impl BlockProperties for BedLikeProperties {
    fn to_index(&self) -> u16 {
        let mut index = 0;
        let mut multiplier = 1;
        index += self.part.to_index() * multiplier;
        multiplier *= BedPart::variant_count();
        // Boolean properties enumerate true before false.
        index += u16::from(!self.occupied) * multiplier;
        multiplier *= 2;
        index += self.facing.to_index() * multiplier;
        index
    }

    fn from_index(mut index: u16) -> Self {
        Self {
            part: {
                let value = index % BedPart::variant_count();
                index /= BedPart::variant_count();
                BedPart::from_index(value)
            },
            occupied: {
                let value = index % 2;
                index /= 2;
                value == 0
            },
            facing: HorizontalFacing::from_index(index % HorizontalFacing::variant_count()),
        }
    }

    fn to_state_id(&self, block: &Block) -> BlockStateId {
        if !BED_NAMES.contains(&block.name) {
            panic!("{} is not a valid block for BedLikeProperties", &block.name);
        }
        let prop_index = self.to_index();
        if prop_index < block.states.len() as u16 {
            block.states[prop_index as usize].id
        } else {
            block.default_state.id
        }
    }

    fn from_state_id(state_id: BlockStateId, block: &Block) -> Self {
        if !BED_NAMES.contains(&block.name) {
            panic!("{} is not a valid block for BedLikeProperties", &block.name);
        }
        for (idx, state) in block.states.iter().enumerate() {
            if state.id == state_id {
                return Self::from_index(idx as u16);
            }
        }
        Self::from_state_id(block.default_state.id, block)
    }

    fn default(block: &Block) -> Self {
        if !BED_NAMES.contains(&block.name) {
            panic!("{} is not a valid block for BedLikeProperties", &block.name);
        }
        Self::from_state_id(block.default_state.id, block)
    }
}
