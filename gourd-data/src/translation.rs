//! Translation keys sent to clients, which render them through their own
//! language tables.

pub const BLOCK_MINECRAFT_BED_NO_SLEEP: &str = "block.minecraft.bed.no_sleep";
pub const BLOCK_MINECRAFT_BED_NOT_SAFE: &str = "block.minecraft.bed.not_safe";
pub const BLOCK_MINECRAFT_BED_OBSTRUCTED: &str = "block.minecraft.bed.obstructed";
pub const BLOCK_MINECRAFT_BED_OCCUPIED: &str = "block.minecraft.bed.occupied";
pub const BLOCK_MINECRAFT_BED_TOO_FAR_AWAY: &str = "block.minecraft.bed.too_far_away";
pub const BLOCK_MINECRAFT_SET_SPAWN: &str = "block.minecraft.set_spawn";
