use crate::Block;

/// Block tags and the block ids they contain.
static BLOCK_TAGS: &[(&str, &[u16])] = &[(
    "minecraft:beds",
    &[Block::WHITE_BED.id, Block::RED_BED.id],
)];

/// The block ids a tag names, or `None` for an unknown tag.
#[must_use]
pub fn block_ids(tag: &str) -> Option<&'static [u16]> {
    BLOCK_TAGS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, ids)| *ids)
}

/// Whether the block carries the tag.
#[must_use]
pub fn block_has_tag(block: &Block, tag: &str) -> bool {
    block_ids(tag).is_some_and(|ids| ids.contains(&block.id))
}
