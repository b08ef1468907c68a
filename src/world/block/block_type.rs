//! # Block Type Module
//!
//! Defines the closed set of block types in the voxel world. The ordinal
//! order of the variants is part of the public contract: editor inventory
//! slots map 1:1 to the non-air variants by ordinal (slot 1 is GRASS,
//! slot 2 is STONE, slot 3 is SNOW).

use num_derive::FromPrimitive;

use super::{BlockProfile, BlockTypeSize, BLOCK_PROFILES};

/// Enumerates all possible block types in the voxel world.
///
/// The `FromPrimitive` derive allows conversion from integers, which backs
/// both the compact storage format and the hotbar slot mapping.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// An air block, non-solid and never meshed.
    AIR,

    /// The default surface block below the snow line. Its faces are tinted
    /// by the world's color noise.
    GRASS,

    /// The filler block of every column below the surface.
    STONE,

    /// The surface block of columns above the snow line.
    SNOW,
}

impl BlockType {
    /// Converts a stored `BlockTypeSize` back to a `BlockType`.
    ///
    /// Returns `None` when the value does not correspond to a variant.
    pub fn from_int(btype: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(btype)
    }

    /// Maps an editor inventory slot to its block type.
    ///
    /// Slot numbering starts at 1 and follows the variant ordinals:
    /// 1 is GRASS, 2 is STONE, 3 is SNOW. Slot 0 and out-of-range slots
    /// return `None`.
    pub fn from_slot(slot: u8) -> Option<Self> {
        if slot == 0 {
            return None;
        }
        num::FromPrimitive::from_u8(slot)
    }

    /// Whether this block is air.
    pub fn is_air(self) -> bool {
        self == BlockType::AIR
    }

    /// Looks up the behavior entry for this block type.
    pub fn profile(self) -> &'static BlockProfile {
        &BLOCK_PROFILES[self as usize]
    }
}
