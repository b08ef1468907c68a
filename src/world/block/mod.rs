//! # Block Module
//!
//! Block type definitions, block face handling, and the per-type behavior
//! table. Block behavior lives in a static array indexed by block ordinal,
//! so adding a block type is a data change rather than a control-flow
//! change.

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in storage.
pub type BlockTypeSize = u8;

/// How the four vertices of a block face are tinted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceTint {
    /// Fully transparent. Air uses this; its faces are never emitted.
    Transparent,

    /// Tint resolved from the world's color noise at the voxel's world
    /// coordinates.
    ColorNoise,

    /// A fixed RGBA tint.
    Fixed([u8; 4]),
}

/// Per-type block behavior.
#[derive(Debug, Clone, Copy)]
pub struct BlockProfile {
    /// Seconds of continuous mining needed to break the block.
    pub seconds_to_break: f32,

    /// Face tint policy used by the mesh builder.
    pub tint: FaceTint,
}

/// Behavior table indexed by block ordinal.
///
/// The order matches the `BlockType` variant order:
/// [AIR, GRASS, STONE, SNOW].
pub static BLOCK_PROFILES: [BlockProfile; 4] = [
    BlockProfile {
        seconds_to_break: 0.0,
        tint: FaceTint::Transparent,
    },
    BlockProfile {
        seconds_to_break: 1.0,
        tint: FaceTint::ColorNoise,
    },
    BlockProfile {
        seconds_to_break: 2.0,
        tint: FaceTint::Fixed([64, 64, 89, 255]),
    },
    BlockProfile {
        seconds_to_break: 0.5,
        tint: FaceTint::Fixed([255, 255, 255, 255]),
    },
];
