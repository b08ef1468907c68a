//! # Block Side Module
//!
//! Defines the six faces of a voxel block and their outward normals, used
//! by the mesh builder for face-visibility testing.

use cgmath::Vector3;

/// The six faces of a voxel block.
///
/// The ordinal order matches the face emission order of the mesh builder
/// and indexes the static face template table.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The top face (facing positive Y)
    TOP = 0,

    /// The bottom face (facing negative Y)
    BOTTOM = 1,

    /// The front face (facing positive Z)
    FRONT = 2,

    /// The back face (facing negative Z)
    BACK = 3,

    /// The right face (facing positive X)
    RIGHT = 4,

    /// The left face (facing negative X)
    LEFT = 5,
}

impl BlockSide {
    /// Returns all six faces in emission order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::RIGHT,
            BlockSide::LEFT,
        ]
    }

    /// The outward unit normal of this face in voxel units.
    pub fn normal(self) -> Vector3<i32> {
        match self {
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
        }
    }
}
