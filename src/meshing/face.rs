//! Static face templates for quad emission.
//!
//! Each template holds the four local-space corner offsets of a unit-cube
//! face, the six indices forming its two triangles with outward winding,
//! and the four UV corners. The mesh builder translates a template to the
//! voxel position and appends it to the growing buffers.

use crate::world::block::block_side::BlockSide;

/// Emission template for one face of a unit cube.
pub struct FaceData {
    /// Local-space corner offsets relative to the voxel's minimum corner.
    pub vertices: [[f32; 3]; 4],
    /// Indices into `vertices` forming two triangles, wound outward.
    pub triangles: [u32; 6],
    /// UV corners, one per vertex.
    pub uv: [[f32; 2]; 4],
}

const FACE_UV: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

/// Face templates indexed by `BlockSide` ordinal.
pub static FACE_TEMPLATES: [FaceData; 6] = [
    // TOP (+y)
    FaceData {
        vertices: [
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
        ],
        triangles: [0, 2, 1, 1, 2, 3],
        uv: FACE_UV,
    },
    // BOTTOM (-y)
    FaceData {
        vertices: [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
        ],
        triangles: [0, 1, 2, 3, 2, 1],
        uv: FACE_UV,
    },
    // FRONT (+z)
    FaceData {
        vertices: [
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
        ],
        triangles: [0, 1, 2, 3, 2, 1],
        uv: FACE_UV,
    },
    // BACK (-z)
    FaceData {
        vertices: [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
        ],
        triangles: [0, 2, 1, 1, 2, 3],
        uv: FACE_UV,
    },
    // RIGHT (+x)
    FaceData {
        vertices: [
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 0.0],
            [1.0, 1.0, 1.0],
        ],
        triangles: [0, 2, 1, 1, 2, 3],
        uv: FACE_UV,
    },
    // LEFT (-x)
    FaceData {
        vertices: [
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0],
            [0.0, 1.0, 1.0],
        ],
        triangles: [0, 1, 2, 3, 2, 1],
        uv: FACE_UV,
    },
];

/// Looks up the template for a face direction.
pub fn template(side: BlockSide) -> &'static FaceData {
    &FACE_TEMPLATES[side as usize]
}
