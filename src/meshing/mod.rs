//! # Meshing Module
//!
//! Converts a chunk volume into a renderable triangle mesh: one quad per
//! exposed face, no merging. For every non-air voxel up to one step above
//! the column's cached surface, each of the six face directions is tested
//! for visibility and a translated copy of the static face template is
//! appended to the buffers.
//!
//! ## Face visibility
//!
//! A face pointing outside the chunk's horizontal bounds is always
//! visible; chunk boundaries are never inspected against neighboring
//! chunks. A face pointing below y=0 is never visible. Any other face is
//! visible exactly when the neighboring voxel is air (with vertical
//! out-of-range reads counting as air).

pub mod face;

use crate::terrain::HeightField;
use crate::world::block::block_side::BlockSide;
use crate::world::block::block_type::BlockType;
use crate::world::block::FaceTint;
use crate::world::chunk::ChunkVolume;

/// CPU-side triangle mesh for one chunk.
///
/// The four buffers are parallel per vertex (except `indices`): four
/// vertices and six indices per emitted face. A mesh is derived data and
/// is rebuilt wholesale whenever the owning volume's visible-face set
/// changes; it is never diffed or patched.
#[derive(Debug, Clone, Default)]
pub struct ChunkMesh {
    /// Vertex positions in chunk-local space.
    pub positions: Vec<[f32; 3]>,
    /// Triangle indices into the vertex buffers.
    pub indices: Vec<u32>,
    /// Texture coordinates, one per vertex.
    pub uvs: Vec<[f32; 2]>,
    /// RGBA vertex colors, one per vertex.
    pub colors: Vec<[u8; 4]>,
}

impl ChunkMesh {
    /// Number of quad faces in the mesh.
    pub fn face_count(&self) -> usize {
        self.positions.len() / 4
    }

    /// Raw bytes of the position buffer, for renderer upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Raw bytes of the index buffer, for renderer upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Raw bytes of the UV buffer, for renderer upload.
    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }

    /// Raw bytes of the vertex color buffer, for renderer upload.
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }
}

/// Builds chunk meshes, reusing scratch buffers across rebuilds.
///
/// The builder owns a scratch arena with clear/reserve semantics so that
/// repeated rebuilds of similarly sized chunks do not reallocate. The
/// finished geometry is copied out into a fresh [`ChunkMesh`] that
/// replaces the chunk's previous mesh wholesale.
pub struct MeshBuilder {
    positions: Vec<[f32; 3]>,
    indices: Vec<u32>,
    uvs: Vec<[f32; 2]>,
    colors: Vec<[u8; 4]>,
}

impl MeshBuilder {
    /// Creates a builder with empty scratch buffers.
    pub fn new() -> Self {
        MeshBuilder {
            positions: Vec::new(),
            indices: Vec::new(),
            uvs: Vec::new(),
            colors: Vec::new(),
        }
    }

    /// Converts a chunk volume into a mesh.
    ///
    /// The height field resolves grass tints; everything else comes from
    /// the volume and the block profile table.
    pub fn build(&mut self, volume: &ChunkVolume, field: &HeightField) -> ChunkMesh {
        let size = volume.size();
        let estimated_faces = size * size * 3;
        self.positions.clear();
        self.positions.reserve(estimated_faces * 4);
        self.indices.clear();
        self.indices.reserve(estimated_faces * 6);
        self.uvs.clear();
        self.uvs.reserve(estimated_faces * 4);
        self.colors.clear();
        self.colors.reserve(estimated_faces * 4);

        for x in 0..size {
            for z in 0..size {
                let surface = volume.surface_height(x, z);
                for y in 0..volume.height() {
                    // Heights above the cached surface are air; stop the
                    // vertical scan one step past it.
                    if surface + 1 < y as i32 {
                        break;
                    }
                    let block = volume.block(x, y, z);
                    if block == BlockType::AIR {
                        continue;
                    }
                    self.emit_voxel(volume, field, block, x, y, z);
                }
            }
        }

        ChunkMesh {
            positions: self.positions.clone(),
            indices: self.indices.clone(),
            uvs: self.uvs.clone(),
            colors: self.colors.clone(),
        }
    }

    fn emit_voxel(
        &mut self,
        volume: &ChunkVolume,
        field: &HeightField,
        block: BlockType,
        x: usize,
        y: usize,
        z: usize,
    ) {
        let color = face_color(volume, field, block, x, z);
        for side in BlockSide::all() {
            if is_face_visible(volume, x as i32, y as i32, z as i32, side) {
                self.emit_face(side, x, y, z, color);
            }
        }
    }

    fn emit_face(&mut self, side: BlockSide, x: usize, y: usize, z: usize, color: [u8; 4]) {
        let template = face::template(side);
        let base = self.positions.len() as u32;

        for corner in &template.vertices {
            self.positions.push([
                corner[0] + x as f32,
                corner[1] + y as f32,
                corner[2] + z as f32,
            ]);
        }
        for index in &template.triangles {
            self.indices.push(base + index);
        }
        for uv in &template.uv {
            self.uvs.push(*uv);
        }
        for _ in 0..4 {
            self.colors.push(color);
        }
    }
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the given face of the voxel at (x, y, z) must be emitted.
fn is_face_visible(volume: &ChunkVolume, x: i32, y: i32, z: i32, side: BlockSide) -> bool {
    let normal = side.normal();
    let (nx, ny, nz) = (x + normal.x, y + normal.y, z + normal.z);

    // Never render faces under the chunk floor.
    if ny < 0 {
        return false;
    }

    // Faces at the chunk's horizontal boundary are always visible; the
    // neighboring chunk is deliberately never consulted.
    let size = volume.size() as i32;
    if nx < 0 || nx >= size || nz < 0 || nz >= size {
        return true;
    }

    volume.block_or_air(nx, ny, nz) == BlockType::AIR
}

/// Resolves the color shared by the four vertices of every face of a
/// voxel, according to the block's tint policy.
fn face_color(
    volume: &ChunkVolume,
    field: &HeightField,
    block: BlockType,
    x: usize,
    z: usize,
) -> [u8; 4] {
    match block.profile().tint {
        FaceTint::Transparent => [0, 0, 0, 0],
        FaceTint::Fixed(color) => color,
        FaceTint::ColorNoise => {
            let origin = volume.origin();
            field.surface_color(origin.x + x as i32, origin.y + z as i32)
        }
    }
}
