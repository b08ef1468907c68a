//! # Chunk Volume Module
//!
//! Dense voxel storage for one chunk: a `size * height * size` block array
//! plus a per-column height-map cache of the topmost non-air voxel. The
//! height map bounds mesh-generation scans and decides the surface block
//! type; it is kept current incrementally as blocks are edited.
//!
//! A volume is created and filled once by the height field at generation
//! time; afterwards it is mutated voxel-by-voxel only through block edits.

use cgmath::Point2;

use crate::terrain::HeightField;

use super::block::block_type::BlockType;

/// Dense voxel data for one chunk.
pub struct ChunkVolume {
    coordinate: Point2<i32>,
    size: usize,
    height: usize,
    blocks: Vec<BlockType>,
    /// Highest non-air y per column. May exceed `height - 1` right after
    /// generation when the height field tops out above the chunk cap; all
    /// block accessors treat vertical out-of-range reads as air.
    height_map: Vec<i32>,
}

impl ChunkVolume {
    /// Creates a completely empty volume (all air, height map zeroed).
    pub fn empty(coordinate: Point2<i32>, size: usize) -> Self {
        let height = size * size / 2;
        ChunkVolume {
            coordinate,
            size,
            height,
            blocks: vec![BlockType::AIR; size * height * size],
            height_map: vec![0; size * size],
        }
    }

    /// Creates a volume and fills it from the height field.
    ///
    /// Each column is assigned stone up to its height, a grass or snow
    /// surface block, and air above.
    pub fn generate(coordinate: Point2<i32>, size: usize, field: &HeightField) -> Self {
        let mut volume = Self::empty(coordinate, size);
        let origin = volume.origin();

        for x in 0..size {
            for z in 0..size {
                let column_height =
                    field.height(origin.x + x as i32, origin.y + z as i32);
                for y in 0..volume.height {
                    let block = field.surface_block(y as i32, column_height);
                    if block == BlockType::AIR {
                        break;
                    }
                    let index = volume.index(x, y, z);
                    volume.blocks[index] = block;
                }
                volume.height_map[x + size * z] = column_height;
            }
        }

        volume
    }

    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.size * (z + self.size * y)
    }

    /// The chunk coordinate of this volume.
    pub fn coordinate(&self) -> Point2<i32> {
        self.coordinate
    }

    /// World-space origin of the chunk on the horizontal plane. The chunk
    /// occupies `[origin, origin + size)` on both axes.
    pub fn origin(&self) -> Point2<i32> {
        Point2::new(
            self.coordinate.x * self.size as i32,
            self.coordinate.y * self.size as i32,
        )
    }

    /// Horizontal footprint in voxels.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Vertical extent in voxels (`size^2 / 2`).
    pub fn height(&self) -> usize {
        self.height
    }

    /// The block at chunk-local coordinates. Coordinates must be in range.
    pub fn block(&self, x: usize, y: usize, z: usize) -> BlockType {
        debug_assert!(x < self.size && y < self.height && z < self.size);
        self.blocks[self.index(x, y, z)]
    }

    /// The block at chunk-local coordinates, with any out-of-range
    /// coordinate reading as air.
    pub fn block_or_air(&self, x: i32, y: i32, z: i32) -> BlockType {
        if x < 0 || y < 0 || z < 0 {
            return BlockType::AIR;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        if x >= self.size || y >= self.height || z >= self.size {
            return BlockType::AIR;
        }
        self.blocks[self.index(x, y, z)]
    }

    /// Writes the block at chunk-local coordinates. Coordinates must be in
    /// range; vertical bounds are checked by the caller before the write.
    pub fn set_block(&mut self, x: usize, y: usize, z: usize, block_type: BlockType) {
        debug_assert!(x < self.size && y < self.height && z < self.size);
        let index = self.index(x, y, z);
        self.blocks[index] = block_type;
    }

    /// The cached topmost non-air y of a column.
    pub fn surface_height(&self, x: usize, z: usize) -> i32 {
        self.height_map[x + self.size * z]
    }

    /// Raises the cached column top to `y` if the placement is above it.
    /// Placing below the surface does not lower the cache.
    pub fn raise_surface(&mut self, x: usize, z: usize, y: i32) {
        let index = x + self.size * z;
        if y > self.height_map[index] {
            self.height_map[index] = y;
        }
    }

    /// Rescans a column downward from `from_y - 1` after the recorded top
    /// was removed, settling on the highest remaining non-air voxel or 0
    /// when the column is empty.
    pub fn rescan_surface(&mut self, x: usize, z: usize, from_y: i32) {
        let index = x + self.size * z;
        let mut new_top = 0;
        let mut y = from_y - 1;
        while y >= 0 {
            if self.block(x, y as usize, z) != BlockType::AIR {
                new_top = y;
                break;
            }
            y -= 1;
        }
        self.height_map[index] = new_top;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_reads_are_air() {
        let volume = ChunkVolume::empty(Point2::new(0, 0), 8);
        assert_eq!(volume.block_or_air(-1, 0, 0), BlockType::AIR);
        assert_eq!(volume.block_or_air(0, -1, 0), BlockType::AIR);
        assert_eq!(volume.block_or_air(8, 0, 0), BlockType::AIR);
        assert_eq!(volume.block_or_air(0, volume.height() as i32, 0), BlockType::AIR);
    }

    #[test]
    fn origin_uses_floor_division_convention() {
        let volume = ChunkVolume::empty(Point2::new(-1, 2), 16);
        assert_eq!(volume.origin(), Point2::new(-16, 32));
    }

    #[test]
    fn rescan_finds_highest_remaining_block() {
        let mut volume = ChunkVolume::empty(Point2::new(0, 0), 8);
        volume.set_block(3, 2, 3, BlockType::STONE);
        volume.set_block(3, 5, 3, BlockType::STONE);
        volume.raise_surface(3, 3, 5);

        volume.set_block(3, 5, 3, BlockType::AIR);
        volume.rescan_surface(3, 3, 5);
        assert_eq!(volume.surface_height(3, 3), 2);

        volume.set_block(3, 2, 3, BlockType::AIR);
        volume.rescan_surface(3, 3, 2);
        assert_eq!(volume.surface_height(3, 3), 0);
    }
}
