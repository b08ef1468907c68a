//! # World Module
//!
//! The `World` struct is the central coordinator of the terrain system. It
//! owns the chunk registry (a sparse map from chunk coordinate to volume,
//! mesh and lifecycle flags), the chunk streamer (generation queue plus
//! activation by distance), and the block editor.
//!
//! ## Host contract
//!
//! The world is driven cooperatively from the host's frame loop: one call
//! to [`World::tick`] per frame with the elapsed time and the observer's
//! world position. Everything runs to completion on the calling thread
//! within that frame; a block edit's mesh rebuild is visible to rendering
//! before the call that performed it returns.
//!
//! ## Chunk lifecycle
//!
//! `Unrequested -> Queued -> Generated+Active <-> Inactive`. When the
//! observer crosses into a new chunk coordinate, the desired set (an
//! inclusive square of radius `render_distance`) is recomputed: chunks
//! beyond the radius are deactivated (geometry retained, collision off),
//! missing coordinates are queued, present ones are reactivated. The queue
//! drains at a bounded rate per frame so synchronous generation never
//! stalls a single frame with a burst of work.

pub mod block;
pub mod chunk;

use std::collections::{HashMap, VecDeque};
use std::fmt;

use cgmath::{Point2, Point3, Vector2};
use log::{debug, info};

use crate::config::WorldConfig;
use crate::meshing::{ChunkMesh, MeshBuilder};
use crate::terrain::HeightField;

use block::block_type::BlockType;
use chunk::ChunkVolume;

/// Why a block edit did not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    /// No generated chunk owns the target coordinate, so the caller cannot
    /// tell "no block there" from "chunk not loaded" without this.
    ChunkNotLoaded,
    /// The target y lies outside the chunk's vertical range.
    OutOfBounds,
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::ChunkNotLoaded => write!(f, "no chunk is loaded at the target position"),
            EditError::OutOfBounds => write!(f, "target position is outside the chunk's vertical range"),
        }
    }
}

impl std::error::Error for EditError {}

/// One registered chunk: its voxel data, the derived mesh, and the
/// lifecycle flags the renderer and physics collaborators consume.
pub struct ChunkEntry {
    /// The chunk's voxel data.
    pub volume: ChunkVolume,
    /// The chunk's current mesh, rebuilt wholesale on every edit.
    pub mesh: ChunkMesh,
    /// Whether the chunk is within render distance and should be drawn.
    pub active: bool,
    /// Whether the physics collaborator should keep a collision shape
    /// enabled for this chunk.
    pub collider_enabled: bool,
}

/// A streamed, editable voxel terrain around a moving observer.
pub struct World {
    config: WorldConfig,
    seed: u32,
    field: HeightField,
    builder: MeshBuilder,

    chunks: HashMap<Point2<i32>, ChunkEntry>,
    generation_queue: VecDeque<Point2<i32>>,

    observer_chunk: Point2<i32>,
    streamed_once: bool,
    seconds_since_dequeue: f32,
    chunks_per_second: f32,
}

impl World {
    /// Creates a world from a configuration.
    ///
    /// The seed is taken from the configuration or randomized, and the
    /// per-world noise offset is sampled here exactly once; both stay
    /// fixed for the lifetime of the world.
    pub fn new(config: WorldConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| fastrand::u32(..));
        let base_offset = Vector2::new(
            fastrand::i32(-100..100) as f64,
            (fastrand::i32(-100..100) * 100) as f64,
        );
        let field = HeightField::new(&config, seed, base_offset);
        let chunks_per_second = config.chunks_per_second();

        info!(
            "world created: seed {}, chunk size {}, render distance {}",
            seed, config.chunk_size, config.render_distance
        );

        World {
            config,
            seed,
            field,
            builder: MeshBuilder::new(),
            chunks: HashMap::new(),
            generation_queue: VecDeque::new(),
            observer_chunk: Point2::new(0, 0),
            streamed_once: false,
            seconds_since_dequeue: 0.0,
            chunks_per_second,
        }
    }

    /// The seed every noise layer was configured with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The configuration the world was created from.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The terrain height field.
    pub fn height_field(&self) -> &HeightField {
        &self.field
    }

    /// Advances the world by one frame.
    ///
    /// Performs the per-frame streaming work: recomputes the desired chunk
    /// set when the observer crossed into a new chunk coordinate, refreshes
    /// collision proximity, and drains at most one queued chunk generation
    /// if enough time has elapsed since the last one.
    ///
    /// # Arguments
    /// * `dt` - Monotonic elapsed seconds since the previous tick
    /// * `observer_position` - The observer's world position this frame
    pub fn tick(&mut self, dt: f32, observer_position: Point3<f32>) {
        let observer_chunk = self.chunk_coordinate_of(observer_position);
        if !self.streamed_once || observer_chunk != self.observer_chunk {
            self.observer_chunk = observer_chunk;
            self.streamed_once = true;
            self.request_chunk_update();
        }

        self.refresh_collision();
        self.drain_generation_queue(dt);
    }

    /// The chunk coordinate owning a world position, by floor division of
    /// the horizontal axes.
    pub fn chunk_coordinate_of(&self, position: Point3<f32>) -> Point2<i32> {
        let size = self.config.chunk_size as f32;
        Point2::new(
            (position.x / size).floor() as i32,
            (position.z / size).floor() as i32,
        )
    }

    /// Recomputes the desired chunk set around the observer.
    fn request_chunk_update(&mut self) {
        let rd = self.config.render_distance;

        // Deactivate whatever drifted beyond the render distance. The
        // geometry is retained; the chunk is only hidden and made
        // non-colliding.
        for (coordinate, entry) in &mut self.chunks {
            let delta = self.observer_chunk - *coordinate;
            if delta.x * delta.x + delta.y * delta.y > rd * rd {
                entry.active = false;
                entry.collider_enabled = false;
            }
        }

        // Inclusive square scan: everything inside must exist and be
        // active. Missing coordinates go to the generation queue;
        // duplicate enqueues are tolerated and resolved at dequeue time.
        for x in -rd..=rd {
            for z in -rd..=rd {
                let coordinate =
                    Point2::new(self.observer_chunk.x + x, self.observer_chunk.y + z);
                match self.chunks.get_mut(&coordinate) {
                    Some(entry) => entry.active = true,
                    None => self.generation_queue.push_back(coordinate),
                }
            }
        }

        debug!(
            "streaming update at chunk ({}, {}): {} queued, {} loaded",
            self.observer_chunk.x,
            self.observer_chunk.y,
            self.generation_queue.len(),
            self.chunks.len()
        );
    }

    /// Pops and generates at most one queued chunk, rate limited so a
    /// burst of queued work cannot stall a single frame.
    fn drain_generation_queue(&mut self, dt: f32) {
        self.seconds_since_dequeue += dt;
        if self.generation_queue.is_empty()
            || self.seconds_since_dequeue < 1.0 / self.chunks_per_second
        {
            return;
        }
        self.seconds_since_dequeue = 0.0;

        let Some(coordinate) = self.generation_queue.pop_front() else {
            return;
        };

        // A duplicate enqueue may have been completed already.
        if self.chunks.contains_key(&coordinate) {
            return;
        }

        // The observer may have moved on since this coordinate was queued;
        // generating it now would be wasted work.
        if !self.in_desired_set(coordinate) {
            debug!(
                "dropping stale queued chunk ({}, {})",
                coordinate.x, coordinate.y
            );
            return;
        }

        self.generate_chunk(coordinate);
    }

    /// Whether a coordinate lies in the current desired square.
    fn in_desired_set(&self, coordinate: Point2<i32>) -> bool {
        let delta = self.observer_chunk - coordinate;
        delta.x.abs().max(delta.y.abs()) <= self.config.render_distance
    }

    fn generate_chunk(&mut self, coordinate: Point2<i32>) {
        let volume = ChunkVolume::generate(coordinate, self.config.chunk_size, &self.field);
        let mesh = self.builder.build(&volume, &self.field);
        debug!(
            "generated chunk ({}, {}) with {} faces",
            coordinate.x,
            coordinate.y,
            mesh.face_count()
        );
        let collider_enabled = self.near_observer(coordinate);
        self.chunks.insert(
            coordinate,
            ChunkEntry {
                volume,
                mesh,
                active: true,
                collider_enabled,
            },
        );
    }

    /// Whether a chunk is close enough to the observer to need collision.
    fn near_observer(&self, coordinate: Point2<i32>) -> bool {
        let delta = self.observer_chunk - coordinate;
        delta.x.abs().max(delta.y.abs()) <= 1
    }

    /// Keeps collision enabled exactly for active chunks adjacent to the
    /// observer. Runs every tick; redundant toggles are harmless.
    fn refresh_collision(&mut self) {
        let observer = self.observer_chunk;
        for (coordinate, entry) in &mut self.chunks {
            let delta = observer - *coordinate;
            entry.collider_enabled =
                entry.active && delta.x.abs().max(delta.y.abs()) <= 1;
        }
    }

    /// Enables collision for a chunk. Idempotent; a no-op for coordinates
    /// without a generated chunk.
    pub fn activate_collision(&mut self, coordinate: Point2<i32>) {
        if let Some(entry) = self.chunks.get_mut(&coordinate) {
            entry.collider_enabled = true;
        }
    }

    /// Disables collision for a chunk. Idempotent; a no-op for coordinates
    /// without a generated chunk.
    pub fn deactivate_collision(&mut self, coordinate: Point2<i32>) {
        if let Some(entry) = self.chunks.get_mut(&coordinate) {
            entry.collider_enabled = false;
        }
    }

    /// Places a block at an integer world position.
    ///
    /// On success the owning chunk's height map is raised if the placement
    /// is above the cached column top, its mesh is rebuilt wholesale, and
    /// its collision is re-enabled. Inventory bookkeeping stays with the
    /// interaction collaborator; it should only decrement on `Ok`.
    pub fn place_block(
        &mut self,
        position: Point3<i32>,
        block_type: BlockType,
    ) -> Result<(), EditError> {
        let (coordinate, x, y, z) = self.resolve(position)?;
        let entry = self
            .chunks
            .get_mut(&coordinate)
            .ok_or(EditError::ChunkNotLoaded)?;

        entry.volume.set_block(x, y, z, block_type);
        entry.volume.raise_surface(x, z, y as i32);
        entry.mesh = self.builder.build(&entry.volume, &self.field);
        entry.collider_enabled = true;
        Ok(())
    }

    /// Removes the block at an integer world position, setting it to air.
    ///
    /// If the removed voxel was the column's recorded top, the height map
    /// is rescanned downward to the highest remaining block. The chunk's
    /// mesh is rebuilt wholesale and its collision re-enabled.
    pub fn remove_block(&mut self, position: Point3<i32>) -> Result<(), EditError> {
        let (coordinate, x, y, z) = self.resolve(position)?;
        let entry = self
            .chunks
            .get_mut(&coordinate)
            .ok_or(EditError::ChunkNotLoaded)?;

        entry.volume.set_block(x, y, z, BlockType::AIR);
        if y as i32 == entry.volume.surface_height(x, z) {
            entry.volume.rescan_surface(x, z, y as i32);
        }
        entry.mesh = self.builder.build(&entry.volume, &self.field);
        entry.collider_enabled = true;
        Ok(())
    }

    /// Splits a world position into the owning chunk coordinate and
    /// chunk-local voxel coordinates, validating the vertical range.
    ///
    /// Chunk resolution floor-divides, and the local coordinates are the
    /// euclidean remainders: truncation toward the chunk's own origin, not
    /// away from zero.
    fn resolve(
        &self,
        position: Point3<i32>,
    ) -> Result<(Point2<i32>, usize, usize, usize), EditError> {
        let size = self.config.chunk_size as i32;
        let coordinate = Point2::new(position.x.div_euclid(size), position.z.div_euclid(size));
        if !self.chunks.contains_key(&coordinate) {
            return Err(EditError::ChunkNotLoaded);
        }
        if position.y < 0 || position.y >= self.config.chunk_height() as i32 {
            return Err(EditError::OutOfBounds);
        }
        Ok((
            coordinate,
            position.x.rem_euclid(size) as usize,
            position.y as usize,
            position.z.rem_euclid(size) as usize,
        ))
    }

    /// The block at an integer world position. Unloaded chunks and
    /// out-of-range positions read as air.
    pub fn block_at(&self, position: Point3<i32>) -> BlockType {
        let size = self.config.chunk_size as i32;
        let coordinate = Point2::new(position.x.div_euclid(size), position.z.div_euclid(size));
        match self.chunks.get(&coordinate) {
            Some(entry) => entry.volume.block_or_air(
                position.x.rem_euclid(size),
                position.y,
                position.z.rem_euclid(size),
            ),
            None => BlockType::AIR,
        }
    }

    /// Seconds of continuous mining needed to break a block of the given
    /// type, from the block profile table.
    pub fn seconds_to_break(&self, block_type: BlockType) -> f32 {
        block_type.profile().seconds_to_break
    }

    /// The registry entry at a chunk coordinate, if generated.
    pub fn chunk_at(&self, coordinate: Point2<i32>) -> Option<&ChunkEntry> {
        self.chunks.get(&coordinate)
    }

    /// Whether the chunk at a coordinate is generated and active.
    pub fn is_active(&self, coordinate: Point2<i32>) -> bool {
        self.chunks
            .get(&coordinate)
            .map(|entry| entry.active)
            .unwrap_or(false)
    }

    /// Number of generated chunks currently held in the registry.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of coordinates waiting in the generation queue, duplicates
    /// included.
    pub fn queued_count(&self) -> usize {
        self.generation_queue.len()
    }

    /// The observer's chunk coordinate as of the last tick.
    pub fn observer_chunk(&self) -> Point2<i32> {
        self.observer_chunk
    }

    /// Iterates over the meshes of active chunks, for the renderer
    /// collaborator.
    pub fn active_meshes(&self) -> impl Iterator<Item = (Point2<i32>, &ChunkMesh)> {
        self.chunks
            .iter()
            .filter(|(_, entry)| entry.active)
            .map(|(coordinate, entry)| (*coordinate, &entry.mesh))
    }

    /// Removes a chunk from the registry, reclaiming its memory.
    ///
    /// Streaming itself never evicts, it only deactivates; this is the
    /// explicit entry point for hosts that trade regeneration cost for a
    /// bounded footprint. The coordinate becomes unrequested and will be
    /// regenerated if it re-enters the desired set.
    pub fn evict(&mut self, coordinate: Point2<i32>) -> bool {
        self.chunks.remove(&coordinate).is_some()
    }
}
