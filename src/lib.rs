#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Terrain
//!
//! A procedurally generated, editable, streamed voxel terrain core.
//!
//! The crate generates an effectively infinite terrain partitioned into
//! fixed-size columns (chunks) around a moving observer: deterministic
//! height generation from layered noise, per-chunk voxel-to-triangle-mesh
//! conversion with face culling, and chunk lifecycle management with a
//! frame-budgeted generation queue. Block edits remesh only the owning
//! chunk.
//!
//! ## Key Modules
//!
//! * [`config`] - World and noise layer configuration
//! * [`terrain`] - The layered-noise height field
//! * [`world`] - Chunk registry, streaming, and block editing
//! * [`meshing`] - Voxel-to-mesh conversion
//!
//! ## Collaborators
//!
//! The crate is rendering- and physics-agnostic. The host owns the frame
//! loop and calls [`World::tick`] with a monotonic delta and the observer
//! position; it uploads the per-chunk buffers from
//! [`World::active_meshes`] with its own renderer, and implements actual
//! collision shapes from the per-chunk `collider_enabled` flag.
//!
//! ## Usage
//!
//! ```
//! use cgmath::Point3;
//! use voxel_terrain::{World, WorldConfig};
//!
//! let mut config = WorldConfig::default();
//! config.seed = Some(7);
//! config.render_distance = 1;
//! let mut world = World::new(config);
//!
//! // Host frame loop: one tick per frame.
//! for _ in 0..32 {
//!     world.tick(0.25, Point3::new(8.0, 80.0, 8.0));
//! }
//! assert!(world.chunk_count() > 0);
//! ```

pub mod config;
pub mod meshing;
pub mod terrain;
pub mod world;

pub use config::{NoiseLayerConfig, WorldConfig};
pub use meshing::{ChunkMesh, MeshBuilder};
pub use terrain::HeightField;
pub use world::block::block_side::BlockSide;
pub use world::block::block_type::BlockType;
pub use world::{ChunkEntry, EditError, World};
