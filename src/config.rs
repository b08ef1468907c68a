//! # World Configuration
//!
//! This module gathers every tunable of the terrain system into one place:
//! chunk geometry, streaming radius, the seed, and the settings of the five
//! coherent-noise layers that compose the height field.
//!
//! Configurations are plain data. They can be built in code, deserialized
//! from JSON via [`WorldConfig::from_json`], and every field falls back to
//! the default tuning when omitted.

use serde::{Deserialize, Serialize};

/// Settings for a single coherent-noise layer.
///
/// Each layer of the height field (main, hill, detail, mountain, color) is
/// an independently configured fractal noise source sharing the world seed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseLayerConfig {
    /// Frequency applied to the sampled world coordinates.
    pub frequency: f64,
    /// Number of fractal octaves. Must be at least 1.
    pub octaves: usize,
    /// Multiplier applied to the absolute noise sample when the layer
    /// contributes to terrain height. Unused by the color layer.
    pub multiplier: f64,
}

impl NoiseLayerConfig {
    /// Creates a layer configuration from its three tunables.
    pub const fn new(frequency: f64, octaves: usize, multiplier: f64) -> Self {
        NoiseLayerConfig {
            frequency,
            octaves,
            multiplier,
        }
    }
}

/// Complete configuration of a [`World`](crate::World).
///
/// The defaults reproduce the reference tuning; any subset of fields can be
/// overridden in JSON thanks to `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Horizontal chunk footprint in voxels. The vertical extent of a chunk
    /// is derived from it as `chunk_size * chunk_size / 2`.
    pub chunk_size: usize,
    /// Streaming radius in chunk units. The desired set is the inclusive
    /// square of side `2 * render_distance + 1` around the observer.
    pub render_distance: i32,
    /// World seed shared by every noise layer. `None` picks a random seed
    /// at world creation.
    pub seed: Option<u32>,
    /// Constant added to the summed noise contributions before division.
    pub base_height: i32,
    /// Column height above which the surface block is snow instead of grass.
    pub snow_line: i32,
    /// Broad landmass shape.
    pub main_noise: NoiseLayerConfig,
    /// Rolling hills on top of the landmass.
    pub hill_noise: NoiseLayerConfig,
    /// Small-scale surface variation.
    pub detail_noise: NoiseLayerConfig,
    /// Mountain ridges. Its contribution is raised to a modulated power,
    /// see [`mountain_power`](Self::mountain_power).
    pub mountain_noise: NoiseLayerConfig,
    /// Base exponent of the mountain contribution. A second sampling of the
    /// mountain noise with one extra octave modulates it per coordinate.
    pub mountain_power: f64,
    /// Tint variation of grass surfaces. The multiplier is ignored.
    pub color_noise: NoiseLayerConfig,
    /// First grass color endpoint (RGBA).
    pub grass_color: [u8; 4],
    /// Second grass color endpoint (RGBA).
    pub grass_secondary_color: [u8; 4],
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            chunk_size: 16,
            render_distance: 4,
            seed: None,
            base_height: 64,
            snow_line: 100,
            main_noise: NoiseLayerConfig::new(0.0001, 1, 48.0),
            hill_noise: NoiseLayerConfig::new(0.0001, 1, 64.0),
            detail_noise: NoiseLayerConfig::new(0.0001, 1, 96.0),
            mountain_noise: NoiseLayerConfig::new(0.0001, 1, 16.0),
            mountain_power: 2.0,
            color_noise: NoiseLayerConfig::new(0.0001, 1, 1.0),
            grass_color: [86, 125, 70, 255],
            grass_secondary_color: [126, 200, 80, 255],
        }
    }
}

impl WorldConfig {
    /// Parses a configuration from JSON, falling back to defaults for any
    /// omitted field.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Vertical extent of a chunk in voxels (`chunk_size^2 / 2`).
    ///
    /// This cap is a deliberate simplification tied to the chunk footprint,
    /// not a physical constant.
    pub fn chunk_height(&self) -> usize {
        self.chunk_size * self.chunk_size / 2
    }

    /// Highest value the height field may report, `chunk_size^2 - 1`.
    pub fn max_surface_height(&self) -> i32 {
        (self.chunk_size * self.chunk_size) as i32 - 1
    }

    /// Queue drain rate, scaled with how many chunks the render distance
    /// implies. Never below one chunk per second.
    pub fn chunks_per_second(&self) -> f32 {
        (self.render_distance * 5).max(1) as f32
    }
}
