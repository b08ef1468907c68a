//! # Terrain Height Field
//!
//! Pure, deterministic terrain generation from layered coherent noise.
//!
//! A [`HeightField`] maps a horizontal world coordinate to a terrain height
//! and resolves the surface block type and grass tint for it. It holds no
//! world state beyond its noise configuration: the same seed and base
//! offset always produce the same terrain.
//!
//! ## Layer composition
//!
//! Four fractal layers (main, hill, detail, mountain) contribute to the
//! height. Main, hill and detail each add `|noise| * multiplier`. The
//! mountain layer adds `(|noise| * multiplier) ^ (power + e)` where `e` is
//! a second, higher-octave sampling of the mountain noise clamped to
//! `[0.1, 0.25]`, which sharpens peaks where the detail signal is high.
//! The contributions plus a constant base are summed, divided by 5, and
//! clamped to the valid height range. A fifth layer drives the grass tint.

use cgmath::Vector2;
use noise::{Fbm, MultiFractal, NoiseFn, OpenSimplex};

use crate::config::{NoiseLayerConfig, WorldConfig};
use crate::world::block::block_type::BlockType;

/// Lower clamp bound of the mountain exponent modulation.
const MOUNTAIN_EXPONENT_MIN: f64 = 0.1;
/// Upper clamp bound of the mountain exponent modulation.
const MOUNTAIN_EXPONENT_MAX: f64 = 0.25;

/// Deterministic mapping from horizontal world coordinates to terrain
/// height, surface block type, and grass tint.
pub struct HeightField {
    main: Fbm<OpenSimplex>,
    hill: Fbm<OpenSimplex>,
    detail: Fbm<OpenSimplex>,
    mountain: Fbm<OpenSimplex>,
    mountain_detail: Fbm<OpenSimplex>,
    color: Fbm<OpenSimplex>,

    main_multiplier: f64,
    hill_multiplier: f64,
    detail_multiplier: f64,
    mountain_multiplier: f64,
    mountain_power: f64,

    base_height: i32,
    max_height: i32,
    snow_line: i32,
    grass_color: [u8; 4],
    grass_secondary_color: [u8; 4],

    /// Per-world horizontal offset added to every height sample. Sampled
    /// once at world creation and stored, so repeated worlds with the same
    /// seed still vary in apparent placement.
    base_offset: Vector2<f64>,
}

fn layer(seed: u32, config: &NoiseLayerConfig) -> Fbm<OpenSimplex> {
    Fbm::<OpenSimplex>::new(seed)
        .set_frequency(config.frequency)
        .set_octaves(config.octaves.max(1))
}

impl HeightField {
    /// Builds a height field from the world configuration.
    ///
    /// # Arguments
    /// * `config` - Noise layer settings and height tunables
    /// * `seed` - The seed shared by every layer
    /// * `base_offset` - The per-world horizontal sample offset; callers
    ///   must sample it once and pass the stored value
    pub fn new(config: &WorldConfig, seed: u32, base_offset: Vector2<f64>) -> Self {
        HeightField {
            main: layer(seed, &config.main_noise),
            hill: layer(seed, &config.hill_noise),
            detail: layer(seed, &config.detail_noise),
            mountain: layer(seed, &config.mountain_noise),
            // Same settings as the mountain layer with one extra octave;
            // this is the exponent modulation source.
            mountain_detail: layer(
                seed,
                &NoiseLayerConfig::new(
                    config.mountain_noise.frequency,
                    config.mountain_noise.octaves + 1,
                    config.mountain_noise.multiplier,
                ),
            ),
            color: layer(seed, &config.color_noise),
            main_multiplier: config.main_noise.multiplier,
            hill_multiplier: config.hill_noise.multiplier,
            detail_multiplier: config.detail_noise.multiplier,
            mountain_multiplier: config.mountain_noise.multiplier,
            mountain_power: config.mountain_power,
            base_height: config.base_height,
            max_height: config.max_surface_height(),
            snow_line: config.snow_line,
            grass_color: config.grass_color,
            grass_secondary_color: config.grass_secondary_color,
            base_offset,
        }
    }

    /// Terrain height at a horizontal world coordinate.
    ///
    /// The result is always within `[0, chunk_size^2 - 1]` and is
    /// deterministic for a fixed seed and base offset.
    pub fn height(&self, world_x: i32, world_z: i32) -> i32 {
        let x = world_x as f64 + self.base_offset.x;
        let z = world_z as f64 + self.base_offset.y;

        let main = self.main.get([x, z]).abs() * self.main_multiplier;
        let hill = self.hill.get([x, z]).abs() * self.hill_multiplier;
        let detail = self.detail.get([x, z]).abs() * self.detail_multiplier;

        let mountain_base = self.mountain.get([x, z]).abs() * self.mountain_multiplier;
        let exponent = self.mountain_power
            + self
                .mountain_detail
                .get([x, z])
                .clamp(MOUNTAIN_EXPONENT_MIN, MOUNTAIN_EXPONENT_MAX);
        let mountain = mountain_base.powf(exponent);

        let height = (self.base_height + (main + hill + detail + mountain) as i32) / 5;
        height.clamp(0, self.max_height)
    }

    /// Block type of a voxel given its y and the column height.
    ///
    /// Above the surface is air; the surface itself is snow above the snow
    /// line and grass below it; everything underneath is stone.
    pub fn surface_block(&self, y: i32, column_height: i32) -> BlockType {
        if y > column_height {
            BlockType::AIR
        } else if y == column_height {
            if column_height > self.snow_line {
                BlockType::SNOW
            } else {
                BlockType::GRASS
            }
        } else {
            BlockType::STONE
        }
    }

    /// Grass tint at a horizontal world coordinate.
    ///
    /// The color noise sample is rescaled (`*3 + 0.5`) and used as a
    /// clamped interpolation factor between the two configured grass color
    /// endpoints. Unlike [`height`](Self::height), the sample is taken at
    /// the raw world coordinates without the base offset.
    pub fn surface_color(&self, world_x: i32, world_z: i32) -> [u8; 4] {
        let factor = (self.color.get([world_x as f64, world_z as f64]) * 3.0 + 0.5)
            .clamp(0.0, 1.0);
        let mut color = [0u8; 4];
        for (channel, slot) in color.iter_mut().enumerate() {
            let a = self.grass_color[channel] as f64;
            let b = self.grass_secondary_color[channel] as f64;
            *slot = (a + (b - a) * factor).round() as u8;
        }
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_field(seed: u32) -> HeightField {
        HeightField::new(&WorldConfig::default(), seed, Vector2::new(10.0, -400.0))
    }

    #[test]
    fn heights_stay_clamped() {
        let field = test_field(42);
        let max = WorldConfig::default().max_surface_height();
        for x in (-2000..2000).step_by(97) {
            for z in (-2000..2000).step_by(89) {
                let h = field.height(x, z);
                assert!((0..=max).contains(&h), "height {h} at ({x}, {z})");
            }
        }
    }

    #[test]
    fn heights_are_deterministic_for_fixed_seed_and_offset() {
        let a = test_field(7);
        let b = test_field(7);
        for x in (-500..500).step_by(53) {
            for z in (-500..500).step_by(61) {
                assert_eq!(a.height(x, z), b.height(x, z));
                assert_eq!(a.surface_color(x, z), b.surface_color(x, z));
            }
        }
    }

    #[test]
    fn base_offset_shifts_apparent_placement() {
        let config = WorldConfig::default();
        let a = HeightField::new(&config, 7, Vector2::new(0.0, 0.0));
        let b = HeightField::new(&config, 7, Vector2::new(5000.0, -9000.0));
        let differs = (-500..500)
            .step_by(13)
            .any(|x| a.height(x, 0) != b.height(x, 0));
        assert!(differs);
    }

    #[test]
    fn surface_block_rule() {
        let field = test_field(1);
        assert_eq!(field.surface_block(13, 12), BlockType::AIR);
        assert_eq!(field.surface_block(12, 12), BlockType::GRASS);
        assert_eq!(field.surface_block(11, 12), BlockType::STONE);
        // Above the snow line the surface turns to snow.
        assert_eq!(field.surface_block(101, 101), BlockType::SNOW);
        assert_eq!(field.surface_block(100, 100), BlockType::GRASS);
    }

    #[test]
    fn surface_color_stays_between_the_endpoints() {
        let field = test_field(3);
        let config = WorldConfig::default();
        for x in (-300..300).step_by(17) {
            let color = field.surface_color(x, -x);
            for channel in 0..3 {
                let lo = config.grass_color[channel].min(config.grass_secondary_color[channel]);
                let hi = config.grass_color[channel].max(config.grass_secondary_color[channel]);
                assert!((lo..=hi).contains(&color[channel]));
            }
            assert_eq!(color[3], 255);
        }
    }
}
