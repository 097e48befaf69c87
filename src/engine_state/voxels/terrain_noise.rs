//! # Terrain Noise
//!
//! Deterministic coherent noise for terrain generation, built on a seeded Perlin
//! field from the `noise` crate. Values are remapped to `[0, 1]`.
//!
//! Two samplers are provided:
//! - `sample_2d`: a horizontal height field sampled in chunk-width units
//! - `sample_3d`: a cheap volumetric test that averages six 2D projections of the
//!   point (xy, yz, xz and their swapped-argument counterparts) and compares the
//!   average against a threshold

use cgmath::Point3;
use noise::{NoiseFn, Perlin};

use super::coords::CHUNK_WIDTH;

/// Bias added to every sample coordinate so integer voxel positions never land exactly
/// on Perlin lattice points, where the field is always zero.
pub const SAMPLE_BIAS: f64 = 0.1;

/// A seeded, immutable noise field. Cheap to clone and safe to share between threads.
#[derive(Clone, Debug)]
pub struct NoiseSampler {
    perlin: Perlin,
    seed: u32,
}

impl NoiseSampler {
    pub fn new(seed: u32) -> Self {
        NoiseSampler {
            perlin: Perlin::new(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The raw field at `(x, y)`, remapped from `[-1, 1]` to `[0, 1]`.
    pub fn perlin_01(&self, x: f64, y: f64) -> f64 {
        ((self.perlin.get([x, y]) + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Samples the 2D field for a horizontal position given in voxels.
    ///
    /// The position is converted to chunk-width units, scaled and shifted:
    /// `((p + SAMPLE_BIAS) / CHUNK_WIDTH * scale + offset)` on both axes.
    pub fn sample_2d(&self, x: f64, z: f64, offset: f64, scale: f64) -> f64 {
        let width = CHUNK_WIDTH as f64;
        self.perlin_01(
            (x + SAMPLE_BIAS) / width * scale + offset,
            (z + SAMPLE_BIAS) / width * scale + offset,
        )
    }

    /// The average of six 2D projections of a voxel position, in `[0, 1]`.
    pub fn sample_3d(&self, position: Point3<i32>, offset: f64, scale: f64) -> f64 {
        let x = (position.x as f64 + offset + SAMPLE_BIAS) * scale;
        let y = (position.y as f64 + offset + SAMPLE_BIAS) * scale;
        let z = (position.z as f64 + offset + SAMPLE_BIAS) * scale;

        let xy = self.perlin_01(x, y);
        let yz = self.perlin_01(y, z);
        let xz = self.perlin_01(x, z);
        let yx = self.perlin_01(y, x);
        let zy = self.perlin_01(z, y);
        let zx = self.perlin_01(z, x);

        (xy + yz + xz + yx + zy + zx) / 6.0
    }

    /// Whether the volumetric sample at `position` exceeds `threshold`.
    pub fn sample_3d_above(
        &self,
        position: Point3<i32>,
        offset: f64,
        scale: f64,
        threshold: f64,
    ) -> bool {
        self.sample_3d(position, offset, scale) > threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_deterministic_and_normalized() {
        let a = NoiseSampler::new(7);
        let b = NoiseSampler::new(7);
        for i in -50..50 {
            let x = i as f64 * 3.7;
            let z = i as f64 * -1.3;
            let value = a.sample_2d(x, z, 10_000.0, 0.25);
            assert_eq!(value, b.sample_2d(x, z, 10_000.0, 0.25));
            assert!((0.0..=1.0).contains(&value));

            let volume = a.sample_3d(Point3::new(i, i * 2, -i), 10_000.0, 0.1);
            assert_eq!(volume, b.sample_3d(Point3::new(i, i * 2, -i), 10_000.0, 0.1));
            assert!((0.0..=1.0).contains(&volume));
        }
    }

    #[test]
    fn field_is_not_flat() {
        let sampler = NoiseSampler::new(1);
        let first = sampler.sample_2d(0.0, 0.0, 10_000.0, 0.25);
        let varies = (1..200).any(|i| sampler.sample_2d(i as f64, 0.0, 10_000.0, 0.25) != first);
        assert!(varies);
    }

    #[test]
    fn threshold_bounds_the_boolean_sample() {
        let sampler = NoiseSampler::new(3);
        let position = Point3::new(4, 20, -9);
        assert!(sampler.sample_3d_above(position, 0.0, 0.1, -0.01));
        assert!(!sampler.sample_3d_above(position, 0.0, 0.1, 1.0));
    }
}
