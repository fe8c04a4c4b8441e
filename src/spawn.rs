//! Initial particle placement.
//!
//! Points are drawn on spherical shells with inverse-CDF sampling so the
//! distribution is uniform over the surface: azimuth uniform in `[0, 2π)`,
//! polar angle `acos(2u - 1)`.

use crate::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Seeded sampler for rest and birth positions.
pub struct ShellSampler {
    rng: SmallRng,
}

impl ShellSampler {
    /// Create a sampler. `None` seeds from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self { rng }
    }

    /// Random f32 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Seed for a noise field drawn from this sampler's stream.
    pub fn noise_seed(&mut self) -> u32 {
        self.rng.gen()
    }

    /// Uniformly distributed unit vector.
    pub fn direction(&mut self) -> Vec3 {
        let theta = self.rng.gen_range(0.0..TAU);
        let phi = (self.random() * 2.0 - 1.0).acos();

        Vec3::new(
            phi.sin() * theta.cos(),
            phi.sin() * theta.sin(),
            phi.cos(),
        )
    }

    /// Point on a shell with radius uniform in `[min_radius, max_radius)`.
    pub fn on_shell(&mut self, min_radius: f32, max_radius: f32) -> Vec3 {
        let radius = min_radius + self.random() * (max_radius - min_radius);
        self.direction() * radius
    }

    /// Point on a shell of radius `base * (1 + jitter * u)`.
    pub fn on_jittered_shell(&mut self, base: f32, jitter: f32) -> Vec3 {
        let radius = base * (1.0 + self.random() * jitter);
        self.direction() * radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_is_unit() {
        let mut sampler = ShellSampler::new(Some(1));
        for _ in 0..200 {
            assert!((sampler.direction().length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_jittered_shell_bounds() {
        let mut sampler = ShellSampler::new(Some(2));
        for _ in 0..500 {
            let r = sampler.on_jittered_shell(3.0, 0.15).length();
            assert!(r >= 3.0 - 1e-4 && r <= 3.45 + 1e-4, "radius {}", r);
        }
    }

    #[test]
    fn test_same_seed_same_points() {
        let mut a = ShellSampler::new(Some(42));
        let mut b = ShellSampler::new(Some(42));
        for _ in 0..20 {
            assert_eq!(a.on_shell(8.0, 12.0), b.on_shell(8.0, 12.0));
        }
    }

    #[test]
    fn test_directions_cover_both_hemispheres() {
        let mut sampler = ShellSampler::new(Some(3));
        let mean_z: f32 = (0..2000).map(|_| sampler.direction().z).sum::<f32>() / 2000.0;
        assert!(mean_z.abs() < 0.1);
    }
}
