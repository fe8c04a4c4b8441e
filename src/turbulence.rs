//! Scalar noise fields driving swirl and turbulence.
//!
//! The force code only needs a pure, continuous `noise3(x, y, z)` in
//! `[-1, 1]`. [`SimplexNoise`] is the default; any closure of the same shape
//! works too, which keeps tests free of noise-dependent values.
//!
//! ```ignore
//! let still = |_x: f32, _y: f32, _z: f32| 0.0;
//! let field = ParticleField::with_noise(&config, still)?;
//! ```

use glam::Vec3;
use noise::{NoiseFn, OpenSimplex};

/// A deterministic 3D scalar noise function with output in `[-1, 1]`.
pub trait Noise3 {
    /// Sample the noise at `(x, y, z)`.
    fn noise3(&self, x: f32, y: f32, z: f32) -> f32;
}

impl<F> Noise3 for F
where
    F: Fn(f32, f32, f32) -> f32,
{
    #[inline]
    fn noise3(&self, x: f32, y: f32, z: f32) -> f32 {
        self(x, y, z)
    }
}

/// OpenSimplex gradient noise.
#[derive(Clone, Copy, Debug)]
pub struct SimplexNoise {
    inner: OpenSimplex,
}

impl SimplexNoise {
    /// Create a noise field from a seed.
    pub fn new(seed: u32) -> Self {
        Self {
            inner: OpenSimplex::new(seed),
        }
    }
}

impl Noise3 for SimplexNoise {
    #[inline]
    fn noise3(&self, x: f32, y: f32, z: f32) -> f32 {
        self.inner
            .get([x as f64, y as f64, z as f64])
            .clamp(-1.0, 1.0) as f32
    }
}

/// Three samples over the cyclic axis pairs of `p`: `(x, y)`, `(y, z)`,
/// `(z, x)`, each animated along the third coordinate by `t`.
#[inline]
pub fn cyclic_sample<N: Noise3 + ?Sized>(noise: &N, p: Vec3, t: f32) -> Vec3 {
    Vec3::new(
        noise.noise3(p.x, p.y, t),
        noise.noise3(p.y, p.z, t),
        noise.noise3(p.z, p.x, t),
    )
}
