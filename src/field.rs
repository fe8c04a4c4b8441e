//! The particle field: per-particle state arrays and the frame update.
//!
//! State is kept as four parallel arrays (structure of arrays), allocated
//! once at construction and never resized:
//!
//! | Array | Mutated | Meaning |
//! |-------|---------|---------|
//! | `positions` | every step | current position, handed to the renderer |
//! | `velocities` | every step | per-frame velocity |
//! | `rest_positions` | never | point on the jittered target shell |
//! | `birth_positions` | never | scattered start point for formation |
//!
//! ```ignore
//! let mut field = ParticleField::initialize(20_000, Some(7))?;
//! let mut state = FieldState::new(&FieldConfig::default());
//!
//! // Every frame:
//! state.advance(dt);
//! field.step(&state, &StepInput::default());
//! renderer.upload(field.position_bytes());
//! ```

use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::forces::{self, StepInput, INTEGRATION_SCALE};
use crate::spawn::ShellSampler;
use crate::state::FieldState;
use crate::turbulence::{Noise3, SimplexNoise};
use glam::Vec3;

/// All particles of one sphere plus the noise field that drives them.
pub struct ParticleField<N: Noise3 = SimplexNoise> {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    rest_positions: Vec<Vec3>,
    birth_positions: Vec<Vec3>,
    noise: N,
    interaction_radius: f32,
    containment_radius: f32,
}

impl ParticleField<SimplexNoise> {
    /// Build a field of `count` particles with default parameters.
    ///
    /// Fails only when `count` is zero.
    pub fn initialize(count: usize, seed: Option<u64>) -> Result<Self, FieldError> {
        let config = FieldConfig::default()
            .with_particle_count(count)
            .with_seed(seed);
        Self::from_config(&config)
    }

    /// Build a field from a full configuration, seeding simplex noise from
    /// the same stream as the particle placement.
    pub fn from_config(config: &FieldConfig) -> Result<Self, FieldError> {
        config.validate()?;
        let mut sampler = ShellSampler::new(config.seed);
        let noise = SimplexNoise::new(sampler.noise_seed());
        Ok(Self::build(config, sampler, noise))
    }
}

impl<N: Noise3> ParticleField<N> {
    /// Build a field driven by a caller-supplied noise function.
    pub fn with_noise(config: &FieldConfig, noise: N) -> Result<Self, FieldError> {
        config.validate()?;
        let sampler = ShellSampler::new(config.seed);
        Ok(Self::build(config, sampler, noise))
    }

    fn build(config: &FieldConfig, mut sampler: ShellSampler, noise: N) -> Self {
        let count = config.particle_count;
        let mut rest_positions = Vec::with_capacity(count);
        let mut birth_positions = Vec::with_capacity(count);

        for _ in 0..count {
            rest_positions.push(sampler.on_jittered_shell(config.base_radius, config.radius_jitter));
            birth_positions.push(sampler.on_shell(config.birth_radius_min, config.birth_radius_max));
        }

        log::debug!(
            "particle field initialized: {} particles, seed {:?}",
            count,
            config.seed
        );

        Self {
            positions: birth_positions.clone(),
            velocities: vec![Vec3::ZERO; count],
            rest_positions,
            birth_positions,
            noise,
            interaction_radius: config.interaction_radius,
            containment_radius: config.containment_radius,
        }
    }

    /// Advance every particle by one frame.
    ///
    /// `state` supplies the simulation time and formation flag; it must have
    /// been advanced for this frame already.
    pub fn step(&mut self, state: &FieldState, input: &StepInput) {
        let forming = state.is_forming();
        let time = state.elapsed();
        let noise = &self.noise;
        let interaction_radius = self.interaction_radius;
        let containment_radius = self.containment_radius;

        let particles = self
            .positions
            .iter_mut()
            .zip(self.velocities.iter_mut())
            .zip(self.rest_positions.iter());

        for ((position, velocity), &rest) in particles {
            let mut p = *position;
            let mut v = *velocity;

            if forming {
                v = forces::formation_spring(v, p, rest);
            }

            v += forces::interaction_force(noise, p, input, interaction_radius, time);

            let radius = p.length();
            v += forces::return_spring(p, rest, radius);

            p += v * INTEGRATION_SCALE;
            v *= forces::damping_factor(radius);

            forces::contain(&mut p, &mut v, containment_radius);

            *position = p;
            *velocity = v;
        }
    }

    /// Positions as of the last completed step.
    #[inline]
    pub fn current_positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Positions as tightly packed `f32` triples, ready for a vertex buffer.
    #[inline]
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    #[inline]
    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    #[inline]
    pub fn rest_positions(&self) -> &[Vec3] {
        &self.rest_positions
    }

    #[inline]
    pub fn birth_positions(&self) -> &[Vec3] {
        &self.birth_positions
    }

    /// Add `impulse` to one particle's velocity. Out-of-range indices are
    /// ignored.
    pub fn apply_impulse(&mut self, index: usize, impulse: Vec3) {
        if let Some(v) = self.velocities.get_mut(index) {
            *v += impulse;
        }
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false: construction rejects empty fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still(_x: f32, _y: f32, _z: f32) -> f32 {
        0.0
    }

    #[test]
    fn test_zero_count_fails() {
        assert!(matches!(
            ParticleField::initialize(0, None),
            Err(FieldError::InvalidParticleCount(0))
        ));
    }

    #[test]
    fn test_starts_at_birth_with_zero_velocity() {
        let field = ParticleField::initialize(64, Some(1)).unwrap();
        assert_eq!(field.len(), 64);
        assert_eq!(field.current_positions(), field.birth_positions());
        assert!(field.velocities().iter().all(|v| *v == Vec3::ZERO));
    }

    #[test]
    fn test_seed_reproduces_layout() {
        let a = ParticleField::initialize(32, Some(9)).unwrap();
        let b = ParticleField::initialize(32, Some(9)).unwrap();
        assert_eq!(a.rest_positions(), b.rest_positions());
        assert_eq!(a.birth_positions(), b.birth_positions());
    }

    #[test]
    fn test_position_bytes_layout() {
        let field = ParticleField::initialize(10, Some(2)).unwrap();
        let bytes = field.position_bytes();
        assert_eq!(bytes.len(), 10 * 12);
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(floats[3], field.current_positions()[1].x);
    }

    #[test]
    fn test_rest_and_birth_fixed_after_steps() {
        let config = FieldConfig::default().with_particle_count(50).with_seed(Some(4));
        let mut field = ParticleField::with_noise(&config, still).unwrap();
        let rest = field.rest_positions().to_vec();
        let birth = field.birth_positions().to_vec();
        let mut state = FieldState::new(&config);
        for _ in 0..30 {
            state.advance(1.0 / 60.0);
            field.step(&state, &StepInput::default());
        }
        assert_eq!(field.rest_positions(), rest.as_slice());
        assert_eq!(field.birth_positions(), birth.as_slice());
        assert_ne!(field.current_positions(), birth.as_slice());
    }

    #[test]
    fn test_first_step_contains_birth_points() {
        let config = FieldConfig::default().with_particle_count(200).with_seed(Some(5));
        let mut field = ParticleField::with_noise(&config, still).unwrap();
        let mut state = FieldState::new(&config);
        state.advance(1.0 / 60.0);
        field.step(&state, &StepInput::default());
        for p in field.current_positions() {
            assert!(p.length() <= 4.4 + 1e-4);
        }
    }

    #[test]
    fn test_impulse_out_of_range_ignored() {
        let mut field = ParticleField::initialize(4, Some(1)).unwrap();
        field.apply_impulse(10, Vec3::ONE);
        field.apply_impulse(0, Vec3::ONE);
        assert_eq!(field.velocities()[0], Vec3::ONE);
        assert_eq!(field.velocities()[1], Vec3::ZERO);
    }
}
