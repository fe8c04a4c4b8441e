//! Frame orchestration for one sphere.
//!
//! [`SphereSimulation`] owns a field, its clock and an interaction probe, and
//! runs them in the order a frame needs: advance time, probe the pointer
//! against the current orientation, step the particles, then rotate.

use crate::camera::Camera;
use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::field::ParticleField;
use crate::probe::{Interaction, InteractionProbe};
use crate::state::FieldState;
use crate::turbulence::{Noise3, SimplexNoise};
use crate::visuals::PointStyle;
use glam::{Mat4, Vec2, Vec3};

/// A running particle sphere.
///
/// ```ignore
/// let mut sim = SphereSimulation::new(FieldConfig::default())?;
/// let camera = Camera::default();
///
/// // Every frame:
/// let positions = sim.frame(dt, pointer_ndc, &camera);
/// renderer.draw(positions, sim.world_transform(), sim.point_style());
/// ```
pub struct SphereSimulation<N: Noise3 = SimplexNoise> {
    field: ParticleField<N>,
    state: FieldState,
    probe: InteractionProbe,
    interaction: Interaction,
    style: PointStyle,
}

impl SphereSimulation<SimplexNoise> {
    /// Create a simulation with simplex turbulence.
    pub fn new(config: FieldConfig) -> Result<Self, FieldError> {
        let field = ParticleField::from_config(&config)?;
        Ok(Self::assemble(&config, field))
    }
}

impl<N: Noise3> SphereSimulation<N> {
    /// Create a simulation driven by a caller-supplied noise function.
    pub fn with_noise(config: FieldConfig, noise: N) -> Result<Self, FieldError> {
        let field = ParticleField::with_noise(&config, noise)?;
        Ok(Self::assemble(&config, field))
    }

    fn assemble(config: &FieldConfig, field: ParticleField<N>) -> Self {
        let state = FieldState::new(config);
        let probe = InteractionProbe::new(config.probe_radius);
        let interaction = Interaction {
            point: Vec3::ZERO,
            velocity: Vec3::ZERO,
            camera_local: Camera::default().position,
            active: false,
        };

        Self {
            field,
            state,
            probe,
            interaction,
            style: PointStyle::default(),
        }
    }

    /// Set the point style handed to renderers.
    pub fn with_point_style(mut self, style: PointStyle) -> Self {
        self.style = style;
        self
    }

    /// Run one frame of `dt` seconds with the pointer at `pointer_ndc`.
    ///
    /// Returns the updated positions in field-local space; draw them with
    /// [`world_transform`](Self::world_transform).
    pub fn frame(&mut self, dt: f32, pointer_ndc: Vec2, camera: &Camera) -> &[Vec3] {
        self.state.advance(dt);

        let world = self.state.world_transform();
        self.interaction = self
            .probe
            .update(pointer_ndc, camera, &world, self.state.elapsed());

        self.field.step(&self.state, &self.interaction.step_input());
        self.state.rotate();

        self.field.current_positions()
    }

    /// Field orientation to render with. Reflects the rotation applied at
    /// the end of the last frame.
    pub fn world_transform(&self) -> Mat4 {
        self.state.world_transform()
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    /// Mutable clock access, e.g. to end formation from a wall-clock timer.
    pub fn state_mut(&mut self) -> &mut FieldState {
        &mut self.state
    }

    pub fn probe(&self) -> &InteractionProbe {
        &self.probe
    }

    pub fn field(&self) -> &ParticleField<N> {
        &self.field
    }

    /// Interaction computed during the last frame.
    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn point_style(&self) -> &PointStyle {
        &self.style
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        self.field.current_positions()
    }

    #[inline]
    pub fn position_bytes(&self) -> &[u8] {
        self.field.position_bytes()
    }
}
