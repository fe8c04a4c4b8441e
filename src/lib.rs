//! # particle-sphere
//!
//! A CPU particle sphere that assembles itself from a scattered cloud and
//! reacts to a pointer.
//!
//! The crate computes positions only. Hosts upload
//! [`ParticleField::position_bytes`] to a vertex buffer each frame and draw
//! the points with the field's world transform and [`PointStyle`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use particle_sphere::prelude::*;
//!
//! let config = FieldConfig::default().with_particle_count(20_000);
//! let mut sim = SphereSimulation::new(config)?;
//! let camera = Camera::default();
//!
//! loop {
//!     let positions = sim.frame(1.0 / 60.0, pointer_ndc, &camera);
//!     upload(positions, sim.world_transform());
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Field
//!
//! [`ParticleField`] owns four parallel arrays: current positions,
//! velocities, fixed rest positions on a jittered shell of radius ~3, and
//! fixed birth positions scattered between radius 8 and 12. Each
//! [`step`](ParticleField::step) applies, in order:
//!
//! | Stage | Active |
//! |-------|--------|
//! | Formation spring toward rest | during the formation window |
//! | Pointer swirl, repulsion and turbulence | near a camera-facing pointer |
//! | Radius-dependent return spring | always |
//! | Integration and damping | always |
//! | Containment at radius 4.4 | always |
//!
//! ### Probe
//!
//! [`InteractionProbe`] casts the pointer ray into the field's local space,
//! hits a sphere of radius 3.2, and smooths the hit point's velocity.
//!
//! ### State
//!
//! [`FieldState`] is the per-simulation clock: elapsed time, formation
//! window and rotation. It is passed to the field explicitly, so several
//! spheres can run side by side.
//!
//! ## Noise
//!
//! Turbulence is driven by any [`Noise3`]. [`SimplexNoise`] is the default;
//! a plain closure `|x, y, z| -> f32` works too.

pub mod camera;
pub mod config;
pub mod error;
pub mod field;
pub mod forces;
pub mod math;
pub mod probe;
pub mod simulation;
mod spawn;
pub mod state;
pub mod turbulence;
pub mod visuals;

pub use bytemuck;
pub use camera::{Camera, OrbitCamera};
pub use config::FieldConfig;
pub use error::FieldError;
pub use field::ParticleField;
pub use forces::StepInput;
pub use glam::{Mat4, Quat, Vec2, Vec3};
pub use probe::{Interaction, InteractionProbe, Ray, Sphere};
pub use simulation::SphereSimulation;
pub use spawn::ShellSampler;
pub use state::FieldState;
pub use turbulence::{Noise3, SimplexNoise};
pub use visuals::{BlendMode, PointStyle};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use particle_sphere::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::{Camera, OrbitCamera};
    pub use crate::config::FieldConfig;
    pub use crate::error::FieldError;
    pub use crate::field::ParticleField;
    pub use crate::forces::StepInput;
    pub use crate::probe::{Interaction, InteractionProbe};
    pub use crate::simulation::SphereSimulation;
    pub use crate::state::FieldState;
    pub use crate::turbulence::{Noise3, SimplexNoise};
    pub use crate::visuals::{BlendMode, PointStyle};
    pub use crate::{Mat4, Vec2, Vec3};
}
