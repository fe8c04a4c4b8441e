//! Per-simulation clock and formation bookkeeping.
//!
//! One [`FieldState`] belongs to each mounted simulation and is handed to
//! [`ParticleField::step`](crate::ParticleField::step) explicitly, so several
//! spheres can run side by side in one process.

use crate::config::FieldConfig;
use glam::Mat4;

/// Rate at which formation progress grows, per simulated second.
pub const FORMATION_RATE: f32 = 0.4;

/// Elapsed time, formation window and field orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    elapsed: f32,
    frame: u64,
    forming: bool,
    formation_progress: f32,
    formation_duration: f32,
    rotation: f32,
    rotation_per_frame: f32,
}

impl FieldState {
    /// Fresh state: time zero, formation active.
    pub fn new(config: &FieldConfig) -> Self {
        Self {
            elapsed: 0.0,
            frame: 0,
            forming: true,
            formation_progress: 0.0,
            formation_duration: config.formation_duration().as_secs_f32(),
            rotation: 0.0,
            rotation_per_frame: config.rotation_per_frame,
        }
    }

    /// Accumulate one frame of `dt` seconds.
    ///
    /// Ends the formation window once elapsed time reaches its duration.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
        self.frame += 1;

        if self.forming {
            self.formation_progress = (self.formation_progress + dt * FORMATION_RATE).min(1.0);
            if self.elapsed >= self.formation_duration {
                self.end_formation();
            }
        }
    }

    /// End the formation window now. Has no effect once it has ended.
    pub fn end_formation(&mut self) {
        if self.forming {
            self.forming = false;
            log::info!(
                "formation ended at {:.3}s (frame {}, progress {:.2})",
                self.elapsed,
                self.frame,
                self.formation_progress
            );
        }
    }

    /// Apply the constant per-frame rotation.
    pub fn rotate(&mut self) {
        self.rotation += self.rotation_per_frame;
    }

    /// Field local-to-world transform.
    pub fn world_transform(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation)
    }

    /// Simulated seconds since mount.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Frames advanced since mount.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Whether the formation spring is active.
    #[inline]
    pub fn is_forming(&self) -> bool {
        self.forming
    }

    /// Formation progress in `[0, 1]`. Frozen once formation ends.
    #[inline]
    pub fn formation_progress(&self) -> f32 {
        self.formation_progress
    }

    /// Accumulated rotation about +Y in radians.
    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }
}
