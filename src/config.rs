//! Construction parameters for a particle sphere.
//!
//! Defaults reproduce the stock look: 20k particles on a radius-3 shell,
//! scattered on an 8–12 shell at mount, contained inside radius 4.4, with a
//! two second formation window.
//!
//! ```ignore
//! let config = FieldConfig::default()
//!     .with_particle_count(5_000)
//!     .with_seed(Some(7));
//! config.save("sphere.json")?;
//! ```

use crate::error::FieldError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Particle field configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles, fixed for the lifetime of the field.
    pub particle_count: usize,
    /// Radius of the rest shell before jitter.
    pub base_radius: f32,
    /// Fractional outward jitter applied to rest radii (`0.15` = up to +15%).
    pub radius_jitter: f32,
    /// Inner radius of the birth shell.
    pub birth_radius_min: f32,
    /// Outer radius of the birth shell.
    pub birth_radius_max: f32,
    /// Hard radial boundary.
    pub containment_radius: f32,
    /// Length of the formation window in milliseconds.
    pub formation_duration_ms: u64,
    /// Distance from the interaction point inside which particles react.
    pub interaction_radius: f32,
    /// Radius of the bounding sphere the pointer ray is cast against.
    pub probe_radius: f32,
    /// Field rotation about +Y applied once per frame, in radians.
    pub rotation_per_frame: f32,
    /// RNG seed for particle placement and noise. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 20_000,
            base_radius: 3.0,
            radius_jitter: 0.15,
            birth_radius_min: 8.0,
            birth_radius_max: 12.0,
            containment_radius: 4.4,
            formation_duration_ms: 2000,
            interaction_radius: 0.45,
            probe_radius: 3.2,
            rotation_per_frame: 0.0004,
            seed: None,
        }
    }
}

impl FieldConfig {
    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the rest shell radius.
    pub fn with_base_radius(mut self, radius: f32) -> Self {
        self.base_radius = radius;
        self
    }

    /// Set the radial jitter fraction of the rest shell.
    pub fn with_radius_jitter(mut self, jitter: f32) -> Self {
        self.radius_jitter = jitter;
        self
    }

    /// Set the birth shell radius range.
    pub fn with_birth_radius(mut self, min: f32, max: f32) -> Self {
        self.birth_radius_min = min;
        self.birth_radius_max = max;
        self
    }

    /// Set the containment radius.
    pub fn with_containment_radius(mut self, radius: f32) -> Self {
        self.containment_radius = radius;
        self
    }

    /// Set the formation window length.
    pub fn with_formation_duration(mut self, duration: Duration) -> Self {
        self.formation_duration_ms = duration.as_millis() as u64;
        self
    }

    /// Set the interaction radius around the pointer hit point.
    pub fn with_interaction_radius(mut self, radius: f32) -> Self {
        self.interaction_radius = radius;
        self
    }

    /// Set the bounding sphere radius used by the interaction probe.
    pub fn with_probe_radius(mut self, radius: f32) -> Self {
        self.probe_radius = radius;
        self
    }

    /// Set the cosmetic per-frame rotation.
    pub fn with_rotation_per_frame(mut self, radians: f32) -> Self {
        self.rotation_per_frame = radians;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Formation window as a [`Duration`].
    pub fn formation_duration(&self) -> Duration {
        Duration::from_millis(self.formation_duration_ms)
    }

    /// Check every value before any allocation happens.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.particle_count == 0 {
            return Err(FieldError::InvalidParticleCount(self.particle_count));
        }

        let positive = [
            ("base_radius", self.base_radius),
            ("birth_radius_min", self.birth_radius_min),
            ("containment_radius", self.containment_radius),
            ("interaction_radius", self.interaction_radius),
            ("probe_radius", self.probe_radius),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(FieldError::InvalidParameter { name, value });
            }
        }

        if !self.radius_jitter.is_finite() || self.radius_jitter < 0.0 {
            return Err(FieldError::InvalidParameter {
                name: "radius_jitter",
                value: self.radius_jitter,
            });
        }
        if !self.birth_radius_max.is_finite() || self.birth_radius_max < self.birth_radius_min {
            return Err(FieldError::InvalidParameter {
                name: "birth_radius_max",
                value: self.birth_radius_max,
            });
        }
        if !self.rotation_per_frame.is_finite() {
            return Err(FieldError::InvalidParameter {
                name: "rotation_per_frame",
                value: self.rotation_per_frame,
            });
        }

        Ok(())
    }

    /// Parse a configuration from a JSON string. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, FieldError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, FieldError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FieldError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FieldError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
