//! The per-particle update rule, split into its individual terms.
//!
//! [`ParticleField::step`](crate::ParticleField::step) applies these in a fixed
//! order for every particle:
//!
//! 1. [`formation_spring`] (formation window only)
//! 2. [`interaction_force`] (gated by distance and visibility)
//! 3. [`return_spring`]
//! 4. integrate by [`INTEGRATION_SCALE`]
//! 5. [`damping_factor`]
//! 6. [`contain`]
//!
//! All constants are per-frame quantities. None of them are scaled by `dt`.

use crate::math::{safe_normalize, smoothstep};
use crate::turbulence::{cyclic_sample, Noise3};
use glam::Vec3;

/// Pull toward the rest position during formation.
pub const FORMATION_STIFFNESS: f32 = 0.03;
/// Velocity retained per frame during formation.
pub const FORMATION_DAMPING: f32 = 0.92;

/// Particles whose facing dot is at or below this never react.
pub const VISIBILITY_THRESHOLD: f32 = -0.6;
/// Spatial frequency of the swirl and turbulence noise.
pub const NOISE_SCALE: f32 = 1.2;
/// Animation speed of the noise.
pub const NOISE_TIME_SCALE: f32 = 0.2;
/// Swirl-to-repel blend at full falloff, before easing.
pub const SWIRL_BLEND: f32 = 0.6;
/// Direct repulsion away from the interaction point.
pub const REPEL_STRENGTH: f32 = 0.08;
/// Noise-driven swirl.
pub const SWIRL_STRENGTH: f32 = 0.04;
/// Radial push away from the field center.
pub const OUTWARD_STRENGTH: f32 = 0.015;
/// Small-amplitude noise jitter.
pub const TURBULENCE_STRENGTH: f32 = 0.05;
/// Share of the smoothed pointer velocity passed to particles.
pub const POINTER_INFLUENCE: f32 = 0.015;
/// Offset decorrelating the turbulence samples from the swirl samples.
pub const TURBULENCE_OFFSET: Vec3 = Vec3::new(31.7, -17.3, 53.1);

/// Base stiffness of the return-to-rest spring.
pub const RETURN_STIFFNESS: f32 = 0.012;
/// Extra stiffness per unit of radius beyond [`SPRING_PIVOT_RADIUS`].
pub const RETURN_GAIN: f32 = 0.4;
/// Rest distance over which the return spring eases in.
pub const RETURN_EASE_DISTANCE: f32 = 0.8;
/// Radius beyond which springs stiffen and damping grows.
pub const SPRING_PIVOT_RADIUS: f32 = 2.0;

/// Fraction of velocity applied to position each frame.
pub const INTEGRATION_SCALE: f32 = 0.6;
/// Velocity retained per frame near the center.
pub const BASE_DAMPING: f32 = 0.97;
/// Extra damping per unit of radius beyond [`SPRING_PIVOT_RADIUS`].
pub const DAMPING_GAIN: f32 = 0.06;
/// Velocity retained when a particle is pushed back onto the boundary.
pub const CONTAINMENT_DAMPING: f32 = 0.9;

/// Per-frame interaction inputs, all in field-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInput {
    /// Where the pointer ray meets the bounding sphere (or last met it).
    pub interaction_point: Vec3,
    /// Smoothed pointer velocity.
    pub interaction_velocity: Vec3,
    /// Camera position.
    pub camera_local: Vec3,
}

impl Default for StepInput {
    fn default() -> Self {
        Self {
            interaction_point: Vec3::ZERO,
            interaction_velocity: Vec3::ZERO,
            camera_local: Vec3::new(0.0, 0.0, 8.5),
        }
    }
}

/// Formation spring toward `rest`, followed by its own damping pass.
#[inline]
pub fn formation_spring(velocity: Vec3, position: Vec3, rest: Vec3) -> Vec3 {
    (velocity + (rest - position) * FORMATION_STIFFNESS) * FORMATION_DAMPING
}

/// Dot of the particle-to-camera direction and the outward radial direction.
#[inline]
pub fn visibility(position: Vec3, camera_local: Vec3) -> f32 {
    safe_normalize(camera_local - position).dot(safe_normalize(position))
}

/// Global pulsation multiplier applied to the summed interaction force.
#[inline]
pub fn temporal_pulse(time: f32) -> f32 {
    let temporal = ((time * 1.5).sin() * 0.5 + 0.5) * 0.3 + 0.7;
    0.9 + temporal * 0.1
}

/// Velocity change from the pointer interaction.
///
/// Zero unless `position` is within `radius` of the interaction point and the
/// particle faces the camera (`visibility > -0.6`).
pub fn interaction_force<N: Noise3 + ?Sized>(
    noise: &N,
    position: Vec3,
    input: &StepInput,
    radius: f32,
    time: f32,
) -> Vec3 {
    let offset = position - input.interaction_point;
    let distance = offset.length();
    let facing_dot = visibility(position, input.camera_local);

    if !(distance < radius && facing_dot > VISIBILITY_THRESHOLD) {
        return Vec3::ZERO;
    }

    let falloff = smoothstep(radius, 0.0, distance);
    let noise_pos = position * NOISE_SCALE;
    let noise_time = time * NOISE_TIME_SCALE;

    let repel_dir = safe_normalize(offset);
    let swirl_dir = safe_normalize(cyclic_sample(noise, noise_pos, noise_time));
    let blend = smoothstep(0.0, 1.0, falloff * SWIRL_BLEND);
    let swirl_dir = safe_normalize(swirl_dir.lerp(repel_dir, blend));

    let turbulence = cyclic_sample(noise, noise_pos + TURBULENCE_OFFSET, noise_time)
        * (TURBULENCE_STRENGTH * falloff);

    let facing = (facing_dot - VISIBILITY_THRESHOLD).max(0.0);
    let repel = repel_dir * (REPEL_STRENGTH * falloff * facing);
    let swirl = swirl_dir * (SWIRL_STRENGTH * falloff * facing);
    let outward = safe_normalize(position) * (OUTWARD_STRENGTH * falloff);
    let pointer = input.interaction_velocity * (POINTER_INFLUENCE * falloff);

    (repel + swirl + outward + turbulence + pointer) * temporal_pulse(time)
}

/// Spring back toward `rest`, stiffer the farther out the particle sits.
///
/// `radius` is the particle's distance from the field center before
/// integration.
#[inline]
pub fn return_spring(position: Vec3, rest: Vec3, radius: f32) -> Vec3 {
    let stiffness =
        RETURN_STIFFNESS * (1.0 + ((radius - SPRING_PIVOT_RADIUS) * RETURN_GAIN).max(0.0));
    let to_rest = rest - position;
    let ease = smoothstep(0.0, RETURN_EASE_DISTANCE, to_rest.length());
    to_rest * (stiffness * ease)
}

/// Velocity retained this frame, lower for particles far from the center.
#[inline]
pub fn damping_factor(radius: f32) -> f32 {
    let distance_factor = ((radius - SPRING_PIVOT_RADIUS) * DAMPING_GAIN).max(0.0);
    BASE_DAMPING.min(BASE_DAMPING - distance_factor)
}

/// Clamp `position` onto the `max_radius` shell if it lies outside.
///
/// Returns whether a correction was applied.
#[inline]
pub fn contain(position: &mut Vec3, velocity: &mut Vec3, max_radius: f32) -> bool {
    let radius = position.length();
    if radius > max_radius {
        *position *= max_radius / radius;
        *velocity *= CONTAINMENT_DAMPING;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still(_x: f32, _y: f32, _z: f32) -> f32 {
        0.0
    }

    fn facing_input(point: Vec3) -> StepInput {
        StepInput {
            interaction_point: point,
            interaction_velocity: Vec3::ZERO,
            camera_local: Vec3::new(0.0, 0.0, 8.5),
        }
    }

    #[test]
    fn test_formation_spring_pulls_toward_rest() {
        let v = formation_spring(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0));
        assert!((v.x - (-7.0 * 0.03 * 0.92)).abs() < 1e-6);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn test_visibility_front_and_back() {
        let camera = Vec3::new(0.0, 0.0, 8.5);
        assert!((visibility(Vec3::new(0.0, 0.0, 3.0), camera) - 1.0).abs() < 1e-6);
        assert!((visibility(Vec3::new(0.0, 0.0, -3.0), camera) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_visibility_at_center_is_zero() {
        assert_eq!(visibility(Vec3::ZERO, Vec3::new(0.0, 0.0, 8.5)), 0.0);
    }

    #[test]
    fn test_temporal_pulse_range() {
        for i in 0..100 {
            let p = temporal_pulse(i as f32 * 0.1);
            assert!(p >= 0.97 - 1e-6 && p <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn test_interaction_outside_radius_is_zero() {
        let position = Vec3::new(0.0, 0.0, 3.0);
        let input = facing_input(position + Vec3::new(0.5, 0.0, 0.0));
        let noise = crate::SimplexNoise::new(1);
        assert_eq!(interaction_force(&noise, position, &input, 0.45, 1.0), Vec3::ZERO);
    }

    #[test]
    fn test_interaction_inside_radius_facing_camera() {
        let position = Vec3::new(0.0, 0.0, 3.0);
        let input = facing_input(position + Vec3::new(0.1, 0.0, 0.0));
        let force = interaction_force(&still, position, &input, 0.45, 0.0);
        assert!(force.length() > 0.0);
        // No noise: repel points away from the hit, outward push along +z.
        assert!(force.x < 0.0);
        assert!(force.z > 0.0);
    }

    #[test]
    fn test_interaction_behind_sphere_is_gated() {
        let position = Vec3::new(0.0, 0.0, -3.0);
        let input = facing_input(position + Vec3::new(0.1, 0.0, 0.0));
        assert_eq!(interaction_force(&still, position, &input, 0.45, 0.0), Vec3::ZERO);
    }

    #[test]
    fn test_interaction_at_hit_point_is_finite() {
        let position = Vec3::new(0.0, 0.0, 3.0);
        let input = facing_input(position);
        let force = interaction_force(&still, position, &input, 0.45, 0.0);
        assert!(force.is_finite());
    }

    #[test]
    fn test_pointer_velocity_carries_particles() {
        let position = Vec3::new(0.0, 0.0, 3.0);
        let mut input = facing_input(position + Vec3::new(0.0, 0.2, 0.0));
        let base = interaction_force(&still, position, &input, 0.45, 0.0);
        input.interaction_velocity = Vec3::new(5.0, 0.0, 0.0);
        let moved = interaction_force(&still, position, &input, 0.45, 0.0);
        assert!(moved.x > base.x);
    }

    #[test]
    fn test_return_spring_eases_in() {
        let rest = Vec3::new(3.0, 0.0, 0.0);
        assert_eq!(return_spring(rest, rest, 3.0), Vec3::ZERO);
        let near = return_spring(Vec3::new(3.1, 0.0, 0.0), rest, 3.1);
        let far = return_spring(Vec3::new(4.0, 0.0, 0.0), rest, 4.0);
        assert!(near.x < 0.0 && far.x < near.x);
    }

    #[test]
    fn test_damping_factor() {
        assert_eq!(damping_factor(1.0), 0.97);
        assert!((damping_factor(3.0) - 0.91).abs() < 1e-6);
        assert!(damping_factor(4.4) < damping_factor(3.0));
    }

    #[test]
    fn test_contain_lands_on_shell() {
        let mut p = Vec3::new(3.0, 4.0, 12.0);
        let mut v = Vec3::new(1.0, 1.0, 1.0);
        assert!(contain(&mut p, &mut v, 4.4));
        assert!((p.length() - 4.4).abs() < 1e-5);
        assert!((v.x - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_contain_leaves_inside_alone() {
        let mut p = Vec3::new(1.0, 0.0, 0.0);
        let mut v = Vec3::X;
        assert!(!contain(&mut p, &mut v, 4.4));
        assert_eq!(p, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(v, Vec3::X);
    }
}
