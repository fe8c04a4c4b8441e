//! Pointer interaction probe.
//!
//! Casts the pointer ray into the field's local space, intersects it with a
//! bounding sphere around the field, and keeps an exponentially smoothed
//! estimate of how fast the hit point moves. The probe never touches
//! particle state; it only reads the field's world transform.

use crate::camera::Camera;
use crate::forces::StepInput;
use crate::math::safe_normalize;
use glam::{Mat4, Vec2, Vec3};

/// Lerp factor toward the raw velocity per active update.
pub const VELOCITY_SMOOTHING: f32 = 0.15;
/// Smoothed velocity retained per frame while the pointer misses the sphere.
pub const INACTIVE_DECAY: f32 = 0.95;
/// Shortest interval used when turning a hit-point delta into a velocity.
pub const MIN_UPDATE_INTERVAL: f32 = 1.0 / 60.0;

/// A half-line with unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: safe_normalize(direction),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Transform by `m`, renormalizing the direction.
    pub fn transformed(&self, m: &Mat4) -> Self {
        Self::new(m.transform_point3(self.origin), m.transform_vector3(self.direction))
    }

    /// Distance to the nearest non-negative intersection with `sphere`.
    ///
    /// A ray starting inside the sphere hits its far side.
    pub fn intersect_sphere(&self, sphere: &Sphere) -> Option<f32> {
        let oc = self.origin - sphere.center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - sphere.radius * sphere.radius;

        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_discriminant = discriminant.sqrt();
        let t1 = -b - sqrt_discriminant;
        let t2 = -b + sqrt_discriminant;

        if t1 >= 0.0 {
            Some(t1)
        } else if t2 >= 0.0 {
            Some(t2)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Result of one probe update, in field-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interaction {
    /// Current hit point, or the last one while inactive.
    pub point: Vec3,
    /// Smoothed hit-point velocity.
    pub velocity: Vec3,
    /// Camera position.
    pub camera_local: Vec3,
    /// Whether the pointer ray hit the sphere this frame.
    pub active: bool,
}

impl Interaction {
    /// Inputs for [`ParticleField::step`](crate::ParticleField::step).
    pub fn step_input(&self) -> StepInput {
        StepInput {
            interaction_point: self.point,
            interaction_velocity: self.velocity,
            camera_local: self.camera_local,
        }
    }
}

/// Converts pointer + camera into an interaction point and velocity.
#[derive(Debug, Clone)]
pub struct InteractionProbe {
    sphere: Sphere,
    point: Vec3,
    previous_point: Vec3,
    last_update: f32,
    raw_velocity: Vec3,
    smoothed_velocity: Vec3,
    active: bool,
}

impl InteractionProbe {
    /// Probe against a sphere of `radius` at the field's local origin.
    pub fn new(radius: f32) -> Self {
        Self {
            sphere: Sphere::new(Vec3::ZERO, radius),
            point: Vec3::ZERO,
            previous_point: Vec3::ZERO,
            last_update: 0.0,
            raw_velocity: Vec3::ZERO,
            smoothed_velocity: Vec3::ZERO,
            active: false,
        }
    }

    /// Local-space hit point of the pointer ray, if any.
    pub fn compute_interaction(
        &self,
        pointer_ndc: Vec2,
        camera: &Camera,
        field_world: &Mat4,
    ) -> Option<Vec3> {
        self.cast(pointer_ndc, camera, &field_world.inverse())
    }

    fn cast(&self, pointer_ndc: Vec2, camera: &Camera, world_to_local: &Mat4) -> Option<Vec3> {
        let local_ray = camera.ray_through_ndc(pointer_ndc).transformed(world_to_local);
        local_ray
            .intersect_sphere(&self.sphere)
            .map(|t| local_ray.at(t))
    }

    /// Cast the pointer, update the velocity estimate, and report the
    /// interaction for this frame. `time` is the simulation's elapsed time.
    pub fn update(
        &mut self,
        pointer_ndc: Vec2,
        camera: &Camera,
        field_world: &Mat4,
        time: f32,
    ) -> Interaction {
        let world_to_local = field_world.inverse();
        let hit = self.cast(pointer_ndc, camera, &world_to_local);
        self.track(hit, time);

        Interaction {
            point: self.point,
            velocity: self.smoothed_velocity,
            camera_local: world_to_local.transform_point3(camera.position),
            active: self.active,
        }
    }

    /// Feed one frame's hit (or miss) into the velocity estimate.
    ///
    /// History starts at the local origin and time zero, so the first hit is
    /// measured against the origin like any later one.
    pub fn track(&mut self, hit: Option<Vec3>, time: f32) {
        let was_active = self.active;
        self.active = hit.is_some();

        match hit {
            Some(point) => {
                self.point = point;
                let interval = time - self.last_update;
                if interval > 0.0 {
                    self.raw_velocity =
                        (point - self.previous_point) / interval.max(MIN_UPDATE_INTERVAL);
                    self.smoothed_velocity =
                        self.smoothed_velocity.lerp(self.raw_velocity, VELOCITY_SMOOTHING);
                    self.previous_point = point;
                    self.last_update = time;
                }
            }
            None => {
                self.raw_velocity = Vec3::ZERO;
                self.smoothed_velocity *= INACTIVE_DECAY;
            }
        }

        if was_active != self.active {
            log::trace!("interaction probe active: {} at t={:.3}", self.active, time);
        }
    }

    #[inline]
    pub fn point(&self) -> Vec3 {
        self.point
    }

    #[inline]
    pub fn raw_velocity(&self) -> Vec3 {
        self.raw_velocity
    }

    #[inline]
    pub fn smoothed_velocity(&self) -> Vec3 {
        self.smoothed_velocity
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_intersection_front() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        let t = ray.intersect_sphere(&Sphere::new(Vec3::ZERO, 3.2)).unwrap();
        assert!((t - 6.8).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_intersection_from_inside() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = ray.intersect_sphere(&Sphere::new(Vec3::ZERO, 3.2)).unwrap();
        assert!((t - 3.2).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_miss_and_behind() {
        let sphere = Sphere::new(Vec3::ZERO, 3.2);
        let miss = Ray::new(Vec3::new(0.0, 5.0, 10.0), Vec3::NEG_Z);
        assert!(miss.intersect_sphere(&sphere).is_none());
        let behind = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
        assert!(behind.intersect_sphere(&sphere).is_none());
    }

    #[test]
    fn test_ray_transform() {
        let m = Mat4::from_translation(Vec3::new(0.0, 0.0, -2.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z).transformed(&m);
        assert!((ray.origin.z - 8.0).abs() < 1e-6);
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_center_pointer_hits_front_of_sphere() {
        let probe = InteractionProbe::new(3.2);
        let camera = Camera::default();
        let hit = probe
            .compute_interaction(Vec2::ZERO, &camera, &Mat4::IDENTITY)
            .unwrap();
        assert!((hit - Vec3::new(0.0, 0.0, 3.2)).length() < 1e-3);
    }

    #[test]
    fn test_hit_is_in_local_space() {
        let probe = InteractionProbe::new(3.2);
        let camera = Camera::default();
        let world = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let hit = probe.compute_interaction(Vec2::ZERO, &camera, &world).unwrap();
        // A quarter turn maps local -x onto world +z, where the camera sits.
        assert!((hit - Vec3::new(-3.2, 0.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_corner_pointer_misses() {
        let probe = InteractionProbe::new(3.2);
        let camera = Camera::default();
        assert!(probe
            .compute_interaction(Vec2::new(1.0, 1.0), &camera, &Mat4::IDENTITY)
            .is_none());
    }

    #[test]
    fn test_update_reports_camera_local() {
        let mut probe = InteractionProbe::new(3.2);
        let camera = Camera::default();
        let world = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let interaction = probe.update(Vec2::ZERO, &camera, &world, 0.0);
        assert!(interaction.active);
        assert!((interaction.camera_local - Vec3::new(-8.5, 0.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_first_contact_measured_from_origin() {
        let mut probe = InteractionProbe::new(3.2);
        probe.track(None, 0.25);
        probe.track(Some(Vec3::new(0.0, 0.0, 3.2)), 0.5);
        assert!((probe.raw_velocity() - Vec3::new(0.0, 0.0, 6.4)).length() < 1e-4);
        assert!((probe.smoothed_velocity() - Vec3::new(0.0, 0.0, 0.96)).length() < 1e-5);
    }

    #[test]
    fn test_velocity_smoothing_lerps() {
        let mut probe = InteractionProbe::new(3.2);
        probe.track(Some(Vec3::new(0.1, 0.0, 0.0)), 0.1);
        assert!((probe.raw_velocity().x - 1.0).abs() < 1e-5);
        assert!((probe.smoothed_velocity().x - 0.15).abs() < 1e-5);

        probe.track(Some(Vec3::new(0.2, 0.0, 0.0)), 0.2);
        assert!((probe.smoothed_velocity().x - (0.15 + (1.0 - 0.15) * 0.15)).abs() < 1e-5);
    }

    #[test]
    fn test_update_matches_compute_interaction() {
        let mut probe = InteractionProbe::new(3.2);
        let camera = Camera::default();
        let world = Mat4::from_rotation_y(0.7);
        let pointer = Vec2::new(0.1, -0.05);
        let hit = probe.compute_interaction(pointer, &camera, &world).unwrap();
        let interaction = probe.update(pointer, &camera, &world, 0.1);
        assert_eq!(interaction.point, hit);
        let expected = world.inverse().transform_point3(camera.position);
        assert!((interaction.camera_local - expected).length() < 1e-5);
    }

    #[test]
    fn test_short_interval_is_clamped() {
        let mut probe = InteractionProbe::new(3.2);
        probe.track(Some(Vec3::ZERO), 1.0);
        probe.track(Some(Vec3::new(0.01, 0.0, 0.0)), 1.001);
        assert!((probe.raw_velocity().x - 0.01 * 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_same_time_does_not_update() {
        let mut probe = InteractionProbe::new(3.2);
        probe.track(Some(Vec3::ZERO), 1.0);
        probe.track(Some(Vec3::X), 1.0);
        assert_eq!(probe.smoothed_velocity(), Vec3::ZERO);
        assert_eq!(probe.point(), Vec3::X);
    }

    #[test]
    fn test_inactive_decay_keeps_point() {
        let mut probe = InteractionProbe::new(3.2);
        probe.track(Some(Vec3::ZERO), 0.0);
        probe.track(Some(Vec3::new(0.0, 0.5, 0.0)), 0.5);
        let v = probe.smoothed_velocity();
        probe.track(None, 0.6);
        assert!(!probe.is_active());
        assert_eq!(probe.point(), Vec3::new(0.0, 0.5, 0.0));
        assert!((probe.smoothed_velocity() - v * 0.95).length() < 1e-6);
    }
}
