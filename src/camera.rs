//! Cameras: a plain perspective camera for ray casting, and a damped orbit
//! rig that produces one.

use crate::math::safe_normalize;
use crate::probe::Ray;
use glam::{Mat4, Quat, Vec2, Vec3};

/// Perspective camera in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Quat,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera at `position` facing `target`, with +Y up.
    pub fn look_at(position: Vec3, target: Vec3, fov_y: f32, aspect: f32) -> Self {
        let forward = safe_normalize(target - position);
        let rotation = if forward == Vec3::ZERO {
            Quat::IDENTITY
        } else {
            let up = if forward.dot(Vec3::Y).abs() > 0.999 {
                Vec3::Z
            } else {
                Vec3::Y
            };
            Quat::from_mat4(&Mat4::look_at_rh(position, target, up).inverse())
        };

        Self {
            position,
            rotation,
            fov_y,
            aspect,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Direction the camera looks along.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray from the camera through a point in normalized device
    /// coordinates (`[-1, 1]`, +Y up).
    pub fn ray_through_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let through = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(self.position, through - self.position)
    }
}

impl Default for Camera {
    /// Looking at the origin from `(0, 0, 8.5)` with a 60° field of view.
    fn default() -> Self {
        Self::look_at(Vec3::new(0.0, 0.0, 8.5), Vec3::ZERO, 60f32.to_radians(), 1.0)
    }
}

/// Orbit camera with damped rotation, zoom and pan fixed.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Fraction of pending rotation applied (and removed) per update.
    pub damping: f32,
    pending_yaw: f32,
    pending_pitch: f32,
}

impl OrbitCamera {
    const PITCH_LIMIT: f32 = 1.5;

    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 8.5,
            target: Vec3::ZERO,
            fov_y: 60f32.to_radians(),
            damping: 0.05,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
        }
    }

    /// Queue a rotation; it is eased in over subsequent [`update`](Self::update)s.
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.pending_yaw += delta_yaw;
        self.pending_pitch += delta_pitch;
    }

    /// Apply one frame of damped rotation.
    pub fn update(&mut self) {
        self.yaw += self.pending_yaw * self.damping;
        self.pitch = (self.pitch + self.pending_pitch * self.damping)
            .clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
        self.pending_yaw *= 1.0 - self.damping;
        self.pending_pitch *= 1.0 - self.damping;
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera::look_at(self.position(), self.target, self.fov_y, aspect)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}
