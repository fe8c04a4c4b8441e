use bytemuck::{Pod, Zeroable};
use particle_sphere::{Camera, Mat4, PointStyle};

pub const SHADER_SOURCE: &str = include_str!("shader.wgsl");

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct Uniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    /// RGB plus opacity.
    pub color: [f32; 4],
    pub size: f32,
    pub size_attenuation: u32,
    pub _padding: [f32; 2],
}

impl Uniforms {
    pub fn new(camera: &Camera, model: Mat4, style: &PointStyle, linear: bool) -> Self {
        let [r, g, b] = if linear {
            style.linear_color()
        } else {
            style.color
        };

        Self {
            view: camera.view_matrix().to_cols_array_2d(),
            proj: camera.projection_matrix().to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            color: [r, g, b, style.opacity],
            size: style.size,
            size_attenuation: style.size_attenuation as u32,
            _padding: [0.0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniforms_match_wgsl_layout() {
        // Three mat4x4, a vec4, two scalars and a vec2 pad.
        assert_eq!(std::mem::size_of::<Uniforms>(), 224);
    }

    #[test]
    fn test_uniforms_carry_style() {
        let style = PointStyle::default();
        let u = Uniforms::new(&Camera::default(), Mat4::IDENTITY, &style, false);
        assert_eq!(u.color[3], 0.9);
        assert_eq!(u.size, 0.02);
        assert_eq!(u.size_attenuation, 1);
    }
}
