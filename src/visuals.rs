//! Static render parameters for the particle points.
//!
//! The simulation does not render; these values travel alongside the
//! positions so every host draws the sphere the same way.

/// Blend mode for particle rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard alpha blending.
    Alpha,

    /// Additive blending (default).
    ///
    /// Overlapping particles become brighter, giving the sphere its glow.
    #[default]
    Additive,
}

/// How each particle is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointStyle {
    /// sRGB color, 0.0–1.0 per channel.
    pub color: [f32; 3],
    /// Point size in world units.
    pub size: f32,
    pub opacity: f32,
    pub blend: BlendMode,
    /// Whether points shrink with distance.
    pub size_attenuation: bool,
}

impl PointStyle {
    /// Parse `#RRGGBB` (leading `#` optional) into sRGB channels.
    pub fn parse_hex(hex: &str) -> Option<[f32; 3]> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .ok()
                .map(|c| c as f32 / 255.0)
        };
        Some([channel(0)?, channel(2)?, channel(4)?])
    }

    /// Color converted to linear space, for sRGB render targets.
    pub fn linear_color(&self) -> [f32; 3] {
        self.color.map(srgb_to_linear)
    }
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            color: [244.0 / 255.0, 90.0 / 255.0, 26.0 / 255.0],
            size: 0.02,
            opacity: 0.9,
            blend: BlendMode::Additive,
            size_attenuation: true,
        }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
