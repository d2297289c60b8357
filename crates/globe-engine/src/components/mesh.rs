use thiserror::Error;

/// Linear RGB color, components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Error parsing a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("color `{0}` must have exactly six hex digits")]
    Length(String),
    #[error("color `{0}` contains a non-hex digit")]
    Digit(String),
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Parse `#rrggbb`, `0xrrggbb` or bare `rrggbb`.
    pub fn parse_hex(s: &str) -> Result<Self, ColorError> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.len() != 6 {
            return Err(ColorError::Length(s.to_string()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::Digit(s.to_string()));
        }
        let hex = u32::from_str_radix(digits, 16).map_err(|_| ColorError::Digit(s.to_string()))?;
        Ok(Self::from_hex(hex))
    }

    /// Pack back into `0xRRGGBB`, rounding each channel.
    pub fn to_hex(self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Perceptual brightness (Rec. 709 weights).
    pub fn luminance(self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// UV sphere geometry. Segment counts are forwarded to the host for tessellation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereGeometry {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl SphereGeometry {
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self {
            radius,
            width_segments: width_segments.max(3),
            height_segments: height_segments.max(2),
        }
    }
}

impl Default for SphereGeometry {
    fn default() -> Self {
        Self::new(1.0, 64, 64)
    }
}

/// Blinn-Phong surface parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhongMaterial {
    pub color: Color,
    /// Specular exponent.
    pub shininess: f32,
    pub specular: Color,
    /// Self-illumination added on top of lighting.
    pub emissive: f32,
    /// Host texture slot, or None for a flat color.
    pub texture: Option<u32>,
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            shininess: 30.0,
            specular: Color::from_hex(0x111111),
            emissive: 0.0,
            texture: None,
        }
    }
}

impl PhongMaterial {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_specular(mut self, specular: Color) -> Self {
        self.specular = specular;
        self
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_texture(mut self, texture: Option<u32>) -> Self {
        self.texture = texture;
        self
    }
}

/// A sphere mesh: geometry plus material.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeshComponent {
    pub geometry: SphereGeometry,
    pub material: PhongMaterial,
}

impl MeshComponent {
    pub fn new(geometry: SphereGeometry, material: PhongMaterial) -> Self {
        Self { geometry, material }
    }

    /// Sphere of the given radius with default tessellation.
    pub fn sphere(radius: f32, material: PhongMaterial) -> Self {
        Self::new(SphereGeometry::new(radius, 64, 64), material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_unpacks_channels() {
        let c = Color::from_hex(0x2e86de);
        assert!((c.r - 46.0 / 255.0).abs() < 1e-6);
        assert!((c.g - 134.0 / 255.0).abs() < 1e-6);
        assert!((c.b - 222.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn parse_hex_accepts_common_prefixes() {
        let expected = Color::from_hex(0xd35400);
        assert_eq!(Color::parse_hex("#d35400").unwrap(), expected);
        assert_eq!(Color::parse_hex("0xd35400").unwrap(), expected);
        assert_eq!(Color::parse_hex("D35400").unwrap(), expected);
    }

    #[test]
    fn parse_hex_rejects_bad_input() {
        assert!(matches!(Color::parse_hex("#fff"), Err(ColorError::Length(_))));
        assert!(matches!(Color::parse_hex("#gg0000"), Err(ColorError::Digit(_))));
    }

    #[test]
    fn to_hex_inverts_from_hex() {
        assert_eq!(Color::from_hex(0x341f97).to_hex(), 0x341f97);
    }

    #[test]
    fn sphere_geometry_clamps_segments() {
        let g = SphereGeometry::new(1.0, 0, 0);
        assert_eq!(g.width_segments, 3);
        assert_eq!(g.height_segments, 2);
    }
}
