//! Scene lighting: one ambient term plus persistent point lights.
//!
//! Point lights have no distance falloff. The renderer collapses them into a
//! single dominant direction per sphere, which the host shades with Phong.

use glam::Vec3;
use crate::components::mesh::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
}

impl PointLight {
    pub fn new(position: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }

    /// Effective brightness (intensity weighted by color luminance).
    pub fn strength(&self) -> f32 {
        self.intensity * self.color.luminance()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: Color::from_hex(0x333333),
        }
    }
}

/// Combined light arriving at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSample {
    /// Unit world-space direction toward the lights.
    pub direction: Vec3,
    pub intensity: f32,
}

/// Manages active lights and the ambient color.
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: AmbientLight,
}

impl LightState {
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            ambient: AmbientLight::default(),
        }
    }

    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn set_ambient(&mut self, color: Color) {
        self.ambient = AmbientLight { color };
    }

    pub fn ambient(&self) -> Color {
        self.ambient.color
    }

    pub fn ambient_level(&self) -> f32 {
        self.ambient.color.luminance()
    }

    /// Strength-weighted direction from `point` toward all lights.
    /// None when there are no lights or they cancel out.
    pub fn shade(&self, point: Vec3) -> Option<LightSample> {
        let mut sum = Vec3::ZERO;
        let mut intensity = 0.0;
        for light in &self.lights {
            let to_light = (light.position - point).normalize_or_zero();
            let strength = light.strength();
            sum += to_light * strength;
            intensity += strength;
        }
        let direction = sum.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }
        Some(LightSample {
            direction,
            intensity,
        })
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}
