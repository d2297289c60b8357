use glam::Vec3;
use super::mesh::Color;

/// A cloud of same-sized points in entity-local space (e.g. a starfield).
#[derive(Debug, Clone, PartialEq)]
pub struct PointsComponent {
    pub positions: Vec<Vec3>,
    /// Point size in world units (or pixels when attenuation is off).
    pub size: f32,
    pub color: Color,
    /// Shrink points with distance like any other world-space object.
    pub size_attenuation: bool,
}

impl PointsComponent {
    pub fn new(positions: Vec<Vec3>, size: f32, color: Color) -> Self {
        Self {
            positions,
            size,
            color,
            size_attenuation: true,
        }
    }

    pub fn with_size_attenuation(mut self, enabled: bool) -> Self {
        self.size_attenuation = enabled;
        self
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
