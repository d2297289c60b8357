//! Starfield backdrop: points scattered uniformly through a cube around the origin.

use glam::Vec3;
use crate::components::mesh::Color;
use crate::components::points::PointsComponent;
use crate::core::rng::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct StarfieldConfig {
    pub count: u32,
    /// Edge length of the cube the stars fill, centered on the origin.
    pub spread: f32,
    pub seed: u64,
    /// Star size in world units.
    pub size: f32,
    pub color: Color,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 2000,
            spread: 50.0,
            seed: 0x5EED_57A2,
            size: 0.02,
            color: Color::WHITE,
        }
    }
}

/// Star positions, each coordinate uniform in [-spread / 2, spread / 2).
pub fn generate_starfield(config: &StarfieldConfig) -> Vec<Vec3> {
    let mut rng = Rng::new(config.seed);
    (0..config.count)
        .map(|_| {
            let x = rng.next_signed(config.spread);
            let y = rng.next_signed(config.spread);
            let z = rng.next_signed(config.spread);
            Vec3::new(x, y, z)
        })
        .collect()
}

/// Generate the stars and wrap them as a renderable point cloud.
pub fn starfield_points(config: &StarfieldConfig) -> PointsComponent {
    PointsComponent::new(generate_starfield(config), config.size, config.color)
}
