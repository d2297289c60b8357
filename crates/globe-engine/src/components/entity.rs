use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::api::types::EntityId;
use crate::components::mesh::MeshComponent;
use crate::components::points::PointsComponent;

/// Fat Entity: a single struct with optional components.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Inactive entities are skipped by rendering and picking.
    pub active: bool,
    pub pos: Vec3,
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub mesh: Option<MeshComponent>,
    pub points: Option<PointsComponent>,
}

impl Entity {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            mesh: None,
            points: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_points(mut self, points: PointsComponent) -> Self {
        self.points = Some(points);
        self
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Local-to-world transform (scale, then rotate, then translate).
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.orientation(), self.pos)
    }

    /// World-space radius of the sphere mesh, if any.
    /// Non-uniform scale is bounded by its largest axis.
    pub fn bounding_radius(&self) -> Option<f32> {
        let mesh = self.mesh.as_ref()?;
        Some(mesh.geometry.radius * self.scale.abs().max_element())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::PhongMaterial;

    #[test]
    fn world_matrix_applies_scale_then_translation() {
        let e = Entity::new(EntityId(1))
            .with_pos(Vec3::new(2.0, 0.0, 0.0))
            .with_scale(Vec3::splat(3.0));
        let p = e.world_matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn world_matrix_rotates_about_y() {
        let e = Entity::new(EntityId(1))
            .with_rotation(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0));
        let p = e.world_matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn bounding_radius_uses_largest_scale_axis() {
        let e = Entity::new(EntityId(1))
            .with_mesh(MeshComponent::sphere(1.0, PhongMaterial::default()))
            .with_scale(Vec3::new(1.0, 3.5, 2.0));
        assert!((e.bounding_radius().unwrap() - 3.5).abs() < 1e-6);
        assert!(Entity::new(EntityId(2)).bounding_radius().is_none());
    }
}
