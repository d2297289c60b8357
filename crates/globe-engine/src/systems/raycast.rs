//! Ray picking against sphere meshes.
//!
//! Spheres are tested analytically against their bounding radius, which for
//! a UV sphere is the mesh itself up to tessellation error.

use glam::Vec3;
use crate::api::types::EntityId;
use crate::core::scene::Scene;
use crate::components::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray; the direction is normalized (a zero direction becomes -Z).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        let direction = direction.try_normalize().unwrap_or(Vec3::NEG_Z);
        Self { origin, direction }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance to the first hit on a sphere, ignoring hits behind the origin.
    /// A ray starting inside the sphere hits the far side.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let near = -b - root;
        if near >= 0.0 {
            return Some(near);
        }
        let far = -b + root;
        (far >= 0.0).then_some(far)
    }
}

/// A ray hit on an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub entity: EntityId,
    pub distance: f32,
    pub point: Vec3,
}

pub struct Raycaster {
    pub ray: Ray,
    pub near: f32,
    pub far: f32,
}

impl Raycaster {
    pub fn new(ray: Ray) -> Self {
        Self {
            ray,
            near: 0.0,
            far: f32::INFINITY,
        }
    }

    /// Ray from the camera through a point in normalized device coordinates.
    pub fn from_camera(camera: &crate::renderer::camera::PerspectiveCamera, ndc: glam::Vec2) -> Self {
        Self::new(camera.ray_from_ndc(ndc))
    }

    fn hit(&self, entity: &Entity) -> Option<Intersection> {
        let radius = entity.bounding_radius()?;
        let distance = self.ray.intersect_sphere(entity.pos, radius)?;
        if distance < self.near || distance > self.far {
            return None;
        }
        Some(Intersection {
            entity: entity.id,
            distance,
            point: self.ray.at(distance),
        })
    }

    /// All active mesh hits in the scene, nearest first.
    pub fn intersect_scene(&self, scene: &Scene) -> Vec<Intersection> {
        let mut hits: Vec<Intersection> = scene.meshes().filter_map(|(e, _)| self.hit(e)).collect();
        sort_nearest_first(&mut hits);
        hits
    }

    /// Hits restricted to the given entities, nearest first.
    pub fn intersect_entities(&self, scene: &Scene, ids: &[EntityId]) -> Vec<Intersection> {
        let mut hits: Vec<Intersection> = scene
            .meshes()
            .filter(|(e, _)| ids.contains(&e.id))
            .filter_map(|(e, _)| self.hit(e))
            .collect();
        sort_nearest_first(&mut hits);
        hits
    }
}

fn sort_nearest_first(hits: &mut [Intersection]) {
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{MeshComponent, PhongMaterial};
    use crate::renderer::camera::PerspectiveCamera;
    use glam::Vec2;

    fn sphere_at(id: u32, pos: Vec3, scale: f32) -> Entity {
        Entity::new(EntityId(id))
            .with_pos(pos)
            .with_scale(Vec3::splat(scale))
            .with_mesh(MeshComponent::sphere(1.0, PhongMaterial::default()))
    }

    #[test]
    fn ray_hits_sphere_front_face() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let t = ray.intersect_sphere(Vec3::ZERO, 1.0).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn ray_misses_sphere() {
        let ray = Ray::new(Vec3::new(0.0, 2.0, 5.0), Vec3::NEG_Z);
        assert!(ray.intersect_sphere(Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn sphere_behind_origin_is_ignored() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(ray.intersect_sphere(Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn ray_from_inside_hits_far_side() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap();
        assert!((t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn scene_hits_sorted_nearest_first() {
        let mut scene = Scene::new();
        scene.spawn(sphere_at(1, Vec3::new(0.0, 0.0, -10.0), 1.0));
        scene.spawn(sphere_at(2, Vec3::ZERO, 1.0));
        let caster = Raycaster::new(Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z));
        let hits = caster.intersect_scene(&scene);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].entity, EntityId(2));
        assert!((hits[0].point - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-4);
    }

    #[test]
    fn scale_grows_hit_radius() {
        let mut scene = Scene::new();
        scene.spawn(sphere_at(1, Vec3::ZERO, 3.5));
        let caster = Raycaster::new(Ray::new(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z));
        assert_eq!(caster.intersect_scene(&scene).len(), 1);
    }

    #[test]
    fn restricted_intersection_skips_other_entities() {
        let mut scene = Scene::new();
        scene.spawn(sphere_at(1, Vec3::ZERO, 1.0));
        scene.spawn(sphere_at(2, Vec3::new(0.0, 0.0, -3.0), 1.0));
        let caster = Raycaster::new(Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z));
        let hits = caster.intersect_entities(&scene, &[EntityId(2)]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entity, EntityId(2));
    }

    #[test]
    fn inactive_entities_are_not_picked() {
        let mut scene = Scene::new();
        let mut e = sphere_at(1, Vec3::ZERO, 1.0);
        e.active = false;
        scene.spawn(e);
        let caster = Raycaster::new(Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z));
        assert!(caster.intersect_scene(&scene).is_empty());
    }

    #[test]
    fn restricted_intersection_skips_inactive_targets() {
        let mut scene = Scene::new();
        let mut e = sphere_at(1, Vec3::ZERO, 1.0);
        e.active = false;
        scene.spawn(e);
        let caster = Raycaster::new(Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z));
        assert!(caster.intersect_entities(&scene, &[EntityId(1)]).is_empty());
    }

    #[test]
    fn camera_click_on_offset_planet() {
        let camera = PerspectiveCamera::default();
        let mut scene = Scene::new();
        scene.spawn(sphere_at(1, Vec3::new(2.0, 0.0, 0.0), 1.6));

        let center = camera.project(Vec3::new(2.0, 0.0, 0.0)).unwrap().pos;
        let hit = Raycaster::from_camera(&camera, camera.screen_to_ndc(center));
        assert_eq!(hit.intersect_scene(&scene).len(), 1);

        let miss = Raycaster::from_camera(&camera, camera.screen_to_ndc(Vec2::new(5.0, 5.0)));
        assert!(miss.intersect_scene(&scene).is_empty());
    }
}
