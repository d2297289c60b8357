use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::mesh::MeshComponent;
use crate::components::points::PointsComponent;

/// Entity storage for a viewer scene.
/// A scene holds a handful of meshes and point clouds, so lookups are linear.
/// Renderers and picking read through `meshes()` and `point_clouds()`, which
/// already skip inactive entities.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(8)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
        }
    }

    /// Add an entity. An entity with the same id is replaced.
    pub fn spawn(&mut self, entity: Entity) {
        match self.entities.iter_mut().find(|e| e.id == entity.id) {
            Some(slot) => *slot = entity,
            None => self.entities.push(entity),
        }
    }

    /// Remove an entity by ID, keeping spawn order of the rest.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// All entities in spawn order, active or not.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Active entities carrying a sphere mesh.
    pub fn meshes(&self) -> impl Iterator<Item = (&Entity, &MeshComponent)> {
        self.entities
            .iter()
            .filter(|e| e.active)
            .filter_map(|e| e.mesh.as_ref().map(|mesh| (e, mesh)))
    }

    /// Active entities carrying a point cloud.
    pub fn point_clouds(&self) -> impl Iterator<Item = (&Entity, &PointsComponent)> {
        self.entities
            .iter()
            .filter(|e| e.active)
            .filter_map(|e| e.points.as_ref().map(|points| (e, points)))
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{Color, PhongMaterial};
    use glam::Vec3;

    fn sample_scene() -> Scene {
        let mut scene = Scene::new();
        scene.spawn(
            Entity::new(EntityId(1))
                .with_tag("planet")
                .with_mesh(MeshComponent::sphere(1.0, PhongMaterial::default())),
        );
        scene.spawn(
            Entity::new(EntityId(2))
                .with_tag("stars")
                .with_points(PointsComponent::new(vec![Vec3::ZERO], 0.02, Color::WHITE)),
        );
        scene
    }

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id).with_pos(Vec3::new(2.0, 0.0, 0.0)));
        assert_eq!(scene.get(id).unwrap().pos, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn respawning_an_id_replaces_it() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("old"));
        scene.spawn(Entity::new(EntityId(1)).with_tag("new"));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(EntityId(1)).unwrap().tag, "new");
    }

    #[test]
    fn despawn_keeps_order() {
        let mut scene = sample_scene();
        scene.spawn(Entity::new(EntityId(3)));
        assert!(scene.despawn(EntityId(1)).is_some());
        let ids: Vec<u32> = scene.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![2, 3]);
        assert!(scene.despawn(EntityId(1)).is_none());
    }

    #[test]
    fn typed_views_split_meshes_and_points() {
        let scene = sample_scene();
        let meshes: Vec<u32> = scene.meshes().map(|(e, _)| e.id.0).collect();
        let clouds: Vec<u32> = scene.point_clouds().map(|(e, _)| e.id.0).collect();
        assert_eq!(meshes, vec![1]);
        assert_eq!(clouds, vec![2]);
    }

    #[test]
    fn typed_views_skip_inactive() {
        let mut scene = sample_scene();
        scene.find_by_tag_mut("planet").unwrap().active = false;
        assert_eq!(scene.meshes().count(), 0);
        assert_eq!(scene.point_clouds().count(), 1);
    }

    #[test]
    fn find_by_tag() {
        let scene = sample_scene();
        assert_eq!(scene.find_by_tag("stars").unwrap().id, EntityId(2));
        assert!(scene.find_by_tag("moon").is_none());
    }
}
