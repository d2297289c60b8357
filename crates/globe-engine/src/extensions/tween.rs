// extensions/tween.rs
//
// Tweens animate one entity property from a start value to an end value.
// They address entities by EntityId and never hold references into the scene.
//
//   let mut tweens = TweenState::new();
//   tweens.add(planet, Tween::scale_uniform(1.0, 3.5, 0.8, Easing::CubicOut));
//   tweens.tick(dt, &mut ctx.scene);

use std::collections::HashMap;
use glam::Vec3;
use crate::api::types::EntityId;
use crate::components::mesh::Color;
use crate::core::scene::Scene;
use super::easing::{Easing, ease, ease_vec3};

/// What property a tween animates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenTarget {
    Position { from: Vec3, to: Vec3 },
    Scale { from: Vec3, to: Vec3 },
    /// Spin about the local Y axis.
    RotationY { from: f32, to: f32 },
    /// Mesh material color (no-op on entities without a mesh).
    Color { from: Color, to: Color },
}

/// What happens when a tween reaches its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenLoop {
    /// Stop and remove the tween.
    #[default]
    Once,
    /// Restart from the beginning.
    Loop,
    /// Reverse direction.
    PingPong,
}

#[derive(Debug, Clone)]
pub struct Tween {
    pub target: TweenTarget,
    /// Duration in seconds. Zero or negative jumps straight to the end value.
    pub duration: f32,
    pub elapsed: f32,
    pub easing: Easing,
    pub loop_mode: TweenLoop,
    pub playing: bool,
    forward: bool,
    /// Event id reported through `drain_completed` when a Once tween finishes.
    pub on_complete: Option<u32>,
}

impl Tween {
    pub fn new(target: TweenTarget, duration: f32, easing: Easing) -> Self {
        Self {
            target,
            duration,
            elapsed: 0.0,
            easing,
            loop_mode: TweenLoop::Once,
            playing: true,
            forward: true,
            on_complete: None,
        }
    }

    pub fn position(from: Vec3, to: Vec3, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::Position { from, to }, duration, easing)
    }

    pub fn scale(from: Vec3, to: Vec3, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::Scale { from, to }, duration, easing)
    }

    pub fn scale_uniform(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::scale(Vec3::splat(from), Vec3::splat(to), duration, easing)
    }

    pub fn rotation_y(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::RotationY { from, to }, duration, easing)
    }

    pub fn color(from: Color, to: Color, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::Color { from, to }, duration, easing)
    }

    // -- Builder methods --

    pub fn with_loop(mut self, mode: TweenLoop) -> Self {
        self.loop_mode = mode;
        self
    }

    pub fn with_on_complete(mut self, event_id: u32) -> Self {
        self.on_complete = Some(event_id);
        self
    }

    pub fn paused(mut self) -> Self {
        self.playing = false;
        self
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.loop_mode == TweenLoop::Once && self.elapsed >= self.duration
    }

    /// Eased position along the curve, honoring ping-pong direction.
    fn sample_t(&self) -> f32 {
        let t = self.progress();
        if self.forward {
            t
        } else {
            1.0 - t
        }
    }
}

/// Handle to a tween for later reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(pub u32);

/// Manages all active tweens.
#[derive(Debug, Default)]
pub struct TweenState {
    tweens: HashMap<TweenId, (EntityId, Tween)>,
    next_id: u32,
    completed_events: Vec<u32>,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entity: EntityId, tween: Tween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.insert(id, (entity, tween));
        id
    }

    pub fn remove(&mut self, id: TweenId) -> bool {
        self.tweens.remove(&id).is_some()
    }

    /// Cancel every tween on an entity, leaving its properties where they are.
    pub fn remove_entity(&mut self, entity: EntityId) {
        self.tweens.retain(|_, (e, _)| *e != entity);
    }

    pub fn pause(&mut self, id: TweenId) {
        if let Some((_, tween)) = self.tweens.get_mut(&id) {
            tween.playing = false;
        }
    }

    pub fn resume(&mut self, id: TweenId) {
        if let Some((_, tween)) = self.tweens.get_mut(&id) {
            tween.playing = true;
        }
    }

    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(&id).map(|(_, t)| t)
    }

    /// Whether any tween is running on the entity.
    pub fn is_animating(&self, entity: EntityId) -> bool {
        self.tweens.values().any(|(e, t)| *e == entity && t.playing)
    }

    /// Advance all tweens and write their values into the scene.
    /// Tweens whose entity is gone are dropped. Returns the number that completed.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> usize {
        let mut finished = Vec::new();

        for (&id, (entity_id, tween)) in self.tweens.iter_mut() {
            let entity = match scene.get_mut(*entity_id) {
                Some(e) => e,
                None => {
                    finished.push((id, false));
                    continue;
                }
            };
            if !tween.playing {
                continue;
            }

            tween.elapsed += dt;
            let t = tween.sample_t();

            match tween.target {
                TweenTarget::Position { from, to } => {
                    entity.pos = ease_vec3(from, to, t, tween.easing);
                }
                TweenTarget::Scale { from, to } => {
                    entity.scale = ease_vec3(from, to, t, tween.easing);
                }
                TweenTarget::RotationY { from, to } => {
                    entity.rotation.y = ease(from, to, t, tween.easing);
                }
                TweenTarget::Color { from, to } => {
                    if let Some(mesh) = &mut entity.mesh {
                        mesh.material.color = from.lerp(to, tween.easing.apply(t));
                    }
                }
            }

            if tween.elapsed >= tween.duration {
                match tween.loop_mode {
                    TweenLoop::Once => finished.push((id, true)),
                    TweenLoop::Loop => tween.elapsed = 0.0,
                    TweenLoop::PingPong => {
                        tween.elapsed = 0.0;
                        tween.forward = !tween.forward;
                    }
                }
            }
        }

        let mut completed = 0;
        for (id, ran_out) in finished {
            if let Some((_, tween)) = self.tweens.remove(&id) {
                if ran_out {
                    completed += 1;
                    if let Some(event_id) = tween.on_complete {
                        self.completed_events.push(event_id);
                    }
                }
            }
        }
        completed
    }

    /// Drain completion event ids.
    pub fn drain_completed(&mut self) -> impl Iterator<Item = u32> + '_ {
        self.completed_events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
        self.completed_events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use crate::components::mesh::{MeshComponent, PhongMaterial};

    fn scene_with(id: EntityId) -> Scene {
        let mut scene = Scene::new();
        scene.spawn(
            Entity::new(id).with_mesh(MeshComponent::sphere(1.0, PhongMaterial::new(Color::BLACK))),
        );
        scene
    }

    #[test]
    fn scale_tween_reaches_target_and_is_removed() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut tweens = TweenState::new();
        tweens.add(id, Tween::scale_uniform(1.0, 3.0, 1.0, Easing::Linear));

        tweens.tick(0.5, &mut scene);
        assert!((scene.get(id).unwrap().scale.x - 2.0).abs() < 1e-4);

        assert_eq!(tweens.tick(0.5, &mut scene), 1);
        assert!((scene.get(id).unwrap().scale - Vec3::splat(3.0)).length() < 1e-4);
        assert!(tweens.is_empty());
    }

    #[test]
    fn zero_duration_snaps_to_end() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut tweens = TweenState::new();
        tweens.add(id, Tween::scale_uniform(1.0, 1.6, 0.0, Easing::CubicOut));
        tweens.tick(1.0 / 60.0, &mut scene);
        assert!((scene.get(id).unwrap().scale.y - 1.6).abs() < 1e-6);
    }

    #[test]
    fn color_tween_blends_material() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut tweens = TweenState::new();
        tweens.add(id, Tween::color(Color::BLACK, Color::WHITE, 1.0, Easing::Linear));
        tweens.tick(0.25, &mut scene);
        let color = scene.get(id).unwrap().mesh.unwrap().material.color;
        assert!((color.g - 0.25).abs() < 1e-4);
    }

    #[test]
    fn ping_pong_returns_to_start() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut tweens = TweenState::new();
        tweens.add(
            id,
            Tween::rotation_y(0.0, 1.0, 1.0, Easing::Linear).with_loop(TweenLoop::PingPong),
        );
        tweens.tick(1.0, &mut scene);
        assert!((scene.get(id).unwrap().rotation.y - 1.0).abs() < 1e-4);
        tweens.tick(1.0, &mut scene);
        assert!(scene.get(id).unwrap().rotation.y.abs() < 1e-4);
        assert_eq!(tweens.len(), 1);
    }

    #[test]
    fn on_complete_events_are_drained() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut tweens = TweenState::new();
        tweens.add(id, Tween::position(Vec3::ZERO, Vec3::X, 0.1, Easing::Linear).with_on_complete(7));
        tweens.tick(0.2, &mut scene);
        assert_eq!(tweens.drain_completed().collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn tweens_for_despawned_entities_are_dropped() {
        let mut scene = Scene::new();
        let mut tweens = TweenState::new();
        tweens.add(EntityId(9), Tween::scale_uniform(1.0, 2.0, 1.0, Easing::Linear));
        assert_eq!(tweens.tick(0.1, &mut scene), 0);
        assert!(tweens.is_empty());
    }

    #[test]
    fn paused_tweens_hold_still() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut tweens = TweenState::new();
        let handle = tweens.add(id, Tween::scale_uniform(1.0, 2.0, 1.0, Easing::Linear).paused());
        tweens.tick(0.5, &mut scene);
        assert_eq!(scene.get(id).unwrap().scale, Vec3::ONE);
        assert!(!tweens.is_animating(id));

        tweens.resume(handle);
        tweens.tick(0.5, &mut scene);
        assert!((scene.get(id).unwrap().scale.x - 1.5).abs() < 1e-4);
    }

    #[test]
    fn remove_entity_cancels_its_tweens() {
        let id = EntityId(1);
        let mut tweens = TweenState::new();
        tweens.add(id, Tween::scale_uniform(1.0, 2.0, 1.0, Easing::Linear));
        tweens.add(id, Tween::rotation_y(0.0, 1.0, 1.0, Easing::Linear));
        tweens.add(EntityId(2), Tween::rotation_y(0.0, 1.0, 1.0, Easing::Linear));
        tweens.remove_entity(id);
        assert_eq!(tweens.len(), 1);
    }
}
