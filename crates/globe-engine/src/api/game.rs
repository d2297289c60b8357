use serde::{Deserialize, Serialize};
use crate::core::scene::Scene;
use crate::api::types::{EntityId, ViewerEvent};
use crate::input::queue::InputQueue;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::point_instance::PointBuffer;
use crate::renderer::sphere_instance::SphereBuffer;
use crate::systems::lighting::LightState;

/// Configuration for the engine, provided by the viewer.
/// Every field has a default, so a partial JSON override is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum fixed steps per frame before the accumulator is dropped (default: 10).
    pub max_steps: u32,
    /// Initial viewport width in CSS pixels.
    pub viewport_width: f32,
    /// Initial viewport height in CSS pixels.
    pub viewport_height: f32,
    /// Initial device pixel ratio.
    pub pixel_ratio: f32,
    /// Maximum number of projected spheres (default: 16).
    pub max_sphere_instances: usize,
    /// Maximum number of projected points (default: 4096).
    pub max_point_instances: usize,
    /// Maximum number of viewer events per frame (default: 32).
    pub max_events: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps: 10,
            viewport_width: 800.0,
            viewport_height: 600.0,
            pixel_ratio: 1.0,
            max_sphere_instances: 16,
            max_point_instances: 4096,
            max_events: 32,
        }
    }
}

impl ViewerConfig {
    /// Largest accepted `max_steps`.
    pub const MAX_STEPS_LIMIT: u32 = 240;
    /// Largest accepted `max_sphere_instances`.
    pub const SPHERE_LIMIT: usize = 1024;
    /// Largest accepted `max_point_instances`.
    pub const POINT_LIMIT: usize = 65_536;
    /// Largest accepted `max_events`.
    pub const EVENT_LIMIT: usize = 1024;

    /// Parse a (possibly partial) JSON override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Replace values the engine can't run with. A zero or negative `fixed_dt`
    /// would stall the tick loop, and unbounded capacities size the frame buffers.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            log::warn!("fixed_dt {} is not a positive time step; using {}", self.fixed_dt, defaults.fixed_dt);
            self.fixed_dt = defaults.fixed_dt;
        }
        if self.max_steps == 0 || self.max_steps > Self::MAX_STEPS_LIMIT {
            let clamped = self.max_steps.clamp(1, Self::MAX_STEPS_LIMIT);
            log::warn!("max_steps {} out of range; using {clamped}", self.max_steps);
            self.max_steps = clamped;
        }
        if !(self.viewport_width > 0.0 && self.viewport_width.is_finite())
            || !(self.viewport_height > 0.0 && self.viewport_height.is_finite())
        {
            log::warn!(
                "viewport {}x{} is degenerate; using {}x{}",
                self.viewport_width,
                self.viewport_height,
                defaults.viewport_width,
                defaults.viewport_height
            );
            self.viewport_width = defaults.viewport_width;
            self.viewport_height = defaults.viewport_height;
        }
        if !(self.pixel_ratio > 0.0 && self.pixel_ratio.is_finite()) {
            log::warn!("pixel_ratio {} is invalid; using {}", self.pixel_ratio, defaults.pixel_ratio);
            self.pixel_ratio = defaults.pixel_ratio;
        }
        self.max_sphere_instances = capped("max_sphere_instances", self.max_sphere_instances, Self::SPHERE_LIMIT);
        self.max_point_instances = capped("max_point_instances", self.max_point_instances, Self::POINT_LIMIT);
        self.max_events = capped("max_events", self.max_events, Self::EVENT_LIMIT);
        self
    }

    /// Overlay the fields present in `json` onto this config.
    /// Keys this config doesn't know are ignored, so one settings object can
    /// carry engine and viewer fields side by side.
    pub fn merged_with(&self, json: &str) -> Result<Self, serde_json::Error> {
        let mut base = serde_json::to_value(self)?;
        let patch: serde_json::Value = serde_json::from_str(json)?;
        if let (serde_json::Value::Object(base_map), serde_json::Value::Object(patch_map)) =
            (&mut base, patch)
        {
            for (key, value) in patch_map {
                if base_map.contains_key(&key) {
                    base_map.insert(key, value);
                }
            }
        }
        serde_json::from_value::<Self>(base).map(Self::sanitized)
    }
}

fn capped(field: &str, value: usize, limit: usize) -> usize {
    if value > limit {
        log::warn!("{field} {value} exceeds {limit}; capping");
        limit
    } else {
        value
    }
}

/// The core contract every viewer must fulfill.
pub trait Viewer {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> ViewerConfig {
        ViewerConfig::default()
    }

    /// Apply a JSON settings override before init. Unknown fields are ignored.
    fn apply_settings(&mut self, _json: &str) -> Result<(), serde_json::Error> {
        Ok(())
    }

    /// Setup initial state: spawn entities, add lights, place the camera.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed tick. Animate, react to input, emit events.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Free-text request from the host page (e.g. a search box).
    /// Returns whether the request was understood.
    fn query(&mut self, _ctx: &mut EngineContext, _text: &str) -> bool {
        false
    }

    /// Optional read-only render pass for custom render commands.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to Viewer::init, update and query.
pub struct EngineContext {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub lights: LightState,
    pub events: Vec<ViewerEvent>,
    /// Seconds per fixed tick, set by the runner from the config.
    pub dt: f32,
    notices: Vec<String>,
    panel_json: String,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            camera: PerspectiveCamera::default(),
            lights: LightState::new(),
            events: Vec::new(),
            dt: ViewerConfig::default().fixed_dt,
            notices: Vec::new(),
            panel_json: String::from("{}"),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a viewer event to be forwarded to the host this frame.
    pub fn emit_event(&mut self, event: ViewerEvent) {
        self.events.push(event);
    }

    /// Queue a message the host should show to the user.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notices.push(message.into());
    }

    /// Oldest pending notice, if any.
    pub fn take_notice(&mut self) -> Option<String> {
        if self.notices.is_empty() {
            None
        } else {
            Some(self.notices.remove(0))
        }
    }

    pub fn pending_notices(&self) -> usize {
        self.notices.len()
    }

    /// Serialize the text panel state. On failure the previous panel stays.
    pub fn publish_panel<T: Serialize>(&mut self, panel: &T) {
        match serde_json::to_string(panel) {
            Ok(json) => self.panel_json = json,
            Err(err) => log::error!("panel serialization failed: {err}"),
        }
    }

    /// Last published panel as JSON (`{}` before anything was published).
    pub fn panel_json(&self) -> &str {
        &self.panel_json
    }

    /// Clear per-frame transient data. Notices persist until taken.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    pub spheres: &'a mut SphereBuffer,
    pub points: &'a mut PointBuffer,
    pub camera: &'a PerspectiveCamera,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::{Error as _, Serializer};

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut ctx = EngineContext::new();
        assert_eq!(ctx.next_id(), EntityId(1));
        assert_eq!(ctx.next_id(), EntityId(2));
    }

    #[test]
    fn events_clear_but_notices_persist() {
        let mut ctx = EngineContext::new();
        ctx.emit_event(ViewerEvent::new(1.0, 0.0, 0.0, 0.0));
        ctx.notify("hello");
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
        assert_eq!(ctx.pending_notices(), 1);
    }

    #[test]
    fn notices_come_out_in_order() {
        let mut ctx = EngineContext::new();
        ctx.notify("first");
        ctx.notify("second");
        assert_eq!(ctx.take_notice().as_deref(), Some("first"));
        assert_eq!(ctx.take_notice().as_deref(), Some("second"));
        assert_eq!(ctx.take_notice(), None);
    }

    #[derive(Serialize)]
    struct Panel {
        name: &'static str,
    }

    struct Broken;

    impl Serialize for Broken {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("nope"))
        }
    }

    #[test]
    fn publish_panel_keeps_previous_on_failure() {
        let mut ctx = EngineContext::new();
        assert_eq!(ctx.panel_json(), "{}");
        ctx.publish_panel(&Panel { name: "EARTH" });
        assert_eq!(ctx.panel_json(), r#"{"name":"EARTH"}"#);
        ctx.publish_panel(&Broken);
        assert_eq!(ctx.panel_json(), r#"{"name":"EARTH"}"#);
    }

    #[test]
    fn partial_config_json_keeps_defaults() {
        let config = ViewerConfig::from_json(r#"{ "max_events": 8 }"#).unwrap();
        assert_eq!(config.max_events, 8);
        assert_eq!(config.max_sphere_instances, ViewerConfig::default().max_sphere_instances);
    }

    #[test]
    fn merge_overrides_known_fields_only() {
        let base = ViewerConfig { max_point_instances: 2000, ..ViewerConfig::default() };
        let merged = base
            .merged_with(r#"{ "max_events": 4, "spin_speed": 0.01 }"#)
            .unwrap();
        assert_eq!(merged.max_events, 4);
        assert_eq!(merged.max_point_instances, 2000);
    }

    #[test]
    fn merge_rejects_wrong_types() {
        let base = ViewerConfig::default();
        assert!(base.merged_with(r#"{ "max_events": "many" }"#).is_err());
    }

    #[test]
    fn non_positive_fixed_dt_falls_back_to_default() {
        let default_dt = ViewerConfig::default().fixed_dt;
        for json in [r#"{ "fixed_dt": 0 }"#, r#"{ "fixed_dt": -0.5 }"#] {
            assert_eq!(ViewerConfig::from_json(json).unwrap().fixed_dt, default_dt);
            assert_eq!(ViewerConfig::default().merged_with(json).unwrap().fixed_dt, default_dt);
        }
        let nan = ViewerConfig { fixed_dt: f32::NAN, ..ViewerConfig::default() };
        assert_eq!(nan.sanitized().fixed_dt, default_dt);
    }

    #[test]
    fn oversized_capacities_are_capped() {
        let config = ViewerConfig::default()
            .merged_with(r#"{ "max_point_instances": 100000000, "max_events": 5000, "max_steps": 0 }"#)
            .unwrap();
        assert_eq!(config.max_point_instances, ViewerConfig::POINT_LIMIT);
        assert_eq!(config.max_events, ViewerConfig::EVENT_LIMIT);
        assert_eq!(config.max_steps, 1);
    }

    #[test]
    fn degenerate_viewport_falls_back_to_default() {
        let config = ViewerConfig::from_json(r#"{ "viewport_width": 0, "pixel_ratio": -1 }"#).unwrap();
        assert_eq!(config.viewport_width, 800.0);
        assert_eq!(config.viewport_height, 600.0);
        assert_eq!(config.pixel_ratio, 1.0);
    }

    #[test]
    fn valid_config_is_untouched() {
        let config = ViewerConfig { fixed_dt: 0.01, max_events: 8, ..ViewerConfig::default() };
        assert_eq!(config.clone().sanitized(), config);
    }

    #[test]
    fn malformed_config_json_is_an_error() {
        assert!(ViewerConfig::from_json("{ nope").is_err());
    }
}
