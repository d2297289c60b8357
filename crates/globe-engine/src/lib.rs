pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Viewer, ViewerConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, ViewerEvent};
pub use components::entity::Entity;
pub use components::mesh::{Color, ColorError, MeshComponent, PhongMaterial, SphereGeometry};
pub use components::points::PointsComponent;
pub use core::rng::Rng;
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use renderer::camera::{PerspectiveCamera, Projection};
pub use renderer::point_instance::{PointBuffer, PointInstance};
pub use renderer::sphere_instance::{SphereBuffer, SphereInstance};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::ProtocolLayout;
pub use systems::lighting::{AmbientLight, PointLight, LightState};
pub use systems::raycast::{Intersection, Ray, Raycaster};
pub use systems::render::{build_point_buffer, build_sphere_buffer};
pub use systems::starfield::{StarfieldConfig, generate_starfield, starfield_points};

// Extensions: optional animation helpers
pub use extensions::{
    Easing, lerp, lerp_vec3, ease, ease_vec3,
    TweenState, Tween, TweenId, TweenTarget, TweenLoop,
};
