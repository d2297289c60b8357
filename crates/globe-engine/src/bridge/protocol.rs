//! Frame data shared with the host. Must stay in sync with the host's `main.js`.
//!
//! There is no single shared block. The header and each section are separate
//! arrays inside wasm linear memory, and the host views each one through its
//! own pointer export (`get_header_ptr`, `get_spheres_ptr`, `get_points_ptr`,
//! `get_events_ptr`). Pointers can move when memory grows, so the host
//! re-reads them every frame.
//!
//! All values are f32:
//! ```text
//! header:  16 floats (indices below)
//! spheres: sphere_count × 16 floats, at most max_sphere_instances
//! points:  point_count × 8 floats, at most max_point_instances
//! events:  event_count × 4 floats, at most max_events
//! ```
//!
//! The header repeats the capacities and live counts so a host can size its
//! views from one read.

use crate::api::game::ViewerConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices. Index 0 is reserved.
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_MAX_SPHERES: usize = 3;
pub const HEADER_SPHERE_COUNT: usize = 4;
pub const HEADER_MAX_POINTS: usize = 5;
pub const HEADER_POINT_COUNT: usize = 6;
pub const HEADER_MAX_EVENTS: usize = 7;
pub const HEADER_EVENT_COUNT: usize = 8;
pub const HEADER_VIEWPORT_WIDTH: usize = 9;
pub const HEADER_VIEWPORT_HEIGHT: usize = 10;
// 11..16 reserved.

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per sphere instance (wire format, fixed).
pub const SPHERE_FLOATS: usize = 16;

/// Floats per star point: x, y, size, r, g, b, alpha, depth.
pub const POINT_FLOATS: usize = 8;

/// Floats per viewer event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// Section capacities and sizes for one runner.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_sphere_instances: usize,
    pub max_point_instances: usize,
    pub max_events: usize,

    pub sphere_data_floats: usize,
    pub point_data_floats: usize,
    pub event_data_floats: usize,

    /// Header plus every section at full capacity, in floats.
    pub buffer_total_floats: usize,
    /// The same total in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_sphere_instances: usize, max_point_instances: usize, max_events: usize) -> Self {
        let sphere_data_floats = max_sphere_instances * SPHERE_FLOATS;
        let point_data_floats = max_point_instances * POINT_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let buffer_total_floats =
            HEADER_FLOATS + sphere_data_floats + point_data_floats + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_sphere_instances,
            max_point_instances,
            max_events,
            sphere_data_floats,
            point_data_floats,
            event_data_floats,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a ViewerConfig.
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(
            config.max_sphere_instances,
            config.max_point_instances,
            config.max_events,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{PointInstance, SphereInstance};
    use crate::api::types::ViewerEvent;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let config = ViewerConfig::default();
        let layout = ProtocolLayout::from_config(&config);

        assert_eq!(layout.max_sphere_instances, config.max_sphere_instances);
        assert_eq!(layout.sphere_data_floats, config.max_sphere_instances * 16);
        assert_eq!(layout.point_data_floats, config.max_point_instances * 8);
        assert_eq!(layout.event_data_floats, config.max_events * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn custom_capacities_compute_correctly() {
        let layout = ProtocolLayout::new(4, 2000, 8);
        let expected_total = HEADER_FLOATS + 4 * 16 + 2000 * 8 + 8 * 4;
        assert_eq!(layout.buffer_total_floats, expected_total);
        assert_eq!(layout.buffer_total_bytes, expected_total * 4);
    }

    #[test]
    fn zero_capacities_leave_only_the_header() {
        let layout = ProtocolLayout::new(0, 0, 0);
        assert_eq!(layout.buffer_total_floats, HEADER_FLOATS);
    }

    #[test]
    fn wire_sizes_match_instance_structs() {
        assert_eq!(SPHERE_FLOATS, SphereInstance::FLOATS);
        assert_eq!(POINT_FLOATS, PointInstance::FLOATS);
        assert_eq!(EVENT_FLOATS, ViewerEvent::FLOATS);
    }

    #[test]
    fn header_indices_fit_in_header() {
        assert!(HEADER_VIEWPORT_HEIGHT < HEADER_FLOATS);
    }
}
