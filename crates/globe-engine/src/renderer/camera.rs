use glam::{Mat4, Vec2, Vec3};
use crate::systems::raycast::Ray;

/// Perspective camera looking from `position` toward `target`, Y-up.
/// Projects world points to viewport pixels (origin top-left, Y-down).
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    /// Viewport size in CSS pixels.
    pub viewport: Vec2,
    /// Device pixels per CSS pixel, forwarded to the host for canvas sizing.
    pub pixel_ratio: f32,
}

/// Projection result from world space to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Viewport position in CSS pixels.
    pub pos: Vec2,
    /// Distance along the view axis (positive = in front of the camera).
    pub depth: f32,
    /// Normalized device depth in [0, 1].
    pub ndc_z: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            fov_y_deg: 75.0,
            aspect: 800.0 / 600.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            viewport: Vec2::new(800.0, 600.0),
            pixel_ratio: 1.0,
        }
    }
}

impl PerspectiveCamera {
    pub fn new(fov_y_deg: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_deg,
            near,
            far,
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Point the camera at a world position.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Resize the viewport (window resize). Degenerate sizes are ignored.
    pub fn set_viewport(&mut self, width: f32, height: f32, pixel_ratio: f32) {
        if !(width > 0.0 && height > 0.0) {
            return;
        }
        self.viewport = Vec2::new(width, height);
        self.aspect = width / height;
        if pixel_ratio > 0.0 {
            self.pixel_ratio = pixel_ratio;
        }
    }

    /// Perspective projection, depth mapped to [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.target - self.position;
        if forward.length_squared() < 1e-12 {
            return Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y);
        }
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world point. None if it lies outside the near/far range.
    pub fn project(&self, world: Vec3) -> Option<Projection> {
        let view = self.view_matrix().transform_point3(world);
        let depth = -view.z;
        if depth < self.near || depth > self.far {
            return None;
        }
        let clip = self.projection_matrix() * view.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        Some(Projection {
            pos: Vec2::new(
                (ndc.x + 1.0) * 0.5 * self.viewport.x,
                (1.0 - ndc.y) * 0.5 * self.viewport.y,
            ),
            depth,
            ndc_z: ndc.z,
        })
    }

    /// On-screen pixels covered by one world unit at the given view depth.
    pub fn pixels_per_unit(&self, depth: f32) -> f32 {
        let half_fov = (self.fov_y_deg.to_radians() * 0.5).tan();
        self.viewport.y * 0.5 / (half_fov * depth.max(self.near))
    }

    /// Viewport pixels to normalized device coordinates (x right, y up, both in [-1, 1]).
    pub fn screen_to_ndc(&self, px: Vec2) -> Vec2 {
        Vec2::new(
            (px.x / self.viewport.x) * 2.0 - 1.0,
            -(px.y / self.viewport.y) * 2.0 + 1.0,
        )
    }

    /// World-space ray from the camera through an NDC point.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let through = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(self.position, through - self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_projects_to_viewport_center() {
        let cam = PerspectiveCamera::default();
        let proj = cam.project(Vec3::ZERO).unwrap();
        assert!((proj.pos.x - 400.0).abs() < 1e-3);
        assert!((proj.pos.y - 300.0).abs() < 1e-3);
        assert!((proj.depth - 5.0).abs() < 1e-5);
    }

    #[test]
    fn offset_matches_pixels_per_unit() {
        let cam = PerspectiveCamera::default();
        let proj = cam.project(Vec3::new(1.0, 0.0, 0.0)).unwrap();
        let expected = 400.0 + cam.pixels_per_unit(5.0);
        assert!((proj.pos.x - expected).abs() < 0.05, "{} vs {}", proj.pos.x, expected);
    }

    #[test]
    fn up_is_toward_top_of_viewport() {
        let cam = PerspectiveCamera::default();
        let proj = cam.project(Vec3::new(0.0, 1.0, 0.0)).unwrap();
        assert!(proj.pos.y < 300.0);
    }

    #[test]
    fn points_behind_camera_are_culled() {
        let cam = PerspectiveCamera::default();
        assert!(cam.project(Vec3::new(0.0, 0.0, 10.0)).is_none());
    }

    #[test]
    fn set_viewport_updates_aspect() {
        let mut cam = PerspectiveCamera::default();
        cam.set_viewport(1920.0, 1080.0, 2.0);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        assert_eq!(cam.pixel_ratio, 2.0);

        cam.set_viewport(0.0, 0.0, 1.0);
        assert_eq!(cam.viewport, Vec2::new(1920.0, 1080.0));
    }

    #[test]
    fn screen_to_ndc_maps_corners() {
        let cam = PerspectiveCamera::default();
        assert_eq!(cam.screen_to_ndc(Vec2::new(0.0, 0.0)), Vec2::new(-1.0, 1.0));
        assert_eq!(cam.screen_to_ndc(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
        assert_eq!(cam.screen_to_ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    }

    #[test]
    fn center_ray_points_down_negative_z() {
        let cam = PerspectiveCamera::default();
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        assert_eq!(ray.origin, cam.position);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn ray_passes_through_projected_point() {
        let cam = PerspectiveCamera::default();
        let world = Vec3::new(2.0, 0.5, 0.0);
        let proj = cam.project(world).unwrap();
        let ray = cam.ray_from_ndc(cam.screen_to_ndc(proj.pos));
        let along = ray.at((world - ray.origin).dot(ray.direction));
        assert!((along - world).length() < 1e-3);
    }
}
