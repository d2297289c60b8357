use glam::Vec3;
use crate::core::scene::Scene;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::point_instance::{PointBuffer, PointInstance};
use crate::renderer::sphere_instance::{SphereBuffer, SphereInstance};
use crate::systems::lighting::LightState;

/// Points this far outside the viewport are still emitted, so large stars don't pop at the edge.
const VIEWPORT_MARGIN_PX: f32 = 4.0;

/// Project every active sphere mesh, attach lighting, and sort back-to-front
/// (painter's algorithm). When there are more spheres than the buffer holds,
/// the farthest ones are dropped.
pub fn build_sphere_buffer(
    scene: &Scene,
    camera: &PerspectiveCamera,
    lights: &LightState,
    buffer: &mut SphereBuffer,
) {
    buffer.clear();
    let view = camera.view_matrix();
    let ambient = lights.ambient_level();

    let mut items: Vec<SphereInstance> = Vec::new();
    for (entity, mesh) in scene.meshes() {
        let radius = mesh.geometry.radius * entity.scale.abs().max_element();
        let proj = match camera.project(entity.pos) {
            Some(p) => p,
            None => continue,
        };

        let (light_dir, light_intensity) = match lights.shade(entity.pos) {
            Some(sample) => (
                view.transform_vector3(sample.direction).normalize_or_zero(),
                sample.intensity,
            ),
            None => (Vec3::ZERO, 0.0),
        };

        let material = &mesh.material;
        items.push(SphereInstance {
            x: proj.pos.x,
            y: proj.pos.y,
            radius: radius * camera.pixels_per_unit(proj.depth),
            depth: proj.depth,
            r: material.color.r,
            g: material.color.g,
            b: material.color.b,
            shininess: material.shininess,
            specular: material.specular.luminance(),
            light_x: light_dir.x,
            light_y: light_dir.y,
            light_z: light_dir.z,
            light_intensity,
            ambient: (ambient + material.emissive).min(1.0),
            spin: entity.rotation.y,
            texture: material.texture.map_or(-1.0, |t| t as f32),
        });
    }

    // Keep the nearest that fit, then emit farthest first.
    items.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    items.truncate(buffer.capacity());
    for item in items.into_iter().rev() {
        buffer.push(item);
    }
}

/// Project every point of every active point cloud through its entity transform.
/// Returns the number of points emitted.
pub fn build_point_buffer(
    scene: &Scene,
    camera: &PerspectiveCamera,
    buffer: &mut PointBuffer,
) -> usize {
    buffer.clear();
    let (w, h) = (camera.viewport.x, camera.viewport.y);

    for (entity, points) in scene.point_clouds() {
        let world = entity.world_matrix();
        for local in &points.positions {
            let proj = match camera.project(world.transform_point3(*local)) {
                Some(p) => p,
                None => continue,
            };
            if proj.pos.x < -VIEWPORT_MARGIN_PX
                || proj.pos.y < -VIEWPORT_MARGIN_PX
                || proj.pos.x > w + VIEWPORT_MARGIN_PX
                || proj.pos.y > h + VIEWPORT_MARGIN_PX
            {
                continue;
            }
            let size = if points.size_attenuation {
                points.size * camera.pixels_per_unit(proj.depth)
            } else {
                points.size
            };
            let pushed = buffer.push(PointInstance {
                x: proj.pos.x,
                y: proj.pos.y,
                size,
                r: points.color.r,
                g: points.color.g,
                b: points.color.b,
                alpha: 1.0,
                depth: proj.depth,
            });
            if !pushed {
                return buffer.len();
            }
        }
    }
    buffer.len()
}
