use bytemuck::{Pod, Zeroable};

/// Per-instance data for one projected, lit sphere.
/// The host shades a disc at (x, y) with these parameters.
/// 16 floats = 64 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SphereInstance {
    pub x: f32,
    pub y: f32,
    /// Projected radius in CSS pixels.
    pub radius: f32,
    pub depth: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub shininess: f32,
    /// Specular strength (luminance of the material's specular color).
    pub specular: f32,
    /// Unit direction toward the dominant light, in view space.
    pub light_x: f32,
    pub light_y: f32,
    pub light_z: f32,
    pub light_intensity: f32,
    /// Ambient light level (luminance).
    pub ambient: f32,
    /// Spin about the local Y axis in radians, for texture scrolling.
    pub spin: f32,
    /// Host texture slot, -1 for none.
    pub texture: f32,
}

impl SphereInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Capacity-bounded buffer of sphere instances.
pub struct SphereBuffer {
    instances: Vec<SphereInstance>,
    capacity: usize,
}

impl SphereBuffer {
    pub fn new() -> Self {
        Self::with_capacity(16)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
            capacity: max,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Append an instance. Returns false (and drops it) when the buffer is full.
    pub fn push(&mut self, instance: SphereInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instances(&self) -> &[SphereInstance] {
        &self.instances
    }

    pub fn instances_mut(&mut self) -> &mut [SphereInstance] {
        &mut self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for SphereBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_instance_is_64_bytes() {
        assert_eq!(std::mem::size_of::<SphereInstance>(), SphereInstance::STRIDE_BYTES);
        assert_eq!(SphereInstance::FLOATS, 16);
    }

    #[test]
    fn push_stops_at_capacity() {
        let mut buf = SphereBuffer::with_capacity(2);
        assert!(buf.push(SphereInstance::default()));
        assert!(buf.push(SphereInstance::default()));
        assert!(!buf.push(SphereInstance::default()));
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn fields_are_laid_out_in_wire_order() {
        let inst = SphereInstance {
            x: 1.0,
            radius: 3.0,
            texture: 16.0,
            ..Default::default()
        };
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&inst));
        assert_eq!(floats[0], 1.0);
        assert_eq!(floats[2], 3.0);
        assert_eq!(floats[15], 16.0);
    }
}
