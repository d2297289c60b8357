use bytemuck::{Pod, Zeroable};

/// Per-point data for one projected point (a star).
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    pub x: f32,
    pub y: f32,
    /// Point diameter in CSS pixels.
    pub size: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub alpha: f32,
    pub depth: f32,
}

impl PointInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Capacity-bounded buffer of projected points.
pub struct PointBuffer {
    points: Vec<PointInstance>,
    capacity: usize,
}

impl PointBuffer {
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            points: Vec::with_capacity(max),
            capacity: max,
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Append a point. Returns false (and drops it) when the buffer is full.
    pub fn push(&mut self, point: PointInstance) -> bool {
        if self.points.len() >= self.capacity {
            return false;
        }
        self.points.push(point);
        true
    }

    pub fn is_full(&self) -> bool {
        self.points.len() >= self.capacity
    }

    pub fn points(&self) -> &[PointInstance] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.points.as_ptr() as *const f32
    }
}

impl Default for PointBuffer {
    fn default() -> Self {
        Self::new()
    }
}
