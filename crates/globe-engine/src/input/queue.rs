/// Input event types the engine understands.
/// Generic, with no viewer-specific semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at canvas coordinates (x, y) in CSS pixels.
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at canvas coordinates (x, y) in CSS pixels.
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to canvas coordinates (x, y) in CSS pixels.
    PointerMove { x: f32, y: f32 },
    /// The canvas changed size.
    Resize { width: f32, height: f32, pixel_ratio: f32 },
    /// A custom event from the UI layer (buttons, selects, etc.).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
#[derive(Debug)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// The most recent resize in the queue as (width, height, pixel_ratio).
    /// Earlier resizes in the same frame are superseded.
    pub fn last_resize(&self) -> Option<(f32, f32, f32)> {
        self.events.iter().rev().find_map(|event| match *event {
            InputEvent::Resize { width, height, pixel_ratio } => Some((width, height, pixel_ratio)),
            _ => None,
        })
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
