use globe_engine::{
    Viewer, ViewerConfig, EngineContext, RenderContext,
    InputEvent, InputQueue, SphereBuffer, PointBuffer,
    FixedTimestep, ProtocolLayout,
};
use globe_engine::bridge::protocol::{
    HEADER_FLOATS, HEADER_FRAME_COUNTER, HEADER_PROTOCOL_VERSION,
    HEADER_MAX_SPHERES, HEADER_SPHERE_COUNT, HEADER_MAX_POINTS, HEADER_POINT_COUNT,
    HEADER_MAX_EVENTS, HEADER_EVENT_COUNT, HEADER_VIEWPORT_WIDTH, HEADER_VIEWPORT_HEIGHT,
    PROTOCOL_VERSION,
};
use globe_engine::systems::render::{build_point_buffer, build_sphere_buffer};

/// Generic viewer runner that wires up the engine loop.
///
/// Each concrete viewer (e.g., `planet-viewer`) creates a `thread_local!` ViewerRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct ViewerRunner<V: Viewer> {
    viewer: V,
    ctx: EngineContext,
    input: InputQueue,
    spheres: SphereBuffer,
    points: PointBuffer,
    timestep: FixedTimestep,
    config: ViewerConfig,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    frame: u64,
    initialized: bool,
}

impl<V: Viewer> ViewerRunner<V> {
    pub fn new(viewer: V) -> Self {
        let config = viewer.config();
        Self::with_config(viewer, config)
    }

    /// Build a runner from a JSON override. The same object is offered to the
    /// viewer's own settings; bad JSON falls back to defaults with a warning.
    pub fn with_settings_json(mut viewer: V, json: &str) -> Self {
        if let Err(err) = viewer.apply_settings(json) {
            log::warn!("ignoring viewer settings: {err}");
        }
        let base = viewer.config();
        let config = match base.merged_with(json) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring engine config override: {err}");
                base
            }
        };
        Self::with_config(viewer, config)
    }

    fn with_config(viewer: V, config: ViewerConfig) -> Self {
        let config = config.sanitized();
        let timestep = FixedTimestep::with_max_steps(config.fixed_dt, config.max_steps);
        let layout = ProtocolLayout::from_config(&config);

        let mut ctx = EngineContext::new();
        ctx.dt = timestep.dt();

        Self {
            viewer,
            ctx,
            input: InputQueue::new(),
            spheres: SphereBuffer::with_capacity(config.max_sphere_instances),
            points: PointBuffer::with_capacity(config.max_point_instances),
            timestep,
            layout,
            config,
            header: [0.0; HEADER_FLOATS],
            frame: 0,
            initialized: false,
        }
    }

    /// Initialize the viewer. Call once after construction.
    pub fn init(&mut self) {
        self.ctx.camera.set_viewport(
            self.config.viewport_width,
            self.config.viewport_height,
            self.config.pixel_ratio,
        );
        self.viewer.init(&mut self.ctx);
        self.initialized = true;
        self.rebuild_buffers();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Forward a free-text request to the viewer. Returns whether it was understood.
    pub fn query(&mut self, text: &str) -> bool {
        if !self.initialized {
            return false;
        }
        self.viewer.query(&mut self.ctx, text)
    }

    /// Run one frame tick: update the viewer, then rebuild the frame buffers.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        if let Some((width, height, pixel_ratio)) = self.input.last_resize() {
            self.ctx.camera.set_viewport(width, height, pixel_ratio);
        }

        // Fixed timestep accumulation. Input waits for a frame that actually
        // ticks and is seen by the first step only.
        let steps = self.timestep.accumulate(dt);
        if steps > 0 {
            let pending = std::mem::take(&mut self.input);
            let idle = InputQueue::new();
            for step in 0..steps {
                let input = if step == 0 { &pending } else { &idle };
                self.viewer.update(&mut self.ctx, input);
            }
        }

        self.ctx.events.truncate(self.layout.max_events);
        self.frame += 1;
        self.rebuild_buffers();
    }

    fn rebuild_buffers(&mut self) {
        build_sphere_buffer(&self.ctx.scene, &self.ctx.camera, &self.ctx.lights, &mut self.spheres);
        build_point_buffer(&self.ctx.scene, &self.ctx.camera, &mut self.points);

        // Allow the viewer to add custom render commands
        {
            let mut render_ctx = RenderContext {
                spheres: &mut self.spheres,
                points: &mut self.points,
                camera: &self.ctx.camera,
            };
            self.viewer.render(&mut render_ctx);
        }

        self.write_header();
    }

    fn write_header(&mut self) {
        let h = &mut self.header;
        h[HEADER_FRAME_COUNTER] = self.frame as f32;
        h[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        h[HEADER_MAX_SPHERES] = self.layout.max_sphere_instances as f32;
        h[HEADER_SPHERE_COUNT] = self.spheres.len() as f32;
        h[HEADER_MAX_POINTS] = self.layout.max_point_instances as f32;
        h[HEADER_POINT_COUNT] = self.points.len() as f32;
        h[HEADER_MAX_EVENTS] = self.layout.max_events as f32;
        h[HEADER_EVENT_COUNT] = self.ctx.events.len() as f32;
        h[HEADER_VIEWPORT_WIDTH] = self.ctx.camera.viewport.x;
        h[HEADER_VIEWPORT_HEIGHT] = self.ctx.camera.viewport.y;
    }

    // ---- Host-facing state ----

    /// Last published text panel as JSON.
    pub fn panel_json(&self) -> String {
        self.ctx.panel_json().to_owned()
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.ctx.take_notice()
    }

    /// Frames ticked since init.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    // ---- Pointer accessors, one per section, read by the host each frame ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn spheres_ptr(&self) -> *const f32 {
        self.spheres.instances_ptr()
    }

    pub fn sphere_count(&self) -> u32 {
        self.spheres.len() as u32
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.points.points_ptr()
    }

    pub fn point_count(&self) -> u32 {
        self.points.len() as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn viewport_width(&self) -> f32 {
        self.ctx.camera.viewport.x
    }

    pub fn viewport_height(&self) -> f32 {
        self.ctx.camera.viewport.y
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_sphere_instances(&self) -> u32 {
        self.layout.max_sphere_instances as u32
    }

    pub fn max_point_instances(&self) -> u32 {
        self.layout.max_point_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
