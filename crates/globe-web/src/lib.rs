pub mod runner;

pub use runner::ViewerRunner;

/// Generate all `#[wasm_bindgen]` exports for a viewer.
///
/// Generates:
/// - `thread_local!` storage for the ViewerRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (viewer_init, viewer_tick, input handlers, search, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use globe_engine::*;
///
/// mod viewer;
/// use viewer::MyViewer;
///
/// globe_web::export_viewer!(MyViewer, "my-viewer");
/// ```
///
/// # Arguments
///
/// - `$viewer_type`: The viewer struct type that implements `globe_engine::Viewer`
///   and has a `new()` constructor
/// - `$viewer_name`: A string literal used in log messages
///
/// Calls made before `viewer_init` are ignored and return zero/empty values.
#[macro_export]
macro_rules! export_viewer {
    ($viewer_type:ty, $viewer_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::ViewerRunner<$viewer_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::ViewerRunner<$viewer_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                match borrow.as_mut() {
                    Some(runner) => Some(f(runner)),
                    None => {
                        log::warn!("{}: not initialized, call viewer_init() first", $viewer_name);
                        None
                    }
                }
            })
        }

        fn install_runner(runner: $crate::ViewerRunner<$viewer_type>) {
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            with_runner(|r| r.init());
            log::info!("{}: initialized", $viewer_name);
        }

        fn install_logging() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);
        }

        #[wasm_bindgen]
        pub fn viewer_init() {
            install_logging();
            install_runner($crate::ViewerRunner::new(<$viewer_type>::new()));
        }

        /// Initialize with a JSON override for engine and viewer settings.
        #[wasm_bindgen]
        pub fn viewer_init_with_config(json: &str) {
            install_logging();
            install_runner($crate::ViewerRunner::with_settings_json(<$viewer_type>::new(), json));
        }

        #[wasm_bindgen]
        pub fn viewer_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn viewer_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn viewer_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn viewer_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn viewer_resize(width: f32, height: f32, pixel_ratio: f32) {
            with_runner(|r| r.push_input(InputEvent::Resize { width, height, pixel_ratio }));
        }

        #[wasm_bindgen]
        pub fn viewer_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        /// Free-text search. Returns false when the viewer didn't recognize it.
        #[wasm_bindgen]
        pub fn viewer_search(text: &str) -> bool {
            with_runner(|r| r.query(text)).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn viewer_panel_json() -> String {
            with_runner(|r| r.panel_json()).unwrap_or_else(|| String::from("{}"))
        }

        #[wasm_bindgen]
        pub fn viewer_take_notice() -> Option<String> {
            with_runner(|r| r.take_notice()).flatten()
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_spheres_ptr() -> *const f32 {
            with_runner(|r| r.spheres_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_sphere_count() -> u32 {
            with_runner(|r| r.sphere_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_points_ptr() -> *const f32 {
            with_runner(|r| r.points_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_point_count() -> u32 {
            with_runner(|r| r.point_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_events_ptr() -> *const f32 {
            with_runner(|r| r.events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_events_len() -> u32 {
            with_runner(|r| r.events_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_viewport_width() -> f32 {
            with_runner(|r| r.viewport_width()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_viewport_height() -> f32 {
            with_runner(|r| r.viewport_height()).unwrap_or(0.0)
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_sphere_instances() -> u32 {
            with_runner(|r| r.max_sphere_instances()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_point_instances() -> u32 {
            with_runner(|r| r.max_point_instances()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
        }
    };
}
