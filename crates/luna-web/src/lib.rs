pub mod runner;

pub use js_sys;
pub use luna_engine;
pub use runner::{BufferRenderer, CanvasSurface, ViewerRunner};

/// Generate all `#[wasm_bindgen]` exports for a viewer app.
///
/// Generates:
/// - `thread_local!` storage for the ViewerRunner
/// - `with_runner()` helper; calls made before init or after stop are no-ops
/// - All wasm-bindgen exports (init, tick, input handlers, config, buffer accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// luna_web::export_viewer!("earth-moon");
/// ```
///
/// A second form takes a function returning the starting `ViewerConfig`:
///
/// ```ignore
/// luna_web::export_viewer!("earth-moon", initial_config);
/// ```
#[macro_export]
macro_rules! export_viewer {
    ($app_name:literal) => {
        $crate::export_viewer!($app_name, $crate::luna_engine::ViewerConfig::default);
    };

    ($app_name:literal, $config_fn:path) => {
        use std::cell::RefCell;
        use $crate::luna_engine::{InputEvent, Touches};

        thread_local! {
            static RUNNER: RefCell<Option<$crate::ViewerRunner>> = RefCell::new(None);
        }

        fn with_runner<T>(f: impl FnOnce(&mut $crate::ViewerRunner) -> T) -> Option<T> {
            RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
        }

        #[wasm_bindgen]
        pub fn viewer_init(width: f32, height: f32) -> bool {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let mut runner = $crate::ViewerRunner::new($config_fn());
            if let Err(e) = runner.init(width, height) {
                log::warn!("{}: init failed: {}", $app_name, e);
                return false;
            }
            let replaced = RUNNER.with(|cell| runner.install(&mut cell.borrow_mut()));
            if replaced.is_some() {
                log::info!("{}: stopped previous viewer", $app_name);
            }
            log::info!("{}: initialized", $app_name);
            true
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
        pub fn viewer_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn viewer_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn viewer_touch_start(count: u32, x0: f32, y0: f32, x1: f32, y1: f32) {
            let touches = Touches::from_raw(count, x0, y0, x1, y1);
            with_runner(|r| r.push_input(InputEvent::TouchStart { touches }));
        }

        #[wasm_bindgen]
        pub fn viewer_touch_move(count: u32, x0: f32, y0: f32, x1: f32, y1: f32) {
            let touches = Touches::from_raw(count, x0, y0, x1, y1);
            with_runner(|r| r.push_input(InputEvent::TouchMove { touches }));
        }

        /// `count` and points describe the fingers still down.
        #[wasm_bindgen]
        pub fn viewer_touch_end(count: u32, x0: f32, y0: f32, x1: f32, y1: f32) {
            let remaining = Touches::from_raw(count, x0, y0, x1, y1);
            with_runner(|r| r.push_input(InputEvent::TouchEnd { remaining }));
        }

        #[wasm_bindgen]
        pub fn viewer_wheel(delta_y: f32) {
            with_runner(|r| r.push_input(InputEvent::Wheel { delta_y }));
        }

        #[wasm_bindgen]
        pub fn viewer_resize(width: f32, height: f32) {
            with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
        }

        // ---- Configuration ----

        /// Merge a JSON patch. Returns false (and logs why) when rejected.
        #[wasm_bindgen]
        pub fn viewer_set_config(json: &str) -> bool {
            with_runner(|r| match r.set_config_json(json) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("{}: {}", $app_name, e);
                    false
                }
            })
            .unwrap_or(false)
        }

        /// Switch between "moon" and "earth".
        #[wasm_bindgen]
        pub fn viewer_select(name: &str) -> bool {
            with_runner(|r| match r.select(name) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("{}: {}", $app_name, e);
                    false
                }
            })
            .unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn viewer_config_json() -> String {
            with_runner(|r| r.config_json()).unwrap_or_default()
        }

        /// The active configuration as a JS object, for the settings panel.
        #[wasm_bindgen]
        pub fn viewer_config() -> wasm_bindgen::JsValue {
            let json = viewer_config_json();
            if json.is_empty() {
                return wasm_bindgen::JsValue::NULL;
            }
            $crate::js_sys::JSON::parse(&json).unwrap_or(wasm_bindgen::JsValue::NULL)
        }

        /// Tear down the viewer. Every export is a no-op afterwards.
        #[wasm_bindgen]
        pub fn viewer_stop() {
            let runner = RUNNER.with(|cell| cell.borrow_mut().take());
            if let Some(mut runner) = runner {
                runner.stop();
                log::info!("{}: stopped", $app_name);
            }
        }

        // ---- Textures ----

        #[wasm_bindgen]
        pub fn viewer_textures_json() -> String {
            with_runner(|r| r.textures_json()).unwrap_or_default()
        }

        #[wasm_bindgen]
        pub fn viewer_texture_ready(id: u32) -> bool {
            with_runner(|r| r.texture_ready(id)).unwrap_or(false)
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn viewer_cursor() -> u32 {
            with_runner(|r| r.cursor_code()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_camera_ptr() -> *const f32 {
            with_runner(|r| r.camera_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_nodes_ptr() -> *const f32 {
            with_runner(|r| r.nodes_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_node_count() -> u32 {
            with_runner(|r| r.node_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_stars_ptr() -> *const f32 {
            with_runner(|r| r.stars_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_star_count() -> u32 {
            with_runner(|r| r.star_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_star_generation() -> u32 {
            with_runner(|r| r.star_generation()).unwrap_or(0)
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_nodes() -> u32 {
            with_runner(|r| r.max_nodes()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_stars() -> u32 {
            with_runner(|r| r.max_stars()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
        }
    };
}
