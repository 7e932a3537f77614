pub mod runner;

pub use orrery;
pub use runner::{FrameBuffer, InfoPanel, OrreryRunner, CAMERA_FLOATS};

use orrery::SimulationTime;

/// Wall clock backed by `Date.now()`; `SystemTime` is unavailable on wasm32.
pub fn browser_now() -> SimulationTime {
    SimulationTime::from_unix_seconds(js_sys::Date::now() / 1000.0)
}

/// Generate all `#[wasm_bindgen]` exports for an orrery demo.
///
/// Generates `thread_local!` storage for the [`OrreryRunner`], a
/// `with_runner()` helper, and the `orrery_*` exports (init, tick, commands,
/// pointer input, buffer accessors).
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod bodies;
/// mod ephemeris;
/// use ephemeris::KeplerEphemeris;
///
/// orrery_web::export_orrery!(KeplerEphemeris, KeplerEphemeris::solar_system(), bodies::catalog(), "solar-system");
/// ```
///
/// # Arguments
///
/// - `$ephemeris_type`: type implementing `orrery::Ephemeris`
/// - `$ephemeris`: expression building it
/// - `$catalog`: expression yielding `Result<Catalog, ConfigError>`
/// - `$name`: string literal used in log messages
///
/// The calling crate must depend on `wasm-bindgen`, `log`, `console_log`
/// and `console_error_panic_hook`.
#[macro_export]
macro_rules! export_orrery {
    ($ephemeris_type:ty, $ephemeris:expr, $catalog:expr, $name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::OrreryRunner<$ephemeris_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::OrreryRunner<$ephemeris_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
                Some(runner) => Some(f(runner)),
                None => {
                    log::warn!("{}: not initialized, call orrery_init() first", $name);
                    None
                }
            })
        }

        fn orrery_start(config: $crate::orrery::OrreryConfig) -> bool {
            let catalog = match $catalog {
                Ok(catalog) => catalog,
                Err(err) => {
                    log::error!("{}: bad catalog: {}", $name, err);
                    return false;
                }
            };
            match $crate::OrreryRunner::new(catalog, $ephemeris, config, $crate::browser_now) {
                Ok(runner) => {
                    RUNNER.with(|cell| {
                        *cell.borrow_mut() = Some(runner);
                    });
                    log::info!("{}: initialized", $name);
                    true
                }
                Err(err) => {
                    log::error!("{}: {}", $name, err);
                    false
                }
            }
        }

        fn orrery_install_hooks() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);
        }

        #[wasm_bindgen]
        pub fn orrery_init() -> bool {
            orrery_install_hooks();
            orrery_start($crate::orrery::OrreryConfig::default())
        }

        #[wasm_bindgen]
        pub fn orrery_init_with_config(json: &str) -> bool {
            orrery_install_hooks();
            match $crate::orrery::OrreryConfig::from_json(json) {
                Ok(config) => orrery_start(config),
                Err(err) => {
                    log::error!("{}: {}", $name, err);
                    false
                }
            }
        }

        #[wasm_bindgen]
        pub fn orrery_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        // ---- Commands ----

        #[wasm_bindgen]
        pub fn orrery_set_time_scale(scale: f64) -> f64 {
            with_runner(|r| r.set_time_scale(scale)).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn orrery_jump_to_now() {
            with_runner(|r| r.jump_to_now());
        }

        #[wasm_bindgen]
        pub fn orrery_toggle_pause() -> bool {
            with_runner(|r| r.toggle_pause()).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn orrery_toggle_trails() -> bool {
            with_runner(|r| r.toggle_trails()).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn orrery_reset_view() {
            with_runner(|r| r.reset_view());
        }

        #[wasm_bindgen]
        pub fn orrery_clear_selection() {
            with_runner(|r| r.clear_selection());
        }

        // ---- Input ----

        #[wasm_bindgen]
        pub fn orrery_pointer_down(button: u16, x: f32, y: f32) {
            with_runner(|r| r.pointer_down(button, x, y));
        }

        #[wasm_bindgen]
        pub fn orrery_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.pointer_move(x, y));
        }

        #[wasm_bindgen]
        pub fn orrery_pointer_up(button: u16, x: f32, y: f32) {
            with_runner(|r| r.pointer_up(button, x, y));
        }

        #[wasm_bindgen]
        pub fn orrery_wheel(delta_sign: f32) {
            with_runner(|r| r.wheel(delta_sign));
        }

        #[wasm_bindgen]
        pub fn orrery_click(x: f32, y: f32) -> i32 {
            with_runner(|r| r.click(x, y)).unwrap_or(-1)
        }

        #[wasm_bindgen]
        pub fn orrery_resize(width: u32, height: u32) {
            with_runner(|r| r.resize(width, height));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn orrery_info_json() -> String {
            with_runner(|r| r.info_json().to_string()).unwrap_or_default()
        }

        #[wasm_bindgen]
        pub fn orrery_time_label() -> String {
            with_runner(|r| r.time_label()).unwrap_or_default()
        }

        #[wasm_bindgen]
        pub fn orrery_time_scale() -> f64 {
            with_runner(|r| r.time_scale()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn orrery_is_paused() -> bool {
            with_runner(|r| r.is_paused()).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn orrery_instances_ptr() -> *const f32 {
            with_runner(|r| r.frame().instances_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn orrery_instance_count() -> u32 {
            with_runner(|r| r.frame().instance_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn orrery_trail_vertices_ptr() -> *const f32 {
            with_runner(|r| r.frame().trail_vertices_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn orrery_trail_vertex_count() -> u32 {
            with_runner(|r| r.frame().trail_vertex_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn orrery_trail_spans_ptr() -> *const u32 {
            with_runner(|r| r.frame().trail_spans_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn orrery_trail_span_count() -> u32 {
            with_runner(|r| r.frame().trail_span_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn orrery_orbit_vertices_ptr() -> *const f32 {
            with_runner(|r| r.frame().orbit_vertices_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn orrery_orbit_vertex_count() -> u32 {
            with_runner(|r| r.frame().orbit_vertex_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn orrery_orbit_spans_ptr() -> *const u32 {
            with_runner(|r| r.frame().orbit_spans_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn orrery_orbit_span_count() -> u32 {
            with_runner(|r| r.frame().orbit_span_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn orrery_orbit_generation() -> u32 {
            with_runner(|r| r.frame().orbit_generation()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn orrery_camera_ptr() -> *const f32 {
            with_runner(|r| r.frame().camera().as_ptr()).unwrap_or(std::ptr::null())
        }
    };
}
