pub mod canvas;
pub mod config;
pub mod host;
pub mod mount;
pub mod runner;
pub mod session;

pub use canvas::CanvasSurface;
pub use config::StoredConfig;
pub use host::WebHost;
pub use mount::{mount_widget, MountedWidget, WebSession};
pub use runner::WidgetRunner;
pub use session::Session;

/// Install the panic hook and console logger. Safe to call repeatedly.
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Generate all `#[wasm_bindgen]` exports for a widget.
///
/// Two integration modes are exported side by side:
/// - self-driven: `widget_mount(canvas_id)` / `widget_unmount()`, where Rust
///   registers the listeners and runs the frame loop;
/// - host-driven: `widget_init`, `widget_tick` and the input/buffer exports,
///   where a JavaScript renderer owns the loop and reads shared buffers.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use folio_engine::*;
///
/// mod widget;
/// use widget::MyWidget;
///
/// folio_web::export_widget!(MyWidget, "my-widget");
/// ```
///
/// # Arguments
///
/// - `$widget_type`: a type implementing `folio_engine::Widget` with a `new()` constructor
/// - `$widget_name`: a string literal used in log messages
#[macro_export]
macro_rules! export_widget {
    ($widget_type:ty, $widget_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::WidgetRunner<$widget_type>>> = RefCell::new(None);
            static MOUNTED: RefCell<Option<$crate::MountedWidget<$widget_type>>> = RefCell::new(None);
            static CONFIG: RefCell<$crate::StoredConfig> = RefCell::new($crate::StoredConfig::new());
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::WidgetRunner<$widget_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
        }

        /// Build a fresh widget with every accepted override applied.
        fn new_widget() -> $widget_type {
            let mut widget = <$widget_type>::new();
            CONFIG.with(|cell| {
                if let Err(err) = cell.borrow().apply(&mut widget) {
                    log::warn!("{}: stored config rejected: {}", $widget_name, err);
                }
            });
            widget
        }

        // ---- Configuration ----

        /// Merge `json` onto the accepted overrides. Later mounts and inits
        /// start from the merged result.
        #[wasm_bindgen]
        pub fn widget_configure(json: &str) -> bool {
            $crate::init_logging();
            let accepted = CONFIG.with(|cell| cell.borrow_mut().accept(json, <$widget_type>::new()));
            if let Err(err) = accepted {
                log::warn!("{}: config rejected: {}", $widget_name, err);
                return false;
            }
            let _ = with_runner(|r| r.configure(json));
            MOUNTED.with(|cell| {
                if let Some(mounted) = cell.borrow().as_ref() {
                    let _ = mounted.configure(json);
                }
            });
            true
        }

        // ---- Self-driven mode ----

        #[wasm_bindgen]
        pub fn widget_mount(canvas_id: &str) -> bool {
            $crate::init_logging();
            widget_unmount();
            match $crate::mount_widget(new_widget(), canvas_id) {
                Ok(mounted) => {
                    MOUNTED.with(|cell| *cell.borrow_mut() = Some(mounted));
                    log::info!("{}: mounted on #{}", $widget_name, canvas_id);
                    true
                }
                Err(err) => {
                    log::warn!("{}: mount failed: {}", $widget_name, err);
                    false
                }
            }
        }

        #[wasm_bindgen]
        pub fn widget_unmount() {
            let mounted = MOUNTED.with(|cell| cell.borrow_mut().take());
            if mounted.is_some() {
                drop(mounted);
                log::info!("{}: unmounted", $widget_name);
            }
        }

        #[wasm_bindgen]
        pub fn widget_is_mounted() -> bool {
            MOUNTED.with(|cell| cell.borrow().is_some())
        }

        // ---- Host-driven mode ----

        #[wasm_bindgen]
        pub fn widget_init(width: f32, height: f32) {
            $crate::init_logging();
            let mut runner = $crate::WidgetRunner::new(new_widget());
            runner.init(Viewport::new(width, height));
            RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
            log::info!("{}: initialized", $widget_name);
        }

        #[wasm_bindgen]
        pub fn widget_tick(dt: f32) {
            with_runner(|r| {
                r.tick(dt);
                #[cfg(feature = "vectors")]
                r.tessellate();
            });
        }

        #[wasm_bindgen]
        pub fn widget_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn widget_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn widget_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn widget_touch_start(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::TouchStart { x, y }));
        }

        #[wasm_bindgen]
        pub fn widget_touch_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::TouchMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn widget_touch_end() {
            with_runner(|r| r.push_input(InputEvent::TouchEnd));
        }

        #[wasm_bindgen]
        pub fn widget_resize(width: f32, height: f32) {
            with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_marker_label(index: u32) -> Option<String> {
            with_runner(|r| r.marker_label(index as usize).map(str::to_string)).flatten()
        }
    };

    // Variant with vectors feature
    ($widget_type:ty, $widget_name:literal, vectors) => {
        $crate::export_widget!($widget_type, $widget_name);

        // ---- Vector accessors (only when vectors feature is enabled) ----

        #[wasm_bindgen]
        pub fn get_vector_vertices_ptr() -> *const f32 {
            with_runner(|r| r.vector_vertices_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_vector_vertex_count() -> u32 {
            with_runner(|r| r.vector_vertex_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_markers_ptr() -> *const f32 {
            with_runner(|r| r.markers_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_marker_count() -> u32 {
            with_runner(|r| r.marker_count()).unwrap_or(0)
        }
    };
}
