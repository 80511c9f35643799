pub mod app_constants;
pub mod app_runtime;
pub mod app_spec;
mod app_types;
pub mod desktop_entry;
pub mod error;
pub mod logging;
mod main_window;
pub mod make_app;
pub mod runtime_paths;
pub mod tauri_window;
pub mod tray_actions;
pub mod tray_dock;
mod tray_menu_handler;
mod tray_setup;
mod window_actions;
pub mod window_decorator;
pub mod window_host;
pub mod window_layout;
pub mod wizard;

pub use app_constants::*;
pub use logging::{append_desktop_log, append_shutdown_log, append_startup_log};
