use std::time::Duration;

pub const MAIN_WINDOW_LABEL: &str = "main";
pub const TRAY_ID: &str = "ssb-shell-tray";

pub const RUNTIME_BINARY_NAME: &str = "ssb-shell";
pub const CONFIG_DIR_NAME: &str = ".ssb-shell";
pub const CONFIG_DIR_ENV: &str = "SSB_SHELL_HOME";
pub const XDG_DATA_HOME_ENV: &str = "XDG_DATA_HOME";

pub const SPEC_FILE_EXTENSION: &str = "json";
pub const WINDOW_STATE_DIR_NAME: &str = "window-state";
pub const DESKTOP_ENTRY_EXTENSION: &str = "desktop";
pub const DESKTOP_LOG_FILE: &str = "ssb-shell.log";

pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(500);

pub const DEFAULT_WINDOW_WIDTH: f64 = 1024.0;
pub const DEFAULT_WINDOW_HEIGHT: f64 = 768.0;
