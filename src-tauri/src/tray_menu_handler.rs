use tauri::AppHandle;

use crate::{append_desktop_log, append_shutdown_log, tray_actions, window_actions};

pub fn handle_tray_menu_event(app_handle: &AppHandle, menu_id: &str) {
    match tray_actions::action_from_menu_id(menu_id) {
        Some(tray_actions::TrayMenuAction::ToggleWindow) => {
            window_actions::toggle_main_window(app_handle, append_desktop_log)
        }
        Some(tray_actions::TrayMenuAction::Quit) => {
            append_shutdown_log("tray quit requested, closing site window");
            window_actions::close_main_window_without_minimizing(app_handle, append_shutdown_log);
        }
        None => {}
    }
}
