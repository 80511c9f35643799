use tauri::{
    image::Image,
    menu::{CheckMenuItem, Menu, MenuItem, PredefinedMenuItem},
    tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent},
    AppHandle,
};

use crate::{
    app_spec::AppSpec, append_desktop_log, tray_actions, tray_dock::ToggleIndicator,
    tray_menu_handler, window_actions, TRAY_ID,
};

impl ToggleIndicator for CheckMenuItem<tauri::Wry> {
    fn set_checked(&self, checked: bool) -> Result<(), String> {
        CheckMenuItem::set_checked(self, checked).map_err(|error| error.to_string())
    }
}

pub fn load_spec_icon(spec: &AppSpec) -> Option<Image<'static>> {
    let path = spec.icon_path()?;
    match Image::from_path(path) {
        Ok(image) => Some(image),
        Err(error) => {
            append_desktop_log(&format!(
                "failed to load icon {}: {}; using default icon",
                path.display(),
                error
            ));
            None
        }
    }
}

pub fn setup_tray(
    app_handle: &AppHandle,
    spec: &AppSpec,
    window_visible: bool,
) -> Result<CheckMenuItem<tauri::Wry>, String> {
    let toggle_item = CheckMenuItem::with_id(
        app_handle,
        tray_actions::TRAY_MENU_TOGGLE_WINDOW,
        tray_actions::toggle_label(&spec.title),
        true,
        window_visible,
        None::<&str>,
    )
    .map_err(|error| format!("Failed to create tray toggle menu item: {error}"))?;
    let quit_item = MenuItem::with_id(
        app_handle,
        tray_actions::TRAY_MENU_QUIT,
        "Quit",
        true,
        None::<&str>,
    )
    .map_err(|error| format!("Failed to create tray quit menu item: {error}"))?;
    let separator = PredefinedMenuItem::separator(app_handle)
        .map_err(|error| format!("Failed to create tray separator menu item: {error}"))?;

    let menu = Menu::with_items(app_handle, &[&toggle_item, &separator, &quit_item])
        .map_err(|error| format!("Failed to build tray menu: {error}"))?;

    let icon = load_spec_icon(spec).or_else(|| app_handle.default_window_icon().cloned());

    let mut tray_builder = TrayIconBuilder::with_id(TRAY_ID)
        .menu(&menu)
        .tooltip(&spec.title)
        .show_menu_on_left_click(false)
        .on_menu_event(|app, event| {
            tray_menu_handler::handle_tray_menu_event(app, event.id().as_ref())
        })
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                window_actions::toggle_main_window(tray.app_handle(), append_desktop_log);
            }
        });
    if let Some(icon) = icon {
        tray_builder = tray_builder.icon(icon);
    }

    tray_builder
        .build(app_handle)
        .map_err(|error| format!("Failed to create tray icon: {error}"))?;

    Ok(toggle_item)
}
