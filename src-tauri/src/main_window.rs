use std::path::Path;

use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder};
use url::Url;

use crate::{
    app_spec::AppSpec,
    app_types::ShellState,
    append_desktop_log, append_startup_log,
    error::ShellResult,
    runtime_paths, tray_setup,
    window_layout::JsonFileLayoutStore,
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, MAIN_WINDOW_LABEL,
};

pub fn create_main_window(
    app_handle: &AppHandle,
    spec: &AppSpec,
    site_url: Url,
    spec_path: &Path,
) -> ShellResult<WebviewWindow> {
    let mut builder = WebviewWindowBuilder::new(
        app_handle,
        MAIN_WINDOW_LABEL,
        WebviewUrl::External(site_url.clone()),
    )
    .title(&spec.title)
    .inner_size(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT)
    .visible(false);
    if let Some(icon) = tray_setup::load_spec_icon(spec) {
        builder = builder.icon(icon)?;
    }
    let window = builder.build()?;
    append_startup_log(&format!("main window created for {site_url}"));

    let tray_item = if spec.use_tray_icon {
        match tray_setup::setup_tray(app_handle, spec, !spec.starts_hidden()) {
            Ok(item) => Some(item),
            Err(error) => {
                append_startup_log(&format!("failed to initialize tray: {error}"));
                None
            }
        }
    } else {
        None
    };
    let behaviours = spec.window_behaviours(tray_item.is_some());

    let state = app_handle.state::<ShellState>();
    state.with_decorator(|decorator| {
        if let Some(item) = tray_item {
            decorator.attach_tray_icon(Some(Box::new(item)), !behaviours.start_hidden);
        }
        if behaviours.hide_on_minimize {
            decorator.hide_on_minimize();
        }
        if behaviours.minimize_on_close {
            decorator.minimize_on_close();
        }
        if behaviours.persist_layout {
            let store = JsonFileLayoutStore::new(
                runtime_paths::window_state_path(spec_path),
                append_desktop_log,
            );
            decorator.persist_layout(&window, Box::new(store));
        }
        append_startup_log(&format!(
            "main window capabilities: {:?}",
            decorator.capabilities()
        ));
    });

    if behaviours.start_hidden {
        append_startup_log("main window starts hidden in tray");
    } else {
        window.show()?;
        if let Err(error) = window.set_focus() {
            append_desktop_log(&format!("failed to focus main window: {error}"));
        }
    }
    Ok(window)
}
