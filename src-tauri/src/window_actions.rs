use std::{
    thread,
    time::{Duration, Instant},
};

use tauri::{AppHandle, Manager, WebviewWindow};

use crate::{
    append_desktop_log,
    app_types::ShellState,
    tauri_window::{mode_transitions, observe_mode, ObservedMode},
    tray_dock::DockTransition,
    window_host::HostWindowEvent,
    window_layout::DebouncePoll,
    MAIN_WINDOW_LABEL,
};

fn main_window<F>(app_handle: &AppHandle, action: &str, log: F) -> Option<WebviewWindow>
where
    F: Fn(&str),
{
    let window = app_handle.get_webview_window(MAIN_WINDOW_LABEL);
    if window.is_none() {
        log(&format!("{action} skipped: main window not found"));
    }
    window
}

pub fn toggle_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = main_window(app_handle, "toggle_main_window", &log) else {
        return;
    };
    let state = app_handle.state::<ShellState>();
    match state
        .with_decorator(|decorator| decorator.toggle_from_tray(&window))
        .flatten()
    {
        Some(DockTransition::Lowered) => log("main window lowered to tray"),
        Some(DockTransition::Raised) => {
            if let Err(error) = window.set_focus() {
                log(&format!("failed to focus main window: {error}"));
            }
        }
        None => log("toggle_main_window skipped: tray is not attached"),
    }
}

/// The close is requested after the decorator lock is released because the
/// host may deliver the close request synchronously.
pub fn close_main_window_without_minimizing<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = main_window(app_handle, "close_main_window_without_minimizing", &log)
    else {
        app_handle.exit(0);
        return;
    };
    let state = app_handle.state::<ShellState>();
    state.with_decorator(|decorator| decorator.arm_close_bypass());
    if let Err(error) = window.close() {
        state.with_decorator(|decorator| decorator.disarm_close_bypass());
        log(&format!("failed to close main window: {error}"));
    }
}

pub fn dispatch_window_event(
    app_handle: &AppHandle,
    window: &WebviewWindow,
    event: HostWindowEvent,
) {
    let state = app_handle.state::<ShellState>();
    let timer = state
        .with_decorator(|decorator| decorator.handle_event(window, event, Instant::now()))
        .flatten();
    if let Some(delay) = timer {
        schedule_resize_settle(app_handle, delay);
    }
}

pub fn observe_window_mode(app_handle: &AppHandle, window: &WebviewWindow, resized: bool) {
    let minimized = window.is_minimized().unwrap_or(false);
    let maximized = window.is_maximized().unwrap_or(false);
    let current = observe_mode(minimized, maximized);
    let previous = app_handle
        .state::<ShellState>()
        .replace_observed_mode(current);

    for event in mode_transitions(previous, current) {
        append_desktop_log(&format!("main window {event}"));
        dispatch_window_event(app_handle, window, event);
    }
    if resized && current != ObservedMode::Minimized {
        dispatch_window_event(app_handle, window, HostWindowEvent::Resized);
    }
}

fn settle_resize_on_main_thread(app_handle: &AppHandle) {
    let main_app = app_handle.clone();
    if let Err(error) = app_handle.run_on_main_thread(move || {
        let Some(window) = main_app.get_webview_window(MAIN_WINDOW_LABEL) else {
            return;
        };
        main_app
            .state::<ShellState>()
            .with_decorator(|decorator| decorator.settle_resize(&window));
    }) {
        append_desktop_log(&format!("failed to schedule window layout snapshot: {error}"));
    }
}

fn schedule_resize_settle(app_handle: &AppHandle, delay: Duration) {
    let app_handle = app_handle.clone();
    let spawn_result = thread::Builder::new()
        .name("resize-debounce".to_string())
        .spawn(move || {
            let mut wait = delay;
            loop {
                thread::sleep(wait);
                let poll = app_handle
                    .state::<ShellState>()
                    .with_decorator(|decorator| decorator.poll_resize(Instant::now()));
                match poll {
                    Some(DebouncePoll::Pending(remaining)) => wait = remaining,
                    Some(DebouncePoll::Settled) => {
                        settle_resize_on_main_thread(&app_handle);
                        break;
                    }
                    Some(DebouncePoll::Idle) | None => break,
                }
            }
        });
    if let Err(error) = spawn_result {
        append_desktop_log(&format!("failed to spawn resize debounce timer: {error}"));
    }
}
