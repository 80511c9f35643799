use std::{path::PathBuf, process};

use clap::Parser;
use tauri::{webview::PageLoadEvent, Manager, RunEvent, WindowEvent};

use crate::{
    app_spec::AppSpec, app_types::ShellState, append_desktop_log, append_shutdown_log,
    append_startup_log, logging, main_window, window_actions, window_decorator::CloseDecision,
    window_host::HostWindowEvent, MAIN_WINDOW_LABEL,
};

/// Opens a site spec created by `make-app` in its own window.
#[derive(Debug, Parser)]
#[command(name = "ssb-shell", version, about)]
pub struct RuntimeArgs {
    /// Path to the site spec JSON file.
    pub spec: PathBuf,
}

fn exit_with_error(message: &str) -> ! {
    append_startup_log(message);
    eprintln!("{message}");
    process::exit(1);
}

pub fn run() {
    let args = RuntimeArgs::parse();

    append_startup_log("ssb shell starting");
    append_startup_log(&format!(
        "desktop log path: {}",
        logging::desktop_log_path().display()
    ));

    let spec = AppSpec::load(&args.spec).unwrap_or_else(|error| {
        exit_with_error(&format!("failed to load site spec: {error}"))
    });
    let site_url = spec
        .site_url()
        .unwrap_or_else(|error| exit_with_error(&format!("failed to open site: {error}")));
    append_startup_log(&format!(
        "loaded site spec {} for '{}'",
        args.spec.display(),
        spec.title
    ));

    let spec_path = args.spec;
    tauri::Builder::default()
        .manage(ShellState::new(spec))
        .on_window_event(|window, event| {
            if window.label() != MAIN_WINDOW_LABEL {
                return;
            }
            let app_handle = window.app_handle();
            let Some(webview_window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
                return;
            };

            match event {
                WindowEvent::CloseRequested { api, .. } => {
                    let decision = app_handle
                        .state::<ShellState>()
                        .with_decorator(|decorator| {
                            decorator.handle_close_requested(&webview_window)
                        });
                    if decision == Some(CloseDecision::Prevented) {
                        api.prevent_close();
                    }
                }
                WindowEvent::Resized(_) => {
                    window_actions::observe_window_mode(app_handle, &webview_window, true)
                }
                WindowEvent::Focused(false) => {
                    window_actions::observe_window_mode(app_handle, &webview_window, false)
                }
                WindowEvent::Destroyed => {
                    append_shutdown_log("main window destroyed");
                }
                _ => {}
            }
        })
        .on_page_load(|webview, payload| {
            if webview.label() != MAIN_WINDOW_LABEL {
                return;
            }
            match payload.event() {
                PageLoadEvent::Started => {
                    append_desktop_log(&format!("page-load started: {}", payload.url()));
                }
                PageLoadEvent::Finished => {
                    append_desktop_log(&format!("page-load finished: {}", payload.url()));
                    let app_handle = webview.app_handle();
                    if let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) {
                        window_actions::dispatch_window_event(
                            app_handle,
                            &window,
                            HostWindowEvent::Loaded,
                        );
                    }
                }
            }
        })
        .setup(move |app| {
            let app_handle = app.handle().clone();
            let spec = app_handle.state::<ShellState>().spec.clone();
            main_window::create_main_window(&app_handle, &spec, site_url, &spec_path)?;
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|_app_handle, event| {
            if let RunEvent::Exit = event {
                append_shutdown_log("ssb shell exiting");
            }
        });
}
