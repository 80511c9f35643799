use std::sync::Mutex;

use crate::{
    app_spec::AppSpec, append_desktop_log, tauri_window::ObservedMode,
    window_decorator::WindowDecorator,
};

pub(crate) struct ShellState {
    pub(crate) spec: AppSpec,
    decorator: Mutex<WindowDecorator>,
    observed_mode: Mutex<ObservedMode>,
}

impl ShellState {
    pub(crate) fn new(spec: AppSpec) -> Self {
        Self {
            spec,
            decorator: Mutex::new(WindowDecorator::new(append_desktop_log)),
            observed_mode: Mutex::new(ObservedMode::default()),
        }
    }

    pub(crate) fn with_decorator<T>(
        &self,
        action: impl FnOnce(&mut WindowDecorator) -> T,
    ) -> Option<T> {
        match self.decorator.lock() {
            Ok(mut guard) => Some(action(&mut guard)),
            Err(_) => {
                append_desktop_log("window decorator lock poisoned");
                None
            }
        }
    }

    pub(crate) fn replace_observed_mode(&self, current: ObservedMode) -> ObservedMode {
        match self.observed_mode.lock() {
            Ok(mut guard) => std::mem::replace(&mut *guard, current),
            Err(_) => current,
        }
    }
}
