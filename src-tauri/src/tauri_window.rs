use tauri::{PhysicalPosition, PhysicalSize, Runtime, WebviewWindow};

use crate::window_host::{HostWindow, HostWindowEvent, WindowGeometry};

impl<R: Runtime> HostWindow for WebviewWindow<R> {
    fn geometry(&self) -> Result<WindowGeometry, String> {
        let position = self
            .outer_position()
            .map_err(|error| format!("Failed to read window position: {error}"))?;
        let size = self
            .inner_size()
            .map_err(|error| format!("Failed to read window size: {error}"))?;
        Ok(WindowGeometry {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        })
    }

    fn minimize(&self) -> Result<(), String> {
        WebviewWindow::minimize(self).map_err(|error| error.to_string())
    }

    fn maximize(&self) -> Result<(), String> {
        WebviewWindow::maximize(self).map_err(|error| error.to_string())
    }

    fn restore(&self) -> Result<(), String> {
        let minimized = self.is_minimized().map_err(|error| error.to_string())?;
        if minimized {
            self.unminimize().map_err(|error| error.to_string())
        } else {
            self.unmaximize().map_err(|error| error.to_string())
        }
    }

    fn hide(&self) -> Result<(), String> {
        WebviewWindow::hide(self).map_err(|error| error.to_string())
    }

    fn show(&self) -> Result<(), String> {
        WebviewWindow::show(self).map_err(|error| error.to_string())
    }

    fn close(&self) -> Result<(), String> {
        WebviewWindow::close(self).map_err(|error| error.to_string())
    }

    fn resize_to(&self, width: u32, height: u32) -> Result<(), String> {
        self.set_size(PhysicalSize::new(width, height))
            .map_err(|error| error.to_string())
    }

    fn move_to(&self, x: i32, y: i32) -> Result<(), String> {
        self.set_position(PhysicalPosition::new(x, y))
            .map_err(|error| error.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ObservedMode {
    #[default]
    Normal,
    Maximized,
    Minimized,
}

pub fn observe_mode(minimized: bool, maximized: bool) -> ObservedMode {
    if minimized {
        ObservedMode::Minimized
    } else if maximized {
        ObservedMode::Maximized
    } else {
        ObservedMode::Normal
    }
}

pub fn mode_transitions(previous: ObservedMode, current: ObservedMode) -> Vec<HostWindowEvent> {
    use ObservedMode::{Maximized, Minimized, Normal};

    match (previous, current) {
        (Normal, Maximized) => vec![HostWindowEvent::Maximized],
        (Maximized, Normal) => vec![HostWindowEvent::Unmaximized],
        (Normal | Maximized, Minimized) => vec![HostWindowEvent::Minimized],
        (Minimized, Normal) => vec![HostWindowEvent::Restored],
        (Minimized, Maximized) => vec![HostWindowEvent::Restored, HostWindowEvent::Maximized],
        _ => Vec::new(),
    }
}
