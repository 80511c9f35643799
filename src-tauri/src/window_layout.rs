use std::{
    fs,
    path::PathBuf,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};

use crate::window_host::{HostWindow, HostWindowEvent, WindowGeometry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistedMode {
    Normal,
    Maximized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowState {
    pub mode: PersistedMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl WindowState {
    fn empty() -> Self {
        Self {
            mode: PersistedMode::Normal,
            x: None,
            y: None,
            width: None,
            height: None,
        }
    }

    pub fn geometry(&self) -> Option<WindowGeometry> {
        Some(WindowGeometry {
            x: self.x?,
            y: self.y?,
            width: self.width?,
            height: self.height?,
        })
    }

    fn set_geometry(&mut self, geometry: WindowGeometry) {
        self.x = Some(geometry.x);
        self.y = Some(geometry.y);
        self.width = Some(geometry.width);
        self.height = Some(geometry.height);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    Normal,
    Maximized,
    Minimized,
}

pub trait LayoutStore: Send {
    fn load(&mut self) -> Option<WindowState>;
    fn store(&mut self, state: &WindowState) -> Result<(), String>;
}

pub struct JsonFileLayoutStore {
    path: PathBuf,
    log: fn(&str),
}

impl JsonFileLayoutStore {
    pub fn new(path: PathBuf, log: fn(&str)) -> Self {
        Self { path, log }
    }
}

impl LayoutStore for JsonFileLayoutStore {
    fn load(&mut self) -> Option<WindowState> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return None,
            Err(error) => {
                (self.log)(&format!(
                    "failed to read window state {}: {}",
                    self.path.display(),
                    error
                ));
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(state) => Some(state),
            Err(error) => {
                (self.log)(&format!(
                    "failed to parse window state {}: {}. ignoring saved layout",
                    self.path.display(),
                    error
                ));
                None
            }
        }
    }

    fn store(&mut self, state: &WindowState) -> Result<(), String> {
        if let Some(parent_dir) = self.path.parent() {
            fs::create_dir_all(parent_dir).map_err(|error| {
                format!(
                    "Failed to create window state directory {}: {}",
                    parent_dir.display(),
                    error
                )
            })?;
        }
        let serialized = serde_json::to_string_pretty(state)
            .map_err(|error| format!("Failed to serialize window state: {error}"))?;
        fs::write(&self.path, serialized).map_err(|error| {
            format!(
                "Failed to write window state {}: {}",
                self.path.display(),
                error
            )
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebouncePoll {
    Idle,
    Pending(Duration),
    Settled,
}

/// Trailing-edge debouncer. Only the first touch of a burst asks for a
/// timer; later touches push the deadline out and the armed timer re-polls.
#[derive(Debug)]
pub struct ResizeDebouncer {
    delay: Duration,
    deadline: Option<Instant>,
    timer_armed: bool,
}

impl ResizeDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            timer_armed: false,
        }
    }

    pub fn touch(&mut self, now: Instant) -> Option<Duration> {
        self.deadline = Some(now + self.delay);
        if self.timer_armed {
            return None;
        }
        self.timer_armed = true;
        Some(self.delay)
    }

    pub fn poll(&mut self, now: Instant) -> DebouncePoll {
        match self.deadline {
            None => {
                self.timer_armed = false;
                DebouncePoll::Idle
            }
            Some(deadline) if now < deadline => DebouncePoll::Pending(deadline - now),
            Some(_) => {
                self.deadline = None;
                self.timer_armed = false;
                DebouncePoll::Settled
            }
        }
    }
}

pub struct LayoutTracker {
    store: Box<dyn LayoutStore>,
    state: WindowState,
    mode: WindowMode,
    maximization_pending: bool,
    resize_tracking: bool,
    debouncer: ResizeDebouncer,
    log: fn(&str),
}

impl LayoutTracker {
    pub fn init(
        mut store: Box<dyn LayoutStore>,
        host: &dyn HostWindow,
        resize_debounce: Duration,
        log: fn(&str),
    ) -> Self {
        let loaded = store.load();
        let mut tracker = Self {
            store,
            state: loaded.unwrap_or_else(WindowState::empty),
            mode: WindowMode::Normal,
            maximization_pending: false,
            resize_tracking: false,
            debouncer: ResizeDebouncer::new(resize_debounce),
            log,
        };

        match loaded {
            Some(state) if state.mode == PersistedMode::Maximized => {
                tracker.mode = WindowMode::Maximized;
                if let Err(error) = host.maximize() {
                    log(&format!("failed to maximize restored window: {error}"));
                }
            }
            Some(_) => tracker.restore_geometry(host),
            None => tracker.snapshot(host),
        }
        tracker
    }

    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    pub fn state(&self) -> &WindowState {
        &self.state
    }

    fn restore_geometry(&self, host: &dyn HostWindow) {
        let Some(geometry) = self.state.geometry() else {
            return;
        };
        if let Err(error) = host.resize_to(geometry.width, geometry.height) {
            (self.log)(&format!("failed to restore window size: {error}"));
        }
        if let Err(error) = host.move_to(geometry.x, geometry.y) {
            (self.log)(&format!("failed to restore window position: {error}"));
        }
    }

    pub fn snapshot(&mut self, host: &dyn HostWindow) {
        self.state.mode = if self.mode == WindowMode::Maximized {
            PersistedMode::Maximized
        } else {
            PersistedMode::Normal
        };

        if self.mode != WindowMode::Normal {
            return;
        }
        match host.geometry() {
            Ok(geometry) => self.state.set_geometry(geometry),
            Err(error) => (self.log)(&format!("failed to read window geometry: {error}")),
        }
    }

    pub fn save(&mut self, host: &dyn HostWindow) {
        self.snapshot(host);
        if let Err(error) = self.store.store(&self.state) {
            (self.log)(&format!("failed to persist window layout: {error}"));
        }
    }

    pub fn on_event(
        &mut self,
        host: &dyn HostWindow,
        event: HostWindowEvent,
        now: Instant,
    ) -> Option<Duration> {
        match event {
            HostWindowEvent::Maximized => {
                self.maximization_pending = true;
                self.mode = WindowMode::Maximized;
            }
            HostWindowEvent::Unmaximized => {
                self.mode = WindowMode::Normal;
                self.restore_geometry(host);
            }
            HostWindowEvent::Minimized => self.mode = WindowMode::Minimized,
            HostWindowEvent::Restored => self.mode = WindowMode::Normal,
            HostWindowEvent::Loaded => self.resize_tracking = true,
            HostWindowEvent::Resized if self.resize_tracking => {
                return self.debouncer.touch(now);
            }
            HostWindowEvent::Resized => {}
        }
        None
    }

    pub fn poll_resize(&mut self, now: Instant) -> DebouncePoll {
        self.debouncer.poll(now)
    }

    pub fn settle_resize(&mut self, host: &dyn HostWindow) {
        if self.maximization_pending {
            // the resize that came with maximizing
            self.maximization_pending = false;
        } else if self.mode == WindowMode::Maximized {
            self.mode = WindowMode::Normal;
        }
        self.snapshot(host);
    }
}
