use crate::window_host::HostWindow;

pub trait ToggleIndicator: Send {
    fn set_checked(&self, checked: bool) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockTransition {
    Lowered,
    Raised,
}

pub struct TrayDock {
    up: bool,
    indicator: Option<Box<dyn ToggleIndicator>>,
    log: fn(&str),
}

impl TrayDock {
    pub fn new(
        indicator: Option<Box<dyn ToggleIndicator>>,
        currently_visible: bool,
        log: fn(&str),
    ) -> Self {
        let dock = Self {
            up: currently_visible,
            indicator,
            log,
        };
        dock.sync_indicator();
        dock
    }

    pub fn is_up(&self) -> bool {
        self.up
    }

    fn sync_indicator(&self) {
        if let Some(indicator) = &self.indicator {
            if let Err(error) = indicator.set_checked(self.up) {
                (self.log)(&format!("failed to update tray toggle item: {error}"));
            }
        }
    }

    pub fn lowered(&mut self) {
        self.up = false;
        self.sync_indicator();
    }

    pub fn raised(&mut self) {
        self.up = true;
        self.sync_indicator();
    }

    pub fn toggle(&mut self, host: &dyn HostWindow) -> DockTransition {
        if self.up {
            if let Err(error) = host.minimize() {
                (self.log)(&format!("failed to minimize window from tray: {error}"));
            }
            self.lowered();
            DockTransition::Lowered
        } else {
            // shown first in case minimizing also hid the window
            if let Err(error) = host.show() {
                (self.log)(&format!("failed to show window from tray: {error}"));
            }
            if let Err(error) = host.restore() {
                (self.log)(&format!("failed to restore window from tray: {error}"));
            }
            self.raised();
            DockTransition::Raised
        }
    }
}
