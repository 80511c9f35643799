use std::time::{Duration, Instant};

use crate::{
    tray_dock::{DockTransition, ToggleIndicator, TrayDock},
    window_host::{HostWindow, HostWindowEvent},
    window_layout::{DebouncePoll, LayoutStore, LayoutTracker},
    RESIZE_DEBOUNCE,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowCapabilities {
    pub closing_event: bool,
    pub layout_persisted: bool,
    pub tray_attached: bool,
    pub hide_on_minimize: bool,
    pub minimize_on_close: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    Close,
    Prevented,
}

pub struct WindowDecorator {
    capabilities: WindowCapabilities,
    layout: Option<LayoutTracker>,
    tray: Option<TrayDock>,
    close_bypass: bool,
    resize_debounce: Duration,
    log: fn(&str),
}

impl WindowDecorator {
    pub fn new(log: fn(&str)) -> Self {
        Self::with_resize_debounce(RESIZE_DEBOUNCE, log)
    }

    pub fn with_resize_debounce(resize_debounce: Duration, log: fn(&str)) -> Self {
        Self {
            capabilities: WindowCapabilities::default(),
            layout: None,
            tray: None,
            close_bypass: false,
            resize_debounce,
            log,
        }
    }

    pub fn capabilities(&self) -> WindowCapabilities {
        self.capabilities
    }

    pub fn tray_is_up(&self) -> Option<bool> {
        self.tray.as_ref().map(TrayDock::is_up)
    }

    pub fn add_closing_event(&mut self) -> bool {
        if self.capabilities.closing_event {
            return false;
        }
        self.capabilities.closing_event = true;
        true
    }

    pub fn persist_layout(&mut self, host: &dyn HostWindow, store: Box<dyn LayoutStore>) -> bool {
        if self.capabilities.layout_persisted {
            return false;
        }
        self.add_closing_event();
        self.layout = Some(LayoutTracker::init(
            store,
            host,
            self.resize_debounce,
            self.log,
        ));
        self.capabilities.layout_persisted = true;
        true
    }

    pub fn attach_tray_icon(
        &mut self,
        indicator: Option<Box<dyn ToggleIndicator>>,
        currently_visible: bool,
    ) -> bool {
        if self.capabilities.tray_attached {
            return false;
        }
        self.tray = Some(TrayDock::new(indicator, currently_visible, self.log));
        self.capabilities.tray_attached = true;
        true
    }

    pub fn hide_on_minimize(&mut self) -> bool {
        if self.capabilities.hide_on_minimize {
            return false;
        }
        self.capabilities.hide_on_minimize = true;
        true
    }

    pub fn minimize_on_close(&mut self) -> bool {
        if self.capabilities.minimize_on_close {
            return false;
        }
        self.add_closing_event();
        self.capabilities.minimize_on_close = true;
        true
    }

    /// Lets the next close request through even when minimize-on-close is
    /// attached. The bypass covers exactly one close request.
    pub fn arm_close_bypass(&mut self) {
        self.close_bypass = true;
    }

    pub fn disarm_close_bypass(&mut self) {
        self.close_bypass = false;
    }

    pub fn close_without_minimizing(&mut self, host: &dyn HostWindow) {
        self.arm_close_bypass();
        if let Err(error) = host.close() {
            self.disarm_close_bypass();
            (self.log)(&format!("failed to close window: {error}"));
        }
    }

    fn may_close(&mut self, host: &dyn HostWindow, bypass: bool) -> bool {
        if !self.capabilities.minimize_on_close || bypass {
            return true;
        }
        if let Err(error) = host.minimize() {
            (self.log)(&format!("failed to minimize window on close: {error}"));
        }
        self.on_minimized(host, Instant::now());
        false
    }

    pub fn handle_close_requested(&mut self, host: &dyn HostWindow) -> CloseDecision {
        if !self.capabilities.closing_event {
            return CloseDecision::Close;
        }

        let bypass = std::mem::take(&mut self.close_bypass);
        if let Some(layout) = self.layout.as_mut() {
            layout.save(host);
        }

        if self.may_close(host, bypass) {
            CloseDecision::Close
        } else {
            (self.log)("window close prevented");
            CloseDecision::Prevented
        }
    }

    fn save_when_hidden(&mut self, host: &dyn HostWindow) {
        if let Some(layout) = self.layout.as_mut() {
            layout.save(host);
        }
    }

    fn on_minimized(&mut self, host: &dyn HostWindow, now: Instant) {
        if let Some(layout) = self.layout.as_mut() {
            layout.on_event(host, HostWindowEvent::Minimized, now);
        }
        if let Some(tray) = self.tray.as_mut() {
            tray.lowered();
        }
        if self.capabilities.hide_on_minimize {
            if let Err(error) = host.hide() {
                (self.log)(&format!("failed to hide minimized window: {error}"));
            }
            self.save_when_hidden(host);
        }
    }

    pub fn handle_event(
        &mut self,
        host: &dyn HostWindow,
        event: HostWindowEvent,
        now: Instant,
    ) -> Option<Duration> {
        match event {
            HostWindowEvent::Minimized => {
                self.on_minimized(host, now);
                None
            }
            HostWindowEvent::Restored => {
                if let Some(tray) = self.tray.as_mut() {
                    tray.raised();
                }
                self.layout
                    .as_mut()
                    .and_then(|layout| layout.on_event(host, event, now))
            }
            _ => self
                .layout
                .as_mut()
                .and_then(|layout| layout.on_event(host, event, now)),
        }
    }

    pub fn toggle_from_tray(&mut self, host: &dyn HostWindow) -> Option<DockTransition> {
        let transition = self.tray.as_mut()?.toggle(host);
        let now = Instant::now();
        match transition {
            DockTransition::Lowered => {
                self.on_minimized(host, now);
                if !self.capabilities.hide_on_minimize {
                    self.save_when_hidden(host);
                }
            }
            DockTransition::Raised => {
                if let Some(layout) = self.layout.as_mut() {
                    layout.on_event(host, HostWindowEvent::Restored, now);
                }
            }
        }
        Some(transition)
    }

    pub fn poll_resize(&mut self, now: Instant) -> DebouncePoll {
        self.layout
            .as_mut()
            .map(|layout| layout.poll_resize(now))
            .unwrap_or(DebouncePoll::Idle)
    }

    pub fn settle_resize(&mut self, host: &dyn HostWindow) {
        if let Some(layout) = self.layout.as_mut() {
            layout.settle_resize(host);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        tray_dock::tests::RecordingIndicator,
        window_host::fake::{FakeWindow, HostCall},
        window_layout::{tests::MemoryStore, PersistedMode, WindowState},
    };

    fn decorator() -> WindowDecorator {
        WindowDecorator::new(|_| {})
    }

    fn saved_layout() -> WindowState {
        WindowState {
            mode: PersistedMode::Normal,
            x: Some(100),
            y: Some(50),
            width: Some(900),
            height: Some(700),
        }
    }

    #[test]
    fn add_closing_event_attaches_once() {
        let mut decorator = decorator();
        assert!(decorator.add_closing_event());
        assert!(!decorator.add_closing_event());
        assert!(decorator.capabilities().closing_event);
    }

    #[test]
    fn persist_layout_attaches_once_and_enables_closing_event() {
        let host = FakeWindow::new(0, 0, 400, 300);
        let store = MemoryStore {
            initial: Some(saved_layout()),
            ..MemoryStore::default()
        };
        let mut decorator = decorator();

        assert!(decorator.persist_layout(&host, Box::new(store.clone())));
        assert_eq!(
            host.take_calls(),
            vec![HostCall::ResizeTo(900, 700), HostCall::MoveTo(100, 50)]
        );

        assert!(!decorator.persist_layout(&host, Box::new(store)));
        assert!(host.take_calls().is_empty());
        assert!(decorator.capabilities().closing_event);
        assert!(!decorator.add_closing_event());
    }

    #[test]
    fn other_behaviours_attach_once() {
        let mut decorator = decorator();
        assert!(decorator.hide_on_minimize());
        assert!(!decorator.hide_on_minimize());
        assert!(decorator.minimize_on_close());
        assert!(!decorator.minimize_on_close());
        assert!(decorator.attach_tray_icon(None, true));
        assert!(!decorator.attach_tray_icon(None, false));
        assert_eq!(decorator.tray_is_up(), Some(true));
        assert_eq!(
            decorator.capabilities(),
            WindowCapabilities {
                closing_event: true,
                layout_persisted: false,
                tray_attached: true,
                hide_on_minimize: true,
                minimize_on_close: true,
            }
        );
    }

    #[test]
    fn plain_window_always_closes() {
        let host = FakeWindow::new(0, 0, 400, 300);
        let mut decorator = decorator();
        assert_eq!(decorator.handle_close_requested(&host), CloseDecision::Close);
        assert!(host.take_calls().is_empty());
    }

    #[test]
    fn minimize_on_close_vetoes_and_minimizes() {
        let host = FakeWindow::new(0, 0, 400, 300);
        let mut decorator = decorator();
        decorator.minimize_on_close();

        assert_eq!(
            decorator.handle_close_requested(&host),
            CloseDecision::Prevented
        );
        assert_eq!(host.take_calls(), vec![HostCall::Minimize]);
    }

    #[test]
    fn close_without_minimizing_bypasses_one_request() {
        let host = FakeWindow::new(0, 0, 400, 300);
        let mut decorator = decorator();
        decorator.minimize_on_close();

        decorator.close_without_minimizing(&host);
        assert_eq!(host.take_calls(), vec![HostCall::Close]);
        assert_eq!(decorator.handle_close_requested(&host), CloseDecision::Close);

        // the host kept the window open; the next close minimizes again
        assert_eq!(
            decorator.handle_close_requested(&host),
            CloseDecision::Prevented
        );
    }

    #[test]
    fn failed_close_disarms_the_bypass() {
        let host = FakeWindow::new(0, 0, 400, 300);
        host.fail_close.set(true);
        let mut decorator = decorator();
        decorator.minimize_on_close();

        decorator.close_without_minimizing(&host);
        assert_eq!(host.take_calls(), vec![HostCall::Close]);

        assert_eq!(
            decorator.handle_close_requested(&host),
            CloseDecision::Prevented
        );
        assert_eq!(host.take_calls(), vec![HostCall::Minimize]);
    }

    #[test]
    fn close_request_saves_layout_even_when_prevented() {
        let host = FakeWindow::new(5, 6, 640, 480);
        let store = MemoryStore::default();
        let mut decorator = decorator();
        decorator.persist_layout(&host, Box::new(store.clone()));
        decorator.minimize_on_close();

        decorator.handle_close_requested(&host);

        let saved = store.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].geometry().map(|g| g.width), Some(640));
    }

    #[test]
    fn hide_on_minimize_hides_and_saves() {
        let host = FakeWindow::new(5, 6, 640, 480);
        let store = MemoryStore::default();
        let mut decorator = decorator();
        decorator.persist_layout(&host, Box::new(store.clone()));
        decorator.hide_on_minimize();

        decorator.handle_event(&host, HostWindowEvent::Minimized, Instant::now());

        assert_eq!(host.take_calls(), vec![HostCall::Hide]);
        assert_eq!(store.saved.lock().unwrap()[0].mode, PersistedMode::Normal);
    }

    #[test]
    fn tray_state_follows_minimize_and_restore_events() {
        let host = FakeWindow::new(0, 0, 400, 300);
        let indicator = RecordingIndicator::default();
        let mut decorator = decorator();
        decorator.attach_tray_icon(Some(Box::new(indicator.clone())), true);

        decorator.handle_event(&host, HostWindowEvent::Minimized, Instant::now());
        assert_eq!(decorator.tray_is_up(), Some(false));
        decorator.handle_event(&host, HostWindowEvent::Restored, Instant::now());
        assert_eq!(decorator.tray_is_up(), Some(true));
        assert_eq!(*indicator.history.lock().unwrap(), vec![true, false, true]);
    }

    #[test]
    fn tray_toggle_lowers_to_tray_and_back() {
        let host = FakeWindow::new(0, 0, 400, 300);
        let store = MemoryStore::default();
        let mut decorator = decorator();
        decorator.persist_layout(&host, Box::new(store.clone()));
        decorator.attach_tray_icon(None, true);
        decorator.hide_on_minimize();

        assert_eq!(
            decorator.toggle_from_tray(&host),
            Some(DockTransition::Lowered)
        );
        assert_eq!(host.take_calls(), vec![HostCall::Minimize, HostCall::Hide]);
        assert_eq!(store.saved.lock().unwrap().len(), 1);

        assert_eq!(
            decorator.toggle_from_tray(&host),
            Some(DockTransition::Raised)
        );
        assert_eq!(host.take_calls(), vec![HostCall::Show, HostCall::Restore]);
    }

    #[test]
    fn tray_toggle_without_tray_is_ignored() {
        let host = FakeWindow::new(0, 0, 400, 300);
        let mut decorator = decorator();
        assert_eq!(decorator.toggle_from_tray(&host), None);
        assert!(host.take_calls().is_empty());
    }

    #[test]
    fn resize_burst_arms_a_single_timer() {
        let host = FakeWindow::new(0, 0, 400, 300);
        let mut decorator = decorator();
        decorator.persist_layout(&host, Box::new(MemoryStore::default()));
        let start = Instant::now();
        decorator.handle_event(&host, HostWindowEvent::Loaded, start);

        let timers: Vec<_> = (0..4u64)
            .filter_map(|step| {
                decorator.handle_event(
                    &host,
                    HostWindowEvent::Resized,
                    start + Duration::from_millis(step * 50),
                )
            })
            .collect();
        assert_eq!(timers, vec![RESIZE_DEBOUNCE]);
        assert_eq!(
            decorator.poll_resize(start + Duration::from_millis(700)),
            DebouncePoll::Settled
        );
    }

    #[test]
    fn maximize_then_user_resize_returns_to_normal() {
        let host = FakeWindow::new(0, 0, 400, 300);
        let store = MemoryStore::default();
        let mut decorator = decorator();
        decorator.persist_layout(&host, Box::new(store.clone()));
        let now = Instant::now();

        decorator.handle_event(&host, HostWindowEvent::Maximized, now);
        decorator.settle_resize(&host);
        decorator.handle_close_requested(&host);
        host.set_geometry(20, 30, 500, 400);
        decorator.settle_resize(&host);
        decorator.handle_close_requested(&host);

        let saved = store.saved.lock().unwrap();
        assert_eq!(saved[0].mode, PersistedMode::Maximized);
        assert_eq!(saved[1].mode, PersistedMode::Normal);
        assert_eq!(saved[1].x, Some(20));
    }
}
