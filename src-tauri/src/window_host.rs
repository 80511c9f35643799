use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostWindowEvent {
    Maximized,
    Unmaximized,
    Minimized,
    Restored,
    Resized,
    Loaded,
}

impl fmt::Display for HostWindowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Maximized => "maximize",
            Self::Unmaximized => "unmaximize",
            Self::Minimized => "minimize",
            Self::Restored => "restore",
            Self::Resized => "resize",
            Self::Loaded => "loaded",
        };
        f.write_str(name)
    }
}

pub trait HostWindow {
    fn geometry(&self) -> Result<WindowGeometry, String>;
    fn minimize(&self) -> Result<(), String>;
    fn maximize(&self) -> Result<(), String>;
    fn restore(&self) -> Result<(), String>;
    fn hide(&self) -> Result<(), String>;
    fn show(&self) -> Result<(), String>;
    fn close(&self) -> Result<(), String>;
    fn resize_to(&self, width: u32, height: u32) -> Result<(), String>;
    fn move_to(&self, x: i32, y: i32) -> Result<(), String>;
}
