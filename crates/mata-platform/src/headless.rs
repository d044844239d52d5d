//! In-memory `PlatformWindow`.
//!
//! Behaves like a window on a configurable screen without touching the OS.
//! Clones share state, so a test can hand one clone to the code under test
//! and inspect the other.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mata_common::errors::PlatformError;
use mata_common::types::{PhysicalSize, Point, ShowState};

use crate::{PlatformWindow, Result};

#[derive(Debug)]
struct HeadlessState {
    dpi: Option<u32>,
    screen: Option<PhysicalSize>,
    show_state: ShowState,
    reject_show_state: bool,
    size: Option<PhysicalSize>,
    position: Option<Point>,
    title: String,
}

#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    state: Arc<Mutex<HeadlessState>>,
}

impl HeadlessWindow {
    /// A 96 DPI window on a 1920x1080 screen.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(HeadlessState {
                dpi: Some(96),
                screen: Some(PhysicalSize::new(1920, 1080)),
                show_state: ShowState::Normal,
                reject_show_state: false,
                size: None,
                position: None,
                title: String::new(),
            })),
        }
    }

    /// `None` makes the DPI query fail.
    pub fn with_dpi(self, dpi: Option<u32>) -> Self {
        self.lock().dpi = dpi;
        self
    }

    /// `None` makes the screen metrics query fail.
    pub fn with_screen(self, screen: Option<PhysicalSize>) -> Self {
        self.lock().screen = screen;
        self
    }

    /// Make every show-state change fail.
    pub fn rejecting_show_state(self) -> Self {
        self.lock().reject_show_state = true;
        self
    }

    /// Last size applied through `set_size`.
    pub fn size(&self) -> Option<PhysicalSize> {
        self.lock().size
    }

    /// Last origin applied through `set_position`.
    pub fn position(&self) -> Option<Point> {
        self.lock().position
    }

    pub fn title(&self) -> String {
        self.lock().title.clone()
    }

    fn lock(&self) -> MutexGuard<'_, HeadlessState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for HeadlessWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformWindow for HeadlessWindow {
    fn system_dpi(&self) -> Result<u32> {
        self.lock()
            .dpi
            .ok_or_else(|| PlatformError::Dpi("headless dpi unavailable".into()))
    }

    fn screen_size(&self) -> Result<PhysicalSize> {
        self.lock()
            .screen
            .ok_or_else(|| PlatformError::ScreenMetrics("headless screen unavailable".into()))
    }

    fn show_state(&self) -> Result<ShowState> {
        Ok(self.lock().show_state)
    }

    fn set_show_state(&self, state: ShowState) -> Result<()> {
        let mut inner = self.lock();
        if inner.reject_show_state {
            return Err(PlatformError::ShowWindow(format!(
                "headless window refused {state}"
            )));
        }
        inner.show_state = state;
        Ok(())
    }

    fn set_size(&self, size: PhysicalSize) -> Result<()> {
        self.lock().size = Some(size);
        Ok(())
    }

    fn set_position(&self, origin: Point) -> Result<()> {
        self.lock().position = Some(origin);
        Ok(())
    }

    fn set_title(&self, title: &str) {
        self.lock().title = title.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_normal_with_defaults() {
        let w = HeadlessWindow::new();
        assert_eq!(w.show_state().unwrap(), ShowState::Normal);
        assert_eq!(w.system_dpi().unwrap(), 96);
        assert_eq!(w.screen_size().unwrap(), PhysicalSize::new(1920, 1080));
        assert!(w.size().is_none());
        assert!(w.position().is_none());
    }

    #[test]
    fn clones_share_state() {
        let w = HeadlessWindow::new();
        let observer = w.clone();
        w.set_position(Point::new(5, 7)).unwrap();
        w.set_title("Hello");
        assert_eq!(observer.position(), Some(Point::new(5, 7)));
        assert_eq!(observer.title(), "Hello");
    }

    #[test]
    fn failing_queries() {
        let w = HeadlessWindow::new().with_dpi(None).with_screen(None);
        assert!(matches!(w.system_dpi(), Err(PlatformError::Dpi(_))));
        assert!(matches!(
            w.screen_size(),
            Err(PlatformError::ScreenMetrics(_))
        ));
    }

    #[test]
    fn rejected_show_state_is_unchanged() {
        let w = HeadlessWindow::new().rejecting_show_state();
        assert!(w.set_show_state(ShowState::Minimized).is_err());
        assert_eq!(w.show_state().unwrap(), ShowState::Normal);
    }
}
