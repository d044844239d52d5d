//! Native window control for the mata shell.
//!
//! Everything the shell does to its own top-level window goes through the
//! [`PlatformWindow`] capability set: DPI and screen metrics, show-state,
//! size, position and title. Windows gets direct Win32 calls; other targets
//! fall back to winit. [`headless::HeadlessWindow`] is an in-memory backend
//! for tests.

use std::sync::Arc;

use mata_common::errors::PlatformError;
use mata_common::types::{PhysicalSize, Point, ShowState};

pub mod geometry;
pub mod headless;
#[cfg(target_os = "windows")]
pub mod win32;
#[cfg(not(target_os = "windows"))]
pub mod winit_backend;

pub use geometry::{centered_origin, physical_size, scale_for_system, scale_from_dpi, BASELINE_DPI};

pub type Result<T> = std::result::Result<T, PlatformError>;

/// OS-level operations on the shell window.
///
/// Implementations hold a non-owning reference to the native window; the
/// windowing library owns it. The OS is authoritative for show-state, so
/// nothing here caches it.
pub trait PlatformWindow {
    /// System DPI (96 = 100% scaling).
    fn system_dpi(&self) -> Result<u32>;
    /// Primary screen size in device pixels.
    fn screen_size(&self) -> Result<PhysicalSize>;
    fn show_state(&self) -> Result<ShowState>;
    fn set_show_state(&self, state: ShowState) -> Result<()>;
    /// Resize the client area, with no min/max hint applied.
    fn set_size(&self, size: PhysicalSize) -> Result<()>;
    /// Move the window without changing its size or z-order, and show it.
    fn set_position(&self, origin: Point) -> Result<()>;
    fn set_title(&self, title: &str);
}

/// Wrap a winit window in the platform-appropriate backend.
///
/// On Windows: Win32 calls against the window's HWND.
/// On other platforms: the winit window API.
pub fn attach(window: Arc<winit::window::Window>) -> Result<Box<dyn PlatformWindow>> {
    #[cfg(target_os = "windows")]
    {
        Ok(Box::new(win32::Win32Window::new(window)?))
    }
    #[cfg(not(target_os = "windows"))]
    {
        Ok(Box::new(winit_backend::WinitWindow::new(window)))
    }
}
