//! Win32 `PlatformWindow`.
//!
//! Show-state, screen metrics, DPI and positioning go straight to user32
//! against the HWND that winit created. Title and client size stay with
//! winit, which owns the window and its text encoding.

use std::sync::Arc;

use mata_common::errors::PlatformError;
use mata_common::types::{PhysicalSize, Point, ShowState};
use tracing::debug;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::HiDpi::GetDpiForSystem;
use windows::Win32::UI::WindowsAndMessaging::{
    GetSystemMetrics, IsIconic, IsZoomed, SetWindowPos, ShowWindow, SET_WINDOW_POS_FLAGS,
    SHOW_WINDOW_CMD, SM_CXSCREEN, SM_CYSCREEN, SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOSIZE,
    SWP_NOZORDER, SWP_SHOWWINDOW, SW_MAXIMIZE, SW_MINIMIZE, SW_RESTORE, SYSTEM_METRICS_INDEX,
};
use winit::raw_window_handle::{HasWindowHandle, RawWindowHandle};
use winit::window::Window;

use crate::{PlatformWindow, Result};

/// Move-only flags: keep size and z-order, don't steal focus, refresh the
/// frame and make sure the window is visible.
const MOVE_FLAGS: SET_WINDOW_POS_FLAGS = SET_WINDOW_POS_FLAGS(
    SWP_NOSIZE.0 | SWP_NOZORDER.0 | SWP_NOACTIVATE.0 | SWP_FRAMECHANGED.0 | SWP_SHOWWINDOW.0,
);

pub struct Win32Window {
    window: Arc<Window>,
    hwnd: HWND,
}

impl Win32Window {
    pub fn new(window: Arc<Window>) -> Result<Self> {
        let handle = window
            .window_handle()
            .map_err(|e| PlatformError::WindowHandle(e.to_string()))?;
        let hwnd = match handle.as_raw() {
            RawWindowHandle::Win32(h) => HWND(h.hwnd.get() as *mut core::ffi::c_void),
            other => {
                return Err(PlatformError::WindowHandle(format!(
                    "expected a Win32 handle, got {other:?}"
                )))
            }
        };
        Ok(Self { window, hwnd })
    }

    fn show(&self, cmd: SHOW_WINDOW_CMD) {
        // The return value is the previous visibility, not a status.
        let _ = unsafe { ShowWindow(self.hwnd, cmd) };
    }

    fn metric(index: SYSTEM_METRICS_INDEX, name: &str) -> Result<i32> {
        let value = unsafe { GetSystemMetrics(index) };
        if value == 0 {
            return Err(PlatformError::ScreenMetrics(format!(
                "GetSystemMetrics({name}) returned 0"
            )));
        }
        Ok(value)
    }
}

impl PlatformWindow for Win32Window {
    fn system_dpi(&self) -> Result<u32> {
        let dpi = unsafe { GetDpiForSystem() };
        if dpi == 0 {
            return Err(PlatformError::Dpi("GetDpiForSystem returned 0".into()));
        }
        Ok(dpi)
    }

    fn screen_size(&self) -> Result<PhysicalSize> {
        let width = Self::metric(SM_CXSCREEN, "SM_CXSCREEN")?;
        let height = Self::metric(SM_CYSCREEN, "SM_CYSCREEN")?;
        Ok(PhysicalSize::new(width, height))
    }

    fn show_state(&self) -> Result<ShowState> {
        let state = unsafe {
            if IsIconic(self.hwnd).as_bool() {
                ShowState::Minimized
            } else if IsZoomed(self.hwnd).as_bool() {
                ShowState::Maximized
            } else {
                ShowState::Normal
            }
        };
        Ok(state)
    }

    fn set_show_state(&self, state: ShowState) -> Result<()> {
        match state {
            ShowState::Minimized => self.show(SW_MINIMIZE),
            ShowState::Maximized => self.show(SW_MAXIMIZE),
            ShowState::Normal => {
                self.show(SW_RESTORE);
                // A minimized window that was maximized restores to maximized;
                // a second restore brings it back to normal.
                if self.show_state()? == ShowState::Maximized {
                    self.show(SW_RESTORE);
                }
            }
        }

        let actual = self.show_state()?;
        if actual != state {
            return Err(PlatformError::ShowWindow(format!(
                "requested {state}, window is {actual}"
            )));
        }
        debug!(%state, "show-state applied");
        Ok(())
    }

    fn set_size(&self, size: PhysicalSize) -> Result<()> {
        let requested = winit::dpi::PhysicalSize::new(size.width as u32, size.height as u32);
        if let Some(applied) = self.window.request_inner_size(requested) {
            debug!(width = applied.width, height = applied.height, "inner size applied");
        }
        Ok(())
    }

    fn set_position(&self, origin: Point) -> Result<()> {
        unsafe { SetWindowPos(self.hwnd, None, origin.x, origin.y, 0, 0, MOVE_FLAGS) }
            .map_err(|e| PlatformError::WindowPos(e.to_string()))
    }

    fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }
}
