//! `PlatformWindow` over the winit window API, for non-Windows targets.
//!
//! Some compositors (Wayland) ignore positioning requests; winit drops
//! those silently, so `set_position` cannot report them.

use std::sync::Arc;

use mata_common::errors::PlatformError;
use mata_common::types::{PhysicalSize, Point, ShowState};
use tracing::debug;
use winit::window::Window;

use crate::geometry::BASELINE_DPI;
use crate::{PlatformWindow, Result};

pub struct WinitWindow {
    window: Arc<Window>,
}

impl WinitWindow {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl PlatformWindow for WinitWindow {
    fn system_dpi(&self) -> Result<u32> {
        let factor = self.window.scale_factor();
        if !factor.is_finite() || factor <= 0.0 {
            return Err(PlatformError::Dpi(format!("invalid scale factor {factor}")));
        }
        Ok((factor * f64::from(BASELINE_DPI)).round() as u32)
    }

    fn screen_size(&self) -> Result<PhysicalSize> {
        let monitor = self
            .window
            .current_monitor()
            .or_else(|| self.window.primary_monitor())
            .ok_or_else(|| PlatformError::ScreenMetrics("no monitor available".into()))?;
        let size = monitor.size();
        Ok(PhysicalSize::new(size.width as i32, size.height as i32))
    }

    fn show_state(&self) -> Result<ShowState> {
        if self.window.is_minimized() == Some(true) {
            Ok(ShowState::Minimized)
        } else if self.window.is_maximized() {
            Ok(ShowState::Maximized)
        } else {
            Ok(ShowState::Normal)
        }
    }

    fn set_show_state(&self, state: ShowState) -> Result<()> {
        match state {
            ShowState::Minimized => self.window.set_minimized(true),
            ShowState::Maximized => self.window.set_maximized(true),
            ShowState::Normal => {
                self.window.set_minimized(false);
                self.window.set_maximized(false);
            }
        }
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
        self.window
            .set_outer_position(winit::dpi::PhysicalPosition::new(origin.x, origin.y));
        self.window.set_visible(true);
        Ok(())
    }

    fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }
}
