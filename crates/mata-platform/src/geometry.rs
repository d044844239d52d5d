//! DPI scaling and screen placement.

use mata_common::types::{LogicalSize, PhysicalSize, Point};
use tracing::warn;

use crate::{PlatformWindow, Result};

/// Reference DPI at which one logical unit is one device pixel.
pub const BASELINE_DPI: u32 = 96;

/// Convert a DPI query result into a scale factor. Failed or zero queries
/// fall back to 1.0.
pub fn scale_from_dpi(dpi: Result<u32>) -> f64 {
    match dpi {
        Ok(dpi) if dpi > 0 => f64::from(dpi) / f64::from(BASELINE_DPI),
        _ => 1.0,
    }
}

/// Query the system DPI through `window` and return the scale factor.
pub fn scale_for_system(window: &dyn PlatformWindow) -> f64 {
    let dpi = window.system_dpi();
    if let Err(ref e) = dpi {
        warn!(error = %e, "DPI query failed, assuming 100% scaling");
    }
    scale_from_dpi(dpi)
}

/// Logical size scaled to device pixels, truncated per axis.
pub fn physical_size(logical: LogicalSize, scale: f64) -> PhysicalSize {
    PhysicalSize::new(
        (f64::from(logical.width) * scale) as i32,
        (f64::from(logical.height) * scale) as i32,
    )
}

/// Top-left corner that centers a window of `logical` size on `screen`.
///
/// Negative when the window is larger than the screen.
pub fn centered_origin(logical: LogicalSize, scale: f64, screen: PhysicalSize) -> Point {
    let physical = physical_size(logical, scale);
    Point::new(
        (screen.width - physical.width) / 2,
        (screen.height - physical.height) / 2,
    )
}
