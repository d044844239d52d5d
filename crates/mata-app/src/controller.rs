//! The shell window's lifecycle operations.
//!
//! `WindowController` owns the window state (logical size and DPI scale) and
//! drives the native window through [`PlatformWindow`]. Show-state is never
//! cached: the OS is asked every time.

use mata_common::errors::ShellError;
use mata_common::types::{LogicalSize, ShowState};
use mata_platform::{centered_origin, physical_size, scale_for_system, PlatformWindow};
use mata_webview::ipc::settle_script;
use mata_webview::WebViewHandle;
use tracing::{debug, error, info, warn};

/// The hosted page: where it points and where its JavaScript runs.
pub trait ScriptHost {
    fn navigate(&mut self, url: &str) -> mata_common::Result<()>;
    fn evaluate(&self, js: &str) -> mata_common::Result<()>;
}

impl ScriptHost for WebViewHandle {
    fn navigate(&mut self, url: &str) -> mata_common::Result<()> {
        self.load_url(url)
            .map_err(|e| ShellError::WebView(e.to_string()))
    }

    fn evaluate(&self, js: &str) -> mata_common::Result<()> {
        self.evaluate_script(js)
            .map_err(|e| ShellError::WebView(e.to_string()))
    }
}

pub struct WindowController {
    window: Box<dyn PlatformWindow>,
    scripts: Box<dyn ScriptHost>,
    logical: LogicalSize,
    scale: f64,
    closed: bool,
}

impl WindowController {
    /// Measure the DPI scale, then apply the initial title and size.
    pub fn new(
        window: Box<dyn PlatformWindow>,
        scripts: Box<dyn ScriptHost>,
        title: &str,
        size: LogicalSize,
    ) -> Self {
        let scale = scale_for_system(window.as_ref());
        let mut controller = Self {
            window,
            scripts,
            logical: size,
            scale,
            closed: false,
        };
        controller.retitle(title);
        controller.apply_size();
        info!(
            width = size.width,
            height = size.height,
            scale,
            "Window controller ready"
        );
        controller
    }

    pub fn logical_size(&self) -> LogicalSize {
        self.logical
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Current show-state as reported by the OS. Falls back to `Normal` when
    /// the query fails.
    pub fn show_state(&self) -> ShowState {
        self.window.show_state().unwrap_or_else(|e| {
            warn!(error = %e, "Show-state query failed");
            ShowState::Normal
        })
    }

    /// Set a new logical size. Non-positive dimensions are ignored.
    /// Returns whether the size changed.
    pub fn resize(&mut self, width: i32, height: i32) -> bool {
        let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
            debug!(width, height, "Resize ignored: negative dimension");
            return false;
        };
        if width == 0 || height == 0 {
            debug!(width, height, "Resize ignored: zero dimension");
            return false;
        }
        self.logical = LogicalSize::new(width, height);
        self.apply_size();
        true
    }

    pub fn retitle(&mut self, title: &str) {
        self.window.set_title(title);
    }

    /// Move the window to the middle of the primary screen, keeping its size.
    pub fn center(&mut self) {
        let screen = match self.window.screen_size() {
            Ok(s) => s,
            Err(e) => {
                error!(error = %e, "Cannot center window");
                return;
            }
        };
        let origin = centered_origin(self.logical, self.scale, screen);
        if let Err(e) = self.window.set_position(origin) {
            error!(error = %e, "Window move failed");
        }
    }

    pub fn minimize(&mut self) {
        self.transition(ShowState::Minimized);
    }

    pub fn maximize(&mut self) {
        self.transition(ShowState::Maximized);
    }

    pub fn restore(&mut self) {
        self.transition(ShowState::Normal);
    }

    /// Point the page at `url`. Called once the window has its final title,
    /// size and scale.
    pub fn navigate(&mut self, url: &str) -> mata_common::Result<()> {
        self.scripts.navigate(url)?;
        info!(url = %url, "WebView navigating to content");
        Ok(())
    }

    /// Terminal: the event loop exits once it sees the controller closed.
    pub fn close(&mut self) {
        info!("Close requested by content");
        self.closed = true;
    }

    /// Show a modal `alert()` in the page.
    ///
    /// Only `'` is escaped, so messages containing backslashes or line
    /// breaks may not display verbatim.
    pub fn show_alert(&self, message: &str) {
        let escaped = message.replace('\'', "\\'");
        if let Err(e) = self.scripts.evaluate(&format!("alert('{escaped}')")) {
            warn!(error = %e, "Alert failed");
        }
    }

    /// Resolve or reject the page-side Promise of bridge call `id`.
    pub fn settle(&self, id: u64, error: Option<&str>) {
        if let Err(e) = self.scripts.evaluate(&settle_script(id, error)) {
            warn!(id, error = %e, "Failed to settle bridge call");
        }
    }

    fn transition(&self, state: ShowState) {
        match self.window.set_show_state(state) {
            Ok(()) => debug!(%state, "Show-state changed"),
            Err(e) => error!(%state, error = %e, "Show-state change failed"),
        }
    }

    fn apply_size(&self) {
        let size = physical_size(self.logical, self.scale);
        if let Err(e) = self.window.set_size(size) {
            error!(
                width = size.width,
                height = size.height,
                error = %e,
                "Window resize failed"
            );
        }
    }
}
