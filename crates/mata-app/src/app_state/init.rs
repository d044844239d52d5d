//! Window, WebView and controller setup.

use std::sync::Arc;

use mata_webview::{WebViewConfig, WebViewManager};
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use crate::controller::WindowController;

use super::core::MataApp;

impl MataApp {
    /// Create the window, attach the WebView and point it at the content
    /// server. Returns `false` if initialization failed and the event loop
    /// should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let Some(server) = self.server.as_ref() else {
            tracing::error!("Content server is gone, cannot open window");
            return false;
        };
        let (origin, url) = (server.origin(), server.url());

        let size = self.config.logical_size();
        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                f64::from(size.width),
                f64::from(size.height),
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        let platform = match mata_platform::attach(Arc::clone(&window)) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!("Failed to attach to native window: {e}");
                return false;
            }
        };

        let manager = WebViewManager::new(self.sink.clone());
        let webview_config = WebViewConfig::for_origin(origin, self.config.debug);
        let webview = match manager.create(window.as_ref(), webview_config) {
            Ok(wv) => wv,
            Err(e) => {
                tracing::error!("Failed to create WebView: {e}");
                return false;
            }
        };

        // Title, scaled size and bridge are in place before the page loads
        let mut controller = WindowController::new(
            platform,
            Box::new(webview),
            &self.config.title,
            size,
        );
        if let Err(e) = controller.navigate(&url) {
            tracing::error!(url = %url, "Failed to navigate WebView: {e}");
            return false;
        }
        controller.center();

        self.window = Some(window);
        self.controller = Some(controller);
        true
    }
}
