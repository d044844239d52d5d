//! Graceful shutdown: drop the WebView and window, stop the content server.

use std::time::Duration;

use super::core::MataApp;

// =============================================================================
// SHUTDOWN
// =============================================================================

impl MataApp {
    /// Tear everything down. Safe to call more than once.
    ///
    /// Order:
    /// 1. Drop the controller (and with it the WebView)
    /// 2. Drop the window
    /// 3. Stop the content server
    /// 4. Shut down the tokio runtime
    pub(crate) fn shutdown(&mut self) {
        if self.controller.is_none()
            && self.window.is_none()
            && self.server.is_none()
            && self.tokio_runtime.is_none()
        {
            return;
        }
        tracing::info!("Initiating graceful shutdown");

        self.controller = None;
        self.window = None;

        if let Some(mut server) = self.server.take() {
            server.shutdown();
        }

        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(2));
        }

        tracing::info!("Graceful shutdown complete");
    }
}

// =============================================================================
// TESTS
// =============================================================================
