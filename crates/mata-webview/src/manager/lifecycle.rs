use tracing::debug;
use wry::raw_window_handle;
use wry::WebViewBuilder;

use crate::ipc::{bindings_script, namespace_script, BRIDGE_RUNTIME_SCRIPT, INPUT_GUARD_SCRIPT};

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::WebViewManager;

impl WebViewManager {
    /// Create the WebView filling `window`.
    ///
    /// Bridge bindings and the `window.mata` namespace are installed as
    /// initialization scripts, so they exist before any page script runs.
    /// Nothing is loaded yet; call [`WebViewHandle::load_url`] once the
    /// handle is wired up.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &self,
        window: &W,
        config: WebViewConfig,
    ) -> Result<WebViewHandle, wry::Error> {
        let mut builder = WebViewBuilder::new().with_devtools(config.devtools);

        if config.input_guard {
            builder = builder.with_initialization_script(INPUT_GUARD_SCRIPT);
        }

        // Bridge runtime, then one global per binding, then the namespace
        builder = builder
            .with_initialization_script(BRIDGE_RUNTIME_SCRIPT)
            .with_initialization_script(&bindings_script())
            .with_initialization_script(&namespace_script());

        builder = Self::attach_ipc_handler(builder, self.sink.clone());
        builder = Self::attach_page_load_handler(builder, self.sink.clone());
        builder = Self::attach_title_handler(builder, self.sink.clone());
        builder = Self::attach_navigation_handler(
            builder,
            self.sink.clone(),
            config.allowed_origin.clone(),
        );

        let webview = builder.build(window)?;

        debug!(
            devtools = config.devtools,
            input_guard = config.input_guard,
            "WebView created"
        );

        Ok(WebViewHandle { webview })
    }
}
