/// Configuration for creating the WebView.
#[derive(Debug, Clone)]
pub struct WebViewConfig {
    /// Origin that navigation is restricted to (e.g. `http://127.0.0.1:5123`).
    /// `None` blocks everything but `about:blank`.
    pub allowed_origin: Option<String>,
    /// Whether to enable dev tools.
    pub devtools: bool,
    /// Suppress reload shortcuts and the context menu.
    pub input_guard: bool,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            allowed_origin: None,
            devtools: false,
            input_guard: true,
        }
    }
}

impl WebViewConfig {
    /// Config for content served from `origin`. Debug mode enables dev tools
    /// and lifts the input guard.
    pub fn for_origin(origin: impl Into<String>, debug: bool) -> Self {
        Self {
            allowed_origin: Some(origin.into()),
            devtools: debug,
            input_guard: !debug,
        }
    }
}
