#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("window handle error: {0}")]
    WindowHandle(String),

    #[error("screen metrics unavailable: {0}")]
    ScreenMetrics(String),

    #[error("dpi query failed: {0}")]
    Dpi(String),

    #[error("show window failed: {0}")]
    ShowWindow(String),

    #[error("set window position failed: {0}")]
    WindowPos(String),
}

/// Marshalling failures for script bridge invocations. These are reported
/// back to the calling script and never abort the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error("malformed bridge call: {0}")]
    Malformed(String),

    #[error("unknown bridge function: {0}")]
    UnknownFunction(String),

    #[error("{function} expects {expected} argument(s), got {got}")]
    Arity {
        function: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{function}: argument {index} must be {expected}")]
    ArgumentType {
        function: &'static str,
        index: usize,
        expected: &'static str,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("content server error: {0}")]
    Server(String),

    #[error("webview error: {0}")]
    WebView(String),

    #[error("event loop error: {0}")]
    EventLoop(String),
}
