//! MataApp struct definition and constructor.

use std::process::ExitCode;
use std::sync::Arc;

use mata_webview::{EventSink, StaticServer};
use tokio::runtime::Runtime;
use winit::window::Window;

use crate::config::ShellConfig;
use crate::controller::WindowController;

/// Top-level application state.
pub struct MataApp {
    pub(super) config: ShellConfig,
    /// Handed to the WebView so its callbacks reach the event loop.
    pub(super) sink: EventSink,

    // Content serving
    pub(super) server: Option<StaticServer>,
    pub(super) tokio_runtime: Option<Runtime>,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) controller: Option<WindowController>,

    // Set when the window or WebView could not be created
    pub(super) failed: bool,
}

impl MataApp {
    pub fn new(
        config: ShellConfig,
        sink: EventSink,
        server: StaticServer,
        runtime: Runtime,
    ) -> Self {
        Self {
            config,
            sink,
            server: Some(server),
            tokio_runtime: Some(runtime),
            window: None,
            controller: None,
            failed: false,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.failed {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }
}
