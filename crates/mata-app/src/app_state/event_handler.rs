//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use mata_webview::WebViewEvent;

use crate::controller::WindowController;

use super::bridge::dispatch_bridge_message;
use super::core::MataApp;
use super::types::ShellEvent;

impl ApplicationHandler<ShellEvent> for MataApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if !self.initialize_window(event_loop) {
            self.failed = true;
            self.shutdown();
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::CloseRequested = event {
            tracing::info!("Window close requested");
            self.shutdown();
            event_loop.exit();
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: ShellEvent) {
        match event {
            ShellEvent::WebView(event) => self.handle_webview_event(event),
        }

        if self
            .controller
            .as_ref()
            .is_some_and(WindowController::is_closed)
        {
            self.shutdown();
            event_loop.exit();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

impl MataApp {
    pub(super) fn handle_webview_event(&mut self, event: WebViewEvent) {
        match event {
            WebViewEvent::IpcMessage { body } => match self.controller.as_mut() {
                Some(controller) => dispatch_bridge_message(controller, &body),
                None => tracing::warn!("Bridge call arrived with no window, dropped"),
            },
            WebViewEvent::PageLoad { state, url } => {
                tracing::debug!(?state, url = %url, "Page load");
            }
            WebViewEvent::TitleChanged { title } => {
                tracing::debug!(title = %title, "Document title changed");
            }
            WebViewEvent::NavigationRequested { url } => {
                tracing::debug!(url = %url, "Navigation");
            }
        }
    }
}
