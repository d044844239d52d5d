//! Event loop user events.

use std::rc::Rc;

use mata_webview::{EventSink, WebViewEvent};
use winit::event_loop::EventLoopProxy;

/// Events delivered to the UI thread through the event loop proxy.
#[derive(Debug, Clone)]
pub enum ShellEvent {
    WebView(WebViewEvent),
}

/// An [`EventSink`] that forwards WebView events into the event loop.
pub fn proxy_sink(proxy: EventLoopProxy<ShellEvent>) -> EventSink {
    Rc::new(move |event| {
        if proxy.send_event(ShellEvent::WebView(event)).is_err() {
            tracing::debug!("Event loop closed, WebView event dropped");
        }
    })
}
