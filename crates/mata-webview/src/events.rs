//! WebView event types.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded (DOMContentLoaded + resources).
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events emitted by the WebView.
#[derive(Debug, Clone)]
pub enum WebViewEvent {
    /// Page load state changed. Carries the URL.
    PageLoad { state: PageLoadState, url: String },
    /// Document title changed.
    TitleChanged { title: String },
    /// A bridge call arrived from JavaScript (raw JSON body).
    IpcMessage { body: String },
    /// An allowed navigation is about to happen.
    NavigationRequested { url: String },
}

/// Where the WebView's handlers deliver events. Handlers run on the UI
/// thread, so the sink does not need to be `Send`.
pub type EventSink = Rc<dyn Fn(WebViewEvent)>;
