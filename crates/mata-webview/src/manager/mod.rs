//! WebView construction.
//!
//! `WebViewManager` builds the shell's single `wry::WebView`, installing the
//! bridge scripts and routing handler callbacks into an [`EventSink`].

use crate::events::EventSink;

mod handle;
pub mod handlers;
mod lifecycle;
mod types;

pub use handle::WebViewHandle;
pub use types::WebViewConfig;

pub struct WebViewManager {
    /// Event sink; handlers push here for the main event loop to consume.
    pub(crate) sink: EventSink,
}

impl WebViewManager {
    pub fn new(sink: EventSink) -> Self {
        Self { sink }
    }
}
