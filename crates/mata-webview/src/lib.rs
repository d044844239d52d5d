//! WebView hosting for the mata shell.
//!
//! Wraps the `wry` crate to provide:
//! - A single WebView filling the shell window
//! - The `window.mata` script bridge (typed commands, Promise replies)
//! - A loopback HTTP server for the bundled content directory
//! - Page load, title change and navigation events

pub mod content;
pub mod events;
pub mod ipc;
pub mod manager;
pub mod server;

pub use content::ContentProvider;
pub use events::{EventSink, PageLoadState, WebViewEvent};
pub use ipc::{BridgeCall, BridgeCommand};
pub use manager::{WebViewConfig, WebViewHandle, WebViewManager};
pub use server::StaticServer;
