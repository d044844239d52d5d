//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the window, its controller and WebView, and the content
//! server for the lifetime of the process.

mod bridge;
mod core;
mod event_handler;
mod init;
mod shutdown;
mod types;

pub use core::MataApp;
pub use types::{proxy_sink, ShellEvent};
