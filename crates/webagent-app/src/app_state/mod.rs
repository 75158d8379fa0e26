//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Wires the host controller to the single WebView.

mod core;
mod event_handler;
mod init;
mod polling;
mod shutdown;
mod types;
mod webview_bridge;

pub use core::WebAgentApp;
