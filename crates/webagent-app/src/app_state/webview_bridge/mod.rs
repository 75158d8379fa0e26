//! Glue between the WebView and the host controller.

pub(super) mod bounds;
mod events;
mod ipc_dispatch;
mod output;
