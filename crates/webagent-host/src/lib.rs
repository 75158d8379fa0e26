//! Agent process host.
//!
//! Owns the lifecycle of at most one agent child process: resolves how to
//! launch it (packaged binary or interpreter + script), builds its
//! environment snapshot, pipes its stdio, and publishes everything it
//! prints as [`OutputEvent`](webagent_common::OutputEvent)s.
//!
//! Child I/O runs on tokio tasks; every state transition happens on the
//! thread that owns the [`HostController`], which drains process signals
//! through [`HostController::poll`] or [`HostController::pump`].

pub mod controller;
pub mod envfile;
pub mod environment;
pub mod launch;
mod utf8;

pub use controller::{ControllerState, ExitReport, HostController};
pub use environment::Environment;
pub use launch::{LaunchPaths, LaunchPlan};
