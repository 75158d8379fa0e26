//! Agent lifecycle state machine.
//!
//! `HostController` owns at most one [`AgentProcess`]. Requests from the UI
//! (`start`, `stop`, `send_input`) and reports from the process tasks
//! (output chunks, exit) all mutate state on the controller's owner, so
//! they cannot race each other.
//!
//! ```text
//! Idle ──start──▶ Starting ──spawned──▶ Running ──stop──▶ Terminating
//!  ▲                 │                     │                   │
//!  └──spawn failed───┘◀────────exit────────┴───────exit────────┘
//! ```

mod process;


use std::fmt;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use webagent_common::{HostError, OutputBus, OutputEvent};
use webagent_config::schema::AgentConfig;

use crate::launch::{self, LaunchPaths, LaunchPlan};

use process::{AgentProcess, ProcessSignal};

pub use process::{ExitReport, READ_CHUNK};

/// Log target for mirrored agent output.
const AGENT_TARGET: &str = "webagent::agent";

// =============================================================================
// STATE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Starting,
    Running,
    Terminating,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControllerState::Idle => "idle",
            ControllerState::Starting => "starting",
            ControllerState::Running => "running",
            ControllerState::Terminating => "terminating",
        };
        f.write_str(name)
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

pub struct HostController {
    config: AgentConfig,
    paths: LaunchPaths,
    runtime: Handle,
    bus: OutputBus,
    state: ControllerState,
    process: Option<AgentProcess>,
    mirror_output: bool,
}

impl HostController {
    /// Create an idle controller. Process tasks run on `runtime`.
    pub fn new(config: AgentConfig, paths: LaunchPaths, runtime: Handle) -> Self {
        Self {
            config,
            paths,
            runtime,
            bus: OutputBus::new(),
            state: ControllerState::Idle,
            process: None,
            mirror_output: true,
        }
    }

    /// Whether agent output is also written to the log.
    pub fn with_mirror_output(mut self, mirror: bool) -> Self {
        self.mirror_output = mirror;
        self
    }

    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<OutputEvent> {
        self.bus.subscribe()
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// OS process id of the live agent, if any.
    pub fn pid(&self) -> Option<u32> {
        self.process.as_ref().and_then(|p| p.pid)
    }

    fn name(&self) -> &str {
        &self.config.display_name
    }

    fn publish(&self, event: OutputEvent) {
        self.bus.publish(event);
    }

    // -------------------------------------------------------------------------
    // Requests
    // -------------------------------------------------------------------------

    /// Launch the agent unless one is already live.
    ///
    /// Every outcome is also published: "Starting..." on success, an
    /// informational note when already running, an error otherwise.
    pub fn start(&mut self) -> Result<(), HostError> {
        if self.state != ControllerState::Idle {
            debug!(state = %self.state, "start ignored: agent already live");
            self.publish(OutputEvent::info(format!(
                "{} is already running.\n",
                self.name()
            )));
            return Err(HostError::AlreadyRunning);
        }

        self.state = ControllerState::Starting;
        match self.launch() {
            Ok(process) => {
                info!(run = process.run_id.short(), pid = ?process.pid, "agent started");
                self.process = Some(process);
                self.state = ControllerState::Running;
                self.publish(OutputEvent::info(format!("Starting {}...\n", self.name())));
                Ok(())
            }
            Err(err) => {
                self.state = ControllerState::Idle;
                error!(error = %err, "agent failed to start");
                let text = match &err {
                    HostError::ExecutableMissing(path) => format!(
                        "{} executable not found at: {}\n",
                        self.name(),
                        path.display()
                    ),
                    other => format!("Failed to start {}: {other}\n", self.name()),
                };
                self.publish(OutputEvent::error(text));
                Err(err)
            }
        }
    }

    fn launch(&self) -> Result<AgentProcess, HostError> {
        let plan = LaunchPlan::resolve(&self.config, &self.paths)?;
        info!(
            program = %plan.program.display(),
            args = ?plan.args,
            cwd = %plan.working_dir.display(),
            packaged = plan.packaged,
            "launching agent"
        );

        if plan.packaged {
            if !plan.program.exists() {
                return Err(HostError::ExecutableMissing(plan.program));
            }
            if let Err(e) = launch::ensure_executable(&plan.program) {
                warn!(path = %plan.program.display(), error = %e, "could not set executable permissions");
            }
        }

        AgentProcess::spawn(&plan, &self.runtime)
    }

    /// Write `line` plus a newline to the agent's stdin.
    pub fn send_input(&mut self, line: &str) -> Result<(), HostError> {
        let result = match (&self.process, self.state) {
            (Some(process), ControllerState::Running) => {
                let mut bytes = Vec::with_capacity(line.len() + 1);
                bytes.extend_from_slice(line.as_bytes());
                bytes.push(b'\n');
                process.write(bytes)
            }
            _ => Err(HostError::NotRunning),
        };

        if let Err(err) = &result {
            debug!(state = %self.state, error = %err, "input rejected");
            self.publish(OutputEvent::error(format!(
                "{} is not running or not ready for input.\n",
                self.name()
            )));
        }
        result
    }

    /// Ask the agent to terminate. Exit is reported later through `poll`.
    ///
    /// Pressing stop again while terminating re-sends the signal.
    pub fn stop(&mut self) -> Result<(), HostError> {
        if !matches!(
            self.state,
            ControllerState::Running | ControllerState::Terminating
        ) {
            return Err(HostError::NotRunning);
        }

        if let Some(process) = self.process.as_ref() {
            process.terminate();
            info!(run = process.run_id.short(), state = %self.state, "stopping agent");
        }
        self.state = ControllerState::Terminating;
        self.publish(OutputEvent::info(format!("Stopping {}...\n", self.name())));
        Ok(())
    }

    /// Host is closing: signal a live agent without waiting for it.
    pub fn shutdown(&mut self) {
        if let Some(process) = self.process.as_ref() {
            info!(run = process.run_id.short(), "terminating agent on shutdown");
            process.terminate();
            self.state = ControllerState::Terminating;
        }
    }

    // -------------------------------------------------------------------------
    // Process reports
    // -------------------------------------------------------------------------

    /// Handle every report that has already arrived. Never blocks.
    ///
    /// Returns how many reports were handled.
    pub fn poll(&mut self) -> usize {
        let mut handled = 0;
        while let Some(process) = self.process.as_mut() {
            match process.signals.try_recv() {
                Ok(signal) => self.handle_signal(signal),
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    self.finish(ExitReport::WaitFailed("process supervisor vanished".into()))
                }
            }
            handled += 1;
        }
        handled
    }

    /// Wait for the next report and handle it.
    ///
    /// Returns `false` immediately when no process is live.
    pub async fn pump(&mut self) -> bool {
        let Some(process) = self.process.as_mut() else {
            return false;
        };
        match process.signals.recv().await {
            Some(signal) => self.handle_signal(signal),
            None => self.finish(ExitReport::WaitFailed("process supervisor vanished".into())),
        }
        true
    }

    fn handle_signal(&mut self, signal: ProcessSignal) {
        match signal {
            ProcessSignal::Stdout(text) => {
                if self.mirror_output {
                    debug!(target: AGENT_TARGET, "{}", text.trim_end());
                }
                self.publish(OutputEvent::output(text));
            }
            ProcessSignal::Stderr(text) => {
                if self.mirror_output {
                    warn!(target: AGENT_TARGET, "{}", text.trim_end());
                }
                self.publish(OutputEvent::error(text));
            }
            ProcessSignal::Exited(report) => self.finish(report),
        }
    }

    fn finish(&mut self, report: ExitReport) {
        let run = self.process.take().map(|p| p.run_id);
        self.state = ControllerState::Idle;
        info!(run = run.as_ref().map(|r| r.short()), ?report, "agent exited");
        self.publish(OutputEvent::exit(report.message(self.name())));
    }
}
