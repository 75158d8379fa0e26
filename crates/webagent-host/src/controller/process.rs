//! The live agent process: spawn, stdio tasks, termination, exit detection.

use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin, Command};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use webagent_common::{HostError, RunId};

use crate::launch::LaunchPlan;
use crate::utf8::Utf8Decoder;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Maximum bytes read from a child pipe at once (8 KB).
pub const READ_CHUNK: usize = 8_192;

// =============================================================================
// SIGNALS
// =============================================================================

/// How the agent process ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReport {
    /// Normal exit with a status code.
    Code(i32),
    /// Killed by a signal (Unix only).
    Signal(i32),
    /// Waiting on the child failed; the process state is unknown.
    WaitFailed(String),
}

impl ExitReport {
    pub(crate) fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ExitReport::Code(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ExitReport::Signal(signal);
            }
        }
        ExitReport::WaitFailed(format!("unrecognized exit status: {status}"))
    }

    /// The line shown in the output region when the agent is gone.
    pub fn message(&self, name: &str) -> String {
        match self {
            ExitReport::Code(code) => format!("\n[{name} exited with code {code}]\n"),
            ExitReport::Signal(signal) => format!("\n[{name} terminated by signal {signal}]\n"),
            ExitReport::WaitFailed(reason) => format!("\n[{name} exited: {reason}]\n"),
        }
    }
}

/// Reports from the process tasks back to the controller.
#[derive(Debug)]
pub(crate) enum ProcessSignal {
    Stdout(String),
    Stderr(String),
    /// Sent once, after both output pipes have been drained.
    Exited(ExitReport),
}

#[derive(Debug, Clone, Copy)]
enum StreamKind {
    Stdout,
    Stderr,
}

impl StreamKind {
    fn signal(self, text: String) -> ProcessSignal {
        match self {
            StreamKind::Stdout => ProcessSignal::Stdout(text),
            StreamKind::Stderr => ProcessSignal::Stderr(text),
        }
    }

    fn name(self) -> &'static str {
        match self {
            StreamKind::Stdout => "stdout",
            StreamKind::Stderr => "stderr",
        }
    }
}

// =============================================================================
// PROCESS HANDLE
// =============================================================================

/// The one live agent process.
///
/// Holds only channels: the child itself is owned by its supervisor task.
/// Dropping the handle terminates the process; dropping the runtime that
/// runs the supervisor kills it.
pub(crate) struct AgentProcess {
    pub(crate) run_id: RunId,
    pub(crate) pid: Option<u32>,
    stdin_tx: mpsc::UnboundedSender<Vec<u8>>,
    kill_tx: mpsc::UnboundedSender<()>,
    pub(crate) signals: mpsc::UnboundedReceiver<ProcessSignal>,
}

impl AgentProcess {
    /// Spawn the planned process and its stdio tasks on `runtime`.
    pub(crate) fn spawn(plan: &LaunchPlan, runtime: &Handle) -> Result<Self, HostError> {
        let mut cmd = Command::new(&plan.program);
        cmd.args(&plan.args)
            .current_dir(&plan.working_dir)
            .env_clear()
            .envs(plan.env.iter())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = {
            let _guard = runtime.enter();
            cmd.spawn().map_err(HostError::Spawn)?
        };

        let run_id = RunId::new();
        let pid = child.id();
        debug!(run = run_id.short(), ?pid, program = %plan.program.display(), "agent spawned");

        let (signal_tx, signals) = mpsc::unbounded_channel();
        let (stdin_tx, stdin_rx) = mpsc::unbounded_channel();
        let (kill_tx, kill_rx) = mpsc::unbounded_channel();

        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(runtime.spawn(forward_stream(
                stdout,
                StreamKind::Stdout,
                signal_tx.clone(),
            )));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(runtime.spawn(forward_stream(
                stderr,
                StreamKind::Stderr,
                signal_tx.clone(),
            )));
        }
        match child.stdin.take() {
            Some(stdin) => {
                runtime.spawn(write_stdin(stdin, stdin_rx));
            }
            None => warn!(run = run_id.short(), "agent stdin unavailable"),
        }

        runtime.spawn(supervise(child, kill_rx, readers, signal_tx));

        Ok(Self {
            run_id,
            pid,
            stdin_tx,
            kill_tx,
            signals,
        })
    }

    /// Queue bytes for the child's stdin. Fails once the pipe is gone.
    pub(crate) fn write(&self, bytes: Vec<u8>) -> Result<(), HostError> {
        self.stdin_tx.send(bytes).map_err(|_| HostError::StdinClosed)
    }

    /// Ask the supervisor to terminate the child. Each call signals again.
    pub(crate) fn terminate(&self) {
        // The supervisor may already be gone if the child just exited.
        let _ = self.kill_tx.send(());
    }
}

// =============================================================================
// TASKS
// =============================================================================

/// Forward one output pipe to the controller, chunk by chunk, until EOF.
async fn forward_stream<R>(
    mut reader: R,
    kind: StreamKind,
    tx: mpsc::UnboundedSender<ProcessSignal>,
) where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; READ_CHUNK];
    let mut decoder = Utf8Decoder::new();
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                let text = decoder.decode(&buf[..n]);
                if !text.is_empty() && tx.send(kind.signal(text)).is_err() {
                    return; // Controller dropped the process
                }
            }
            Err(e) => {
                debug!(stream = kind.name(), error = %e, "agent pipe read failed");
                break;
            }
        }
    }
    let rest = decoder.finish();
    if !rest.is_empty() {
        let _ = tx.send(kind.signal(rest));
    }
}

/// Write queued input to the child's stdin in order.
///
/// Exits on the first write failure; the dropped receiver then makes
/// further `AgentProcess::write` calls fail.
async fn write_stdin(mut stdin: ChildStdin, mut rx: mpsc::UnboundedReceiver<Vec<u8>>) {
    while let Some(bytes) = rx.recv().await {
        let result = async {
            stdin.write_all(&bytes).await?;
            stdin.flush().await
        }
        .await;
        if let Err(e) = result {
            warn!(error = %e, "agent stdin write failed");
            break;
        }
    }
}

/// Wait for exit (terminating on request), then report once both pipes drain.
async fn supervise(
    mut child: Child,
    mut kill_rx: mpsc::UnboundedReceiver<()>,
    readers: Vec<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<ProcessSignal>,
) {
    let pid = child.id();
    let mut kill_armed = true;

    let status = loop {
        tokio::select! {
            status = child.wait() => break status,
            // Fires on every stop request and once when the handle is dropped.
            request = kill_rx.recv(), if kill_armed => {
                kill_armed = request.is_some();
                send_terminate(&mut child, pid);
            }
        }
    };

    for reader in readers {
        let _ = reader.await;
    }

    let report = match status {
        Ok(status) => ExitReport::from_status(status),
        Err(e) => ExitReport::WaitFailed(e.to_string()),
    };
    let _ = tx.send(ProcessSignal::Exited(report));
}

/// SIGTERM on Unix so the agent can close its browser; hard kill elsewhere.
fn send_terminate(child: &mut Child, pid: Option<u32>) {
    #[cfg(unix)]
    if let Some(pid) = pid {
        // SAFETY: `kill(2)` takes no pointers; the pid belongs to a child
        // this task has not reaped yet, so it cannot have been reused.
        let rc = unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) };
        if rc == 0 {
            debug!(pid, "sent SIGTERM to agent");
            return;
        }
        warn!(pid, error = %std::io::Error::last_os_error(), "SIGTERM failed, killing agent");
    }
    #[cfg(not(unix))]
    let _ = pid;

    if let Err(e) = child.start_kill() {
        debug!(error = %e, "agent kill failed (may already be dead)");
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_message_includes_code() {
        let msg = ExitReport::Code(3).message("WebAgent");
        assert_eq!(msg, "\n[WebAgent exited with code 3]\n");
    }

    #[test]
    fn signal_message_names_signal() {
        let msg = ExitReport::Signal(15).message("WebAgent");
        assert!(msg.contains("terminated by signal 15"));
    }

    #[cfg(unix)]
    #[test]
    fn from_status_reads_code_and_signal() {
        use std::os::unix::process::ExitStatusExt;

        // Raw wait statuses: exit code lives in the high byte.
        assert_eq!(
            ExitReport::from_status(ExitStatus::from_raw(7 << 8)),
            ExitReport::Code(7)
        );
        assert_eq!(
            ExitReport::from_status(ExitStatus::from_raw(15)),
            ExitReport::Signal(15)
        );
    }

    #[test]
    fn read_chunk_is_8k() {
        assert_eq!(READ_CHUNK, 8_192);
    }
}
