//! Handler process construction and execution.

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::command::HandlerCommand;
use crate::config::DispatchConfig;
use crate::error::{HookError, Result};
use crate::event::short_id;

/// Outcome of one handler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Exit code reported by the handler process.
    pub exit_code: i32,
}

impl ExecutionResult {
    /// Returns whether the handler reported success.
    #[must_use]
    pub const fn success(self) -> bool {
        self.exit_code == 0
    }
}

/// Runs handler processes for lifecycle events.
///
/// Holds the immutable handler command base and run configuration. Every
/// invocation assembles its own argument vector and child process, so one
/// executor is safely shared across concurrent dispatch tasks.
#[derive(Debug)]
pub struct TriggerExecutor {
    command: HandlerCommand,
    config: DispatchConfig,
}

impl TriggerExecutor {
    /// Creates an executor for the given handler command and
    /// configuration.
    #[must_use]
    pub const fn new(command: HandlerCommand, config: DispatchConfig) -> Self {
        Self { command, config }
    }

    /// Runs the handler once for `event` on `container_id`, feeding
    /// `payload` to its stdin when present. With no payload the child's
    /// stdin is left unconnected.
    ///
    /// Blocks until the child exits. A nonzero exit code is reported in
    /// the result, not as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the child cannot be spawned, its status
    /// cannot be collected, or it terminates without an exit code.
    pub async fn run(
        &self,
        event: &str,
        container_id: &str,
        payload: Option<Vec<u8>>,
    ) -> Result<ExecutionResult> {
        tracing::info!(id = short_id(container_id), event, "triggering handler");

        let argv = self.command.argv_for(event, container_id);
        let mut cmd = if let Some(shell) = &self.config.shell {
            let mut cmd = Command::new(shell);
            let _ = cmd.arg("-c").arg(argv.join(" "));
            cmd
        } else {
            let mut cmd = Command::new(&argv[0]);
            let _ = cmd.args(&argv[1..]);
            cmd
        };
        if !self.config.inherit_env {
            let _ = cmd.env_clear();
        }
        let _ = cmd
            .stdin(if payload.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(if self.config.debug {
                Stdio::inherit()
            } else {
                Stdio::null()
            })
            .stderr(Stdio::inherit());

        let mut child = cmd.spawn().map_err(|source| HookError::HandlerLaunch {
            program: self.command.program().to_owned(),
            source,
        })?;

        if let (Some(payload), Some(mut stdin)) = (payload, child.stdin.take()) {
            // A handler that exits without draining stdin breaks the pipe;
            // its exit status still gets collected below.
            if let Err(error) = stdin.write_all(&payload).await {
                tracing::warn!(id = short_id(container_id), event, %error, "handler stdin write failed");
            }
        }

        let status = child
            .wait()
            .await
            .map_err(|source| HookError::HandlerWait { source })?;
        status
            .code()
            .map(|exit_code| ExecutionResult { exit_code })
            .ok_or_else(|| HookError::HandlerTerminated {
                status: status.to_string(),
            })
    }
}
