// src/exec/process.rs

//! Subprocess ownership and output capture for a single execution.

use std::process::Stdio;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::{Child, Command};
use tracing::debug;

/// Failure while spawning or draining a command.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("failed to spawn command: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("failed to read command output: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed while waiting for command to exit: {0}")]
    Wait(#[source] std::io::Error),
}

/// Everything captured from one execution.
#[derive(Debug)]
pub struct Capture {
    pub output: Vec<u8>,
    /// Absent when the process was force-closed or terminated by a signal.
    pub exit_code: Option<i32>,
}

/// Owns the child-process handle for exactly the lifetime of one execution.
///
/// The handle lives in a mutex-guarded slot so [`release`](Self::release)
/// can close it from another task while [`run_once`](Self::run_once) is
/// blocked reading output: the kill closes the stdout pipe, which ends the
/// in-flight read. Both the normal completion path and `release` clear the
/// slot; clearing an already-empty slot is a no-op, so the two paths cannot
/// race into a double close.
pub struct ProcessRunner {
    shell: String,
    shell_arg: &'static str,
    child_slot: Mutex<Option<Child>>,
    closed: AtomicBool,
}

impl ProcessRunner {
    /// Runner using the platform shell (`sh -c`, or `cmd /C` on Windows).
    pub fn new() -> Self {
        let (shell, shell_arg) = if cfg!(windows) {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        };
        Self::with_shell(shell, shell_arg)
    }

    /// Runner with an explicit shell. Exists so tests can point at an
    /// unspawnable program to exercise the spawn-failure path.
    pub fn with_shell(shell: impl Into<String>, shell_arg: &'static str) -> Self {
        Self {
            shell: shell.into(),
            shell_arg,
            child_slot: Mutex::new(None),
            closed: AtomicBool::new(false),
        }
    }

    /// Spawn `command` through the shell, read its stdout to end-of-stream,
    /// then collect the exit status.
    ///
    /// Strictly sequential: spawn, read, close, status. The read is the one
    /// suspension point; a concurrent [`release`](Self::release) unblocks it
    /// and the capture comes back with whatever bytes had arrived and no
    /// exit code.
    pub async fn run_once(&self, command: &str) -> Result<Capture, ProcessError> {
        let mut cmd = Command::new(&self.shell);
        cmd.arg(self.shell_arg)
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(ProcessError::Spawn)?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Always consume stderr so buffers don't fill; log at debug.
        if let Some(stderr) = stderr {
            let command = command.to_string();
            tokio::spawn(async move {
                let reader = BufReader::new(stderr);
                let mut lines = reader.lines();

                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(command = %command, "stderr: {}", line);
                }
            });
        }

        self.store(child);

        let mut output = Vec::new();
        let read_result = match stdout {
            Some(mut stdout) => stdout.read_to_end(&mut output).await.map(|_| ()),
            None => Ok(()),
        };

        // Take the handle back; `None` means a stop force-closed it mid-read.
        let wait_result = match self.take() {
            Some(mut child) => child.wait().await.map(Some),
            None => Ok(None),
        };

        read_result.map_err(ProcessError::Read)?;
        let status = wait_result.map_err(ProcessError::Wait)?;

        Ok(Capture {
            output,
            exit_code: status.and_then(|s| s.code()),
        })
    }

    /// Close any outstanding handle. Safe to call from any thread and at any
    /// time; a second call is a no-op. Errors from the kill (e.g. the child
    /// already exited) are logged at debug and swallowed, never propagated.
    pub fn release(&self) {
        self.closed.store(true, Ordering::SeqCst);

        let child = self.lock_slot().take();
        if let Some(mut child) = child {
            if let Err(e) = child.start_kill() {
                debug!(error = %e, "ignoring error while closing process handle");
            }
            // Dropping the handle lets the runtime reap the killed process.
        }
    }

    fn store(&self, child: Child) {
        *self.lock_slot() = Some(child);

        // A stop may have run between spawn and store; close the fresh
        // handle right away in that case.
        if self.closed.load(Ordering::SeqCst) {
            self.release();
        }
    }

    fn take(&self) -> Option<Child> {
        self.lock_slot().take()
    }

    fn lock_slot(&self) -> std::sync::MutexGuard<'_, Option<Child>> {
        match self.child_slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}
