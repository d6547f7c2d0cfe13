//! Emulator session management
//!
//! A [`Session`] owns the spawned emulator process for its whole lifetime:
//! the driver side writes scripted commands to the emulator's stdin, while
//! the [`relay::OutputRelay`] drains its output in the background. The two
//! directions never share a stream, so no locking is needed between them.

mod relay;

pub use relay::OutputRelay;

use std::io;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use colored::Colorize;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::process::{Child, ChildStdin, Command};

use crate::common::{Error, Result};
use crate::script::{Script, Step};

/// A live emulator process driven over its stdin
pub struct Session {
    child: Child,
    writer: BufWriter<ChildStdin>,
    relay: OutputRelay,
}

impl Session {
    /// Spawn the emulator with all three standard streams piped
    ///
    /// The relay starts draining output before any command is written, so
    /// the emulator can never block on a full output pipe.
    pub fn spawn(program: &Path, args: &[String]) -> Result<Self> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| Error::spawn(program, e))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Internal("Failed to get emulator stdin".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Internal("Failed to get emulator stdout".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::Internal("Failed to get emulator stderr".to_string()))?;

        let relay = OutputRelay::start(stdout, stderr);

        tracing::debug!(program = %program.display(), "emulator spawned");

        Ok(Self {
            child,
            writer: BufWriter::new(stdin),
            relay,
        })
    }

    /// Write one command line, flush it, then pause for its scripted delay
    ///
    /// The command is echoed to the console with a `>>> ` marker before it
    /// is written. A write or flush failure (typically a broken pipe after
    /// the emulator exited) maps to [`Error::CommandSend`].
    pub async fn send(&mut self, line: &str, delay: Duration) -> Result<()> {
        println!("{} {}", ">>>".cyan().bold(), line);

        self.write_line(line)
            .await
            .map_err(|e| Error::command_send(line, e))?;

        tokio::time::sleep(delay).await;
        Ok(())
    }

    async fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    /// Execute every step of the script in strict order
    pub async fn run(&mut self, script: &Script) -> Result<()> {
        for step in &script.steps {
            match step {
                Step::Send { line, .. } => {
                    self.send(line, step.delay()).await?;
                }
                Step::Wait { secs } => {
                    println!("Waiting for {secs} seconds...");
                    tokio::time::sleep(step.delay()).await;
                }
            }
        }
        Ok(())
    }

    /// Close the emulator's stdin and wind the session down
    ///
    /// Gives the emulator `grace` to exit on its own once its input closes,
    /// killing it after that, then joins the relay under the same bound so
    /// a blocked reader is never leaked.
    pub async fn shutdown(self, grace: Duration) -> Result<()> {
        let Self {
            mut child,
            writer,
            relay,
        } = self;

        // Dropping the writer closes the pipe; a well-behaved emulator
        // treats that as EOF and exits.
        drop(writer);

        match tokio::time::timeout(grace, child.wait()).await {
            Ok(status) => {
                let status = status?;
                tracing::debug!(%status, "emulator exited");
            }
            Err(_) => {
                tracing::warn!("emulator still running after grace period, killing it");
                child.kill().await?;
            }
        }

        relay.join(grace).await;
        Ok(())
    }

    /// Kill the emulator immediately, used when the driver fails mid-script
    ///
    /// Best-effort: the emulator may already be gone, which is exactly the
    /// case that made the driver fail.
    pub async fn terminate(mut self) {
        if let Err(e) = self.child.kill().await {
            tracing::debug!(error = %e, "kill after driver failure");
        }
        self.relay.abort();
    }
}
