//! Background relay of emulator output to the console
//!
//! One reader task per stream feeds a single channel, which merges stdout
//! and stderr the way the emulator's console would. The printer drains the
//! channel for the entire lifetime of the process; end-of-stream is normal
//! completion, and read faults end a reader the same way, silently.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{ChildStderr, ChildStdout};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Forwards every line the emulator writes, on either stream, to stdout
pub struct OutputRelay {
    printer: JoinHandle<()>,
}

impl OutputRelay {
    /// Spawn reader tasks for both streams plus a printer draining them
    pub fn start(stdout: ChildStdout, stderr: ChildStderr) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        spawn_reader(stdout, tx.clone());
        spawn_reader(stderr, tx);

        // The printer ends once both readers hit EOF and drop their senders.
        let printer = tokio::spawn(async move {
            while let Some(line) = rx.recv().await {
                println!("{line}");
            }
        });

        Self { printer }
    }

    /// Wait up to `grace` for the relay to drain, aborting it after that
    pub async fn join(mut self, grace: Duration) {
        if tokio::time::timeout(grace, &mut self.printer).await.is_err() {
            tracing::debug!("output relay did not drain within grace period, aborting it");
            self.printer.abort();
        }
    }

    /// Stop relaying immediately
    pub fn abort(&self) {
        self.printer.abort();
    }
}

fn spawn_reader<R>(stream: R, tx: mpsc::UnboundedSender<String>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();
        // A read error ends the relay the same way EOF does.
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
}
