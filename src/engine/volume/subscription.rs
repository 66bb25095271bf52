use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::pipeline::{CancelHandle, LogsVolumeStream, LogsVolumeUpdate};

/// Channel-backed view of a [`LogsVolumeStream`] driven by a background task.
///
/// Unsubscribing or dropping the subscription cancels the stream through its
/// [`CancelHandle`], so the upstream is released before the call returns. The
/// task is aborted as well and stops on its own when the receiver side closes.
pub struct LogsVolumeSubscription {
    receiver: mpsc::Receiver<LogsVolumeUpdate>,
    cancel: CancelHandle,
    task: Option<JoinHandle<()>>,
}

impl LogsVolumeSubscription {
    /// Spawns the driver on the current tokio runtime.
    pub fn spawn(stream: LogsVolumeStream, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let cancel = stream.cancel_handle();
        let task = tokio::spawn(forward(stream, tx));
        Self {
            receiver: rx,
            cancel,
            task: Some(task),
        }
    }

    pub async fn recv(&mut self) -> Option<LogsVolumeUpdate> {
        self.receiver.recv().await
    }

    /// Releases the upstream, stops the driver and discards anything already
    /// buffered.
    pub fn unsubscribe(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.receiver.close();
        while self.receiver.try_recv().is_ok() {}
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for LogsVolumeSubscription {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn forward(mut stream: LogsVolumeStream, tx: mpsc::Sender<LogsVolumeUpdate>) {
    loop {
        tokio::select! {
            _ = tx.closed() => {
                stream.unsubscribe();
                debug!(target: "logs_volume::subscription", "subscriber gone, stopping driver");
                return;
            }
            update = stream.recv() => {
                let Some(update) = update else {
                    return;
                };
                if tx.send(update).await.is_err() {
                    stream.unsubscribe();
                    return;
                }
            }
        }
    }
}
