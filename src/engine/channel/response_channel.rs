use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::mpsc;
use tracing::debug;

use crate::engine::errors::QueryError;
use crate::engine::frame::QueryResponse;
use crate::shared::config::CONFIG;

use super::metrics::ChannelMetrics;

/// A single delivery on the upstream channel: a response, or the terminal
/// failure of the query. Completion is signalled by dropping every sender.
pub type UpstreamMessage = Result<QueryResponse, QueryError>;

fn frames_of(message: &UpstreamMessage) -> u64 {
    match message {
        Ok(response) => response.frame_count() as u64,
        Err(_) => 0,
    }
}

#[derive(Clone)]
pub struct ResponseSender {
    inner: mpsc::Sender<UpstreamMessage>,
    metrics: Arc<ChannelMetrics>,
}

impl ResponseSender {
    pub async fn send(
        &self,
        response: QueryResponse,
    ) -> Result<(), mpsc::error::SendError<UpstreamMessage>> {
        self.deliver(Ok(response)).await
    }

    /// Ends the query with an error. The sender should be dropped afterwards.
    pub async fn fail(
        &self,
        error: QueryError,
    ) -> Result<(), mpsc::error::SendError<UpstreamMessage>> {
        self.deliver(Err(error)).await
    }

    pub fn try_send(
        &self,
        response: QueryResponse,
    ) -> Result<(), mpsc::error::TrySendError<UpstreamMessage>> {
        let frames = response.frame_count() as u64;
        match self.inner.try_send(Ok(response)) {
            Ok(()) => {
                self.metrics.on_send_success(frames);
                Ok(())
            }
            Err(mpsc::error::TrySendError::Full(message)) => {
                self.metrics.record_backpressure();
                Err(mpsc::error::TrySendError::Full(message))
            }
            Err(mpsc::error::TrySendError::Closed(message)) => {
                self.metrics.record_rejected();
                Err(mpsc::error::TrySendError::Closed(message))
            }
        }
    }

    /// Resolves once the receiving side has been dropped or closed.
    pub async fn closed(&self) {
        self.inner.closed().await
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    pub fn capacity(&self) -> usize {
        self.inner.max_capacity()
    }

    async fn deliver(
        &self,
        message: UpstreamMessage,
    ) -> Result<(), mpsc::error::SendError<UpstreamMessage>> {
        let frames = frames_of(&message);
        match self.inner.send(message).await {
            Ok(()) => {
                self.metrics.on_send_success(frames);
                Ok(())
            }
            Err(err) => {
                debug!(target: "logs_volume::channel", "upstream receiver gone, dropping message");
                self.metrics.record_rejected();
                Err(err)
            }
        }
    }
}

pub struct ResponseReceiver {
    inner: mpsc::Receiver<UpstreamMessage>,
    metrics: Arc<ChannelMetrics>,
}

impl ResponseReceiver {
    pub async fn recv(&mut self) -> Option<UpstreamMessage> {
        let message = self.inner.recv().await?;
        self.metrics.on_receive(frames_of(&message));
        Some(message)
    }

    pub fn poll_recv(&mut self, cx: &mut Context<'_>) -> Poll<Option<UpstreamMessage>> {
        match self.inner.poll_recv(cx) {
            Poll::Ready(Some(message)) => {
                self.metrics.on_receive(frames_of(&message));
                Poll::Ready(Some(message))
            }
            other => other,
        }
    }

    pub fn close(&mut self) {
        self.inner.close();
    }
}

pub struct ResponseChannel;

impl ResponseChannel {
    pub fn bounded(
        capacity: usize,
        metrics: Arc<ChannelMetrics>,
    ) -> (ResponseSender, ResponseReceiver) {
        let (tx, rx) = mpsc::channel(capacity.max(1));

        (
            ResponseSender {
                inner: tx,
                metrics: Arc::clone(&metrics),
            },
            ResponseReceiver { inner: rx, metrics },
        )
    }

    /// Bounded channel sized from `volume.upstream_capacity`.
    pub fn with_default_capacity(
        metrics: Arc<ChannelMetrics>,
    ) -> (ResponseSender, ResponseReceiver) {
        Self::bounded(CONFIG.volume.upstream_capacity, metrics)
    }
}
