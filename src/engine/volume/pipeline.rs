use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};

use futures::Stream;
use futures::StreamExt;
use futures::stream::FusedStream;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::channel::ResponseReceiver;
use crate::engine::errors::LogsVolumeError;
use crate::engine::frame::DataFrame;
use crate::shared::datetime::TimeRange;

use super::reducer::aggregate_raw_logs_volume;
use super::series::{AggregationResult, Provenance, QueryTarget};

/// Opens the upstream query. Called at most once per subscription, after
/// `Loading` has been handed out.
pub trait QueryIssuer {
    fn issue(self) -> ResponseReceiver;
}

impl<F> QueryIssuer for F
where
    F: FnOnce() -> ResponseReceiver,
{
    fn issue(self) -> ResponseReceiver {
        self()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogsVolumeRequest {
    pub targets: Vec<QueryTarget>,
    pub range: TimeRange,
}

impl LogsVolumeRequest {
    pub fn new(targets: Vec<QueryTarget>, range: TimeRange) -> Self {
        Self { targets, range }
    }

    fn provenance(&self) -> Provenance {
        Provenance {
            targets: self.targets.clone(),
            absolute_range: self.range.absolute(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingState {
    Loading,
    Done,
    Error,
}

/// Lifecycle record published to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum LogsVolumeUpdate {
    Loading,
    Done(AggregationResult),
    Error(LogsVolumeError),
}

impl LogsVolumeUpdate {
    pub fn state(&self) -> LoadingState {
        match self {
            LogsVolumeUpdate::Loading => LoadingState::Loading,
            LogsVolumeUpdate::Done(_) => LoadingState::Done,
            LogsVolumeUpdate::Error(_) => LoadingState::Error,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, LogsVolumeUpdate::Loading)
    }

    pub fn result(&self) -> Option<&AggregationResult> {
        match self {
            LogsVolumeUpdate::Done(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LogsVolumeError> {
        match self {
            LogsVolumeUpdate::Error(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Loading not yet handed out.
    Subscribed,
    Streaming,
    Finished,
}

type BoxedIssuer = Box<dyn FnOnce() -> ResponseReceiver + Send>;

enum Upstream {
    /// Query not issued yet.
    Deferred(BoxedIssuer),
    Open(ResponseReceiver),
    Released,
}

/// Upstream state shared between a stream and its [`CancelHandle`]s.
struct UpstreamSlot {
    upstream: Upstream,
    cancelled: bool,
    /// Task parked on the upstream, woken by `cancel`.
    waker: Option<Waker>,
}

impl UpstreamSlot {
    /// Issues the query if still deferred and returns the open receiver.
    fn open(&mut self) -> Option<&mut ResponseReceiver> {
        let upstream = std::mem::replace(&mut self.upstream, Upstream::Released);
        self.upstream = match upstream {
            Upstream::Deferred(issuer) => {
                debug!(target: "logs_volume::pipeline", "logs volume query issued");
                Upstream::Open(issuer())
            }
            other => other,
        };
        match &mut self.upstream {
            Upstream::Open(receiver) => Some(receiver),
            _ => None,
        }
    }

    fn take(&mut self) -> Upstream {
        std::mem::replace(&mut self.upstream, Upstream::Released)
    }
}

/// Cancels a [`LogsVolumeStream`] from outside the task polling it.
///
/// `cancel` drops the upstream receiver (or the issuer, if the query was
/// never opened) before returning, so the producer sees a closed channel
/// immediately.
#[derive(Clone)]
pub struct CancelHandle {
    slot: Arc<Mutex<UpstreamSlot>>,
}

impl CancelHandle {
    /// Returns `false` when the run was already cancelled.
    pub fn cancel(&self) -> bool {
        let mut slot = self.slot.lock();
        if slot.cancelled {
            return false;
        }
        slot.cancelled = true;
        let released = slot.take();
        let waker = slot.waker.take();
        drop(slot);

        if let Some(waker) = waker {
            waker.wake();
        }
        let was_live = !matches!(released, Upstream::Released);
        drop(released);
        if was_live {
            info!(target: "logs_volume::pipeline", "logs volume query unsubscribed");
        }
        true
    }

    pub fn is_cancelled(&self) -> bool {
        self.slot.lock().cancelled
    }
}

/// One logs volume run. Yields `Loading`, then exactly one of `Done` or
/// `Error`, then ends.
///
/// The query is issued lazily, once `Loading` has been handed out. Dropping
/// the stream, calling [`LogsVolumeStream::unsubscribe`] or cancelling through
/// a [`CancelHandle`] releases the upstream receiver immediately, which the
/// producer observes as a closed channel.
pub struct LogsVolumeStream {
    request: LogsVolumeRequest,
    slot: Arc<Mutex<UpstreamSlot>>,
    frames: Vec<DataFrame>,
    phase: Phase,
}

/// Subscribes to a logs volume query. `Loading` is ready on the first poll,
/// and the upstream query is opened right after it.
pub fn query_logs_volume<Q>(issuer: Q, request: LogsVolumeRequest) -> LogsVolumeStream
where
    Q: QueryIssuer + Send + 'static,
{
    LogsVolumeStream::subscribe(issuer, request)
}

impl LogsVolumeStream {
    pub fn subscribe<Q>(issuer: Q, request: LogsVolumeRequest) -> Self
    where
        Q: QueryIssuer + Send + 'static,
    {
        debug!(
            target: "logs_volume::pipeline",
            targets = request.targets.len(),
            span_ms = request.range.span_ms(),
            "logs volume subscription created"
        );
        let slot = UpstreamSlot {
            upstream: Upstream::Deferred(Box::new(move || issuer.issue())),
            cancelled: false,
            waker: None,
        };
        Self {
            request,
            slot: Arc::new(Mutex::new(slot)),
            frames: Vec::new(),
            phase: Phase::Subscribed,
        }
    }

    /// Next lifecycle record, `None` once finished or unsubscribed.
    pub async fn recv(&mut self) -> Option<LogsVolumeUpdate> {
        self.next().await
    }

    /// Cancels the run. The upstream subscription is released before this
    /// returns and nothing is published afterwards.
    pub fn unsubscribe(&mut self) {
        if self.phase == Phase::Finished {
            return;
        }
        self.cancel_handle().cancel();
        self.frames.clear();
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            slot: Arc::clone(&self.slot),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.slot.lock().cancelled
    }

    pub fn request(&self) -> &LogsVolumeRequest {
        &self.request
    }

    /// Releases the upstream. Returns `false` if the run was cancelled in the
    /// meantime, in which case the terminal update must not be published.
    fn finish(&mut self) -> bool {
        self.phase = Phase::Finished;
        let mut slot = self.slot.lock();
        let released = slot.take();
        let cancelled = slot.cancelled;
        drop(slot);
        drop(released);
        !cancelled
    }

    fn fail(&mut self, err: LogsVolumeError) -> Option<LogsVolumeUpdate> {
        self.frames.clear();
        if !self.finish() {
            return None;
        }
        err.log_error();
        Some(LogsVolumeUpdate::Error(err))
    }

    fn complete(&mut self) -> Option<LogsVolumeUpdate> {
        let frames = std::mem::take(&mut self.frames);
        if !self.finish() {
            return None;
        }
        let series = aggregate_raw_logs_volume(&frames);
        info!(
            target: "logs_volume::pipeline",
            frames = frames.len(),
            series = series.len(),
            "logs volume query completed"
        );
        let result = AggregationResult::new(series, self.request.provenance());
        Some(LogsVolumeUpdate::Done(result))
    }
}

impl Drop for LogsVolumeStream {
    fn drop(&mut self) {
        let released = self.slot.lock().take();
        drop(released);
    }
}

impl Stream for LogsVolumeStream {
    type Item = LogsVolumeUpdate;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if this.phase == Phase::Finished {
                return Poll::Ready(None);
            }

            let mut slot = this.slot.lock();
            if slot.cancelled {
                drop(slot);
                this.phase = Phase::Finished;
                this.frames.clear();
                return Poll::Ready(None);
            }

            if this.phase == Phase::Subscribed {
                drop(slot);
                this.phase = Phase::Streaming;
                return Poll::Ready(Some(LogsVolumeUpdate::Loading));
            }

            let Some(upstream) = slot.open() else {
                drop(slot);
                this.phase = Phase::Finished;
                return Poll::Ready(None);
            };
            let polled = upstream.poll_recv(cx);
            if polled.is_pending() {
                slot.waker = Some(cx.waker().clone());
            }
            drop(slot);

            match polled {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(None) => return Poll::Ready(this.complete()),
                Poll::Ready(Some(Err(err))) => {
                    return Poll::Ready(this.fail(LogsVolumeError::Upstream(err)));
                }
                Poll::Ready(Some(Ok(response))) => {
                    if let Some(err) = response.error {
                        return Poll::Ready(this.fail(LogsVolumeError::EmbeddedBatch(err)));
                    }
                    debug!(
                        target: "logs_volume::pipeline",
                        frames = response.frames.len(),
                        "received upstream batch"
                    );
                    this.frames.extend(response.frames);
                }
            }
        }
    }
}

impl FusedStream for LogsVolumeStream {
    fn is_terminated(&self) -> bool {
        self.phase == Phase::Finished || self.is_cancelled()
    }
}
