use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters shared by both ends of an upstream response channel.
#[derive(Debug, Default)]
pub struct ChannelMetrics {
    sent_batches: AtomicU64,
    sent_frames: AtomicU64,
    received_batches: AtomicU64,
    received_frames: AtomicU64,
    backpressure_events: AtomicU64,
    rejected_sends: AtomicU64,
}

/// Point-in-time copy of [`ChannelMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChannelSnapshot {
    pub sent_batches: u64,
    pub sent_frames: u64,
    pub received_batches: u64,
    pub received_frames: u64,
    pub backpressure_events: u64,
    pub rejected_sends: u64,
}

impl ChannelMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on_send_success(&self, frames: u64) {
        self.sent_batches.fetch_add(1, Ordering::Relaxed);
        self.sent_frames.fetch_add(frames, Ordering::Relaxed);
    }

    /// `try_send` found the channel full.
    pub fn record_backpressure(&self) {
        self.backpressure_events.fetch_add(1, Ordering::Relaxed);
    }

    /// A send that found the receiving side already gone.
    pub fn record_rejected(&self) {
        self.rejected_sends.fetch_add(1, Ordering::Relaxed);
    }

    pub fn on_receive(&self, frames: u64) {
        self.received_batches.fetch_add(1, Ordering::Relaxed);
        self.received_frames.fetch_add(frames, Ordering::Relaxed);
    }

    pub fn total_sent_batches(&self) -> u64 {
        self.sent_batches.load(Ordering::Relaxed)
    }

    pub fn total_received_batches(&self) -> u64 {
        self.received_batches.load(Ordering::Relaxed)
    }

    pub fn total_received_frames(&self) -> u64 {
        self.received_frames.load(Ordering::Relaxed)
    }

    pub fn rejected_sends(&self) -> u64 {
        self.rejected_sends.load(Ordering::Relaxed)
    }

    /// Batches sent but not yet taken by the receiver.
    pub fn in_flight(&self) -> u64 {
        self.total_sent_batches()
            .saturating_sub(self.total_received_batches())
    }

    pub fn snapshot(&self) -> ChannelSnapshot {
        ChannelSnapshot {
            sent_batches: self.sent_batches.load(Ordering::Relaxed),
            sent_frames: self.sent_frames.load(Ordering::Relaxed),
            received_batches: self.received_batches.load(Ordering::Relaxed),
            received_frames: self.received_frames.load(Ordering::Relaxed),
            backpressure_events: self.backpressure_events.load(Ordering::Relaxed),
            rejected_sends: self.rejected_sends.load(Ordering::Relaxed),
        }
    }
}
