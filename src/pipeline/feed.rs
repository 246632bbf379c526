use super::runner::FrameSample;
use crossbeam_channel::{Sender, TrySendError};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Producer-side handoff into the pipeline worker.
///
/// A full channel drops the sample and counts it instead of blocking the
/// producer; the count lands in the run metrics as `frames_dropped`.
pub struct FrameFeed {
    sender: Sender<FrameSample>,
    dropped: Arc<AtomicUsize>,
}

impl FrameFeed {
    pub fn new(sender: Sender<FrameSample>, dropped: Arc<AtomicUsize>) -> Self {
        Self { sender, dropped }
    }

    /// Offer one tick sample without blocking. Returns `false` once the
    /// consumer side is gone.
    pub fn offer(&self, sample: FrameSample) -> bool {
        match self.sender.try_send(sample) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }
}
