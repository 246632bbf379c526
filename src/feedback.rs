//! Debounced announcements for stable classifications.
//!
//! Sits between the pipeline and a user-facing sink (speech, stdout, a
//! status line). A held sign produces the same stable result on every tick,
//! so the announcer deduplicates consecutive stable labels and routes new
//! ones through a [`Debouncer`], collapsing rapid label flicker into the
//! final value.

use std::time::Duration;

use crate::pipeline::SmoothedResult;
use crate::rate_limit::Debouncer;

pub struct StableAnnouncer {
    debouncer: Debouncer<String>,
    min_confidence: f32,
    last_announced: Option<String>,
}

impl StableAnnouncer {
    /// `sink` runs on the debounce worker thread once a label survives the
    /// quiet period.
    pub fn new(
        sink: impl FnMut(String) + Send + 'static,
        debounce: Duration,
        min_confidence: f32,
    ) -> Self {
        Self {
            debouncer: Debouncer::new(sink, debounce),
            min_confidence,
            last_announced: None,
        }
    }

    /// Feed one smoothed result.
    ///
    /// Schedules an announcement when the result is stable, strictly above
    /// the confidence floor, and differs from the last announced label. A
    /// hard reset clears the dedup memory, so the same sign announces again
    /// after the hands drop and return.
    pub fn observe(&mut self, result: &SmoothedResult) {
        if result.is_reset() {
            self.last_announced = None;
            return;
        }
        if !result.is_stable || result.confidence <= self.min_confidence {
            return;
        }
        if self.last_announced.as_deref() == Some(result.label.as_str()) {
            return;
        }
        self.debouncer.call(result.label.clone());
        self.last_announced = Some(result.label.clone());
    }

    /// Drop any scheduled announcement without firing it.
    pub fn cancel_pending(&self) {
        self.debouncer.cancel();
    }
}
