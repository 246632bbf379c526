//! Majority-vote smoothing for raw classifier predictions.
//!
//! Keeps the last few confident predictions in a FIFO window and reports the
//! dominant label with an averaged confidence. A single low-confidence
//! admission clears the whole window; stability is re-earned from an empty
//! window after every dropout.

use serde::Serialize;
use std::collections::VecDeque;

/// Label reported while no stable sign has been established.
pub const UNDETERMINED_LABEL: &str = "undetermined";

/// Raw per-window classifier output.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPrediction {
    pub label: String,
    pub confidence: f32,
}

impl RawPrediction {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    /// Zero-confidence placeholder for an explicit no-detection signal.
    pub fn no_detection() -> Self {
        Self {
            label: UNDETERMINED_LABEL.to_string(),
            confidence: 0.0,
        }
    }
}

/// Smoothed view over the recent prediction window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmoothedResult {
    pub label: String,
    pub confidence: f32,
    pub is_stable: bool,
    pub votes: usize,
    pub total: usize,
}

impl SmoothedResult {
    fn undetermined() -> Self {
        Self {
            label: UNDETERMINED_LABEL.to_string(),
            confidence: 0.0,
            is_stable: false,
            votes: 0,
            total: 0,
        }
    }

    /// True when this result came from the low-confidence hard reset.
    pub fn is_reset(&self) -> bool {
        !self.is_stable && self.total == 0 && self.label == UNDETERMINED_LABEL
    }
}

/// Integer ceil(0.6 * n). Float math rounds 0.6 * 5 up to 4.
fn majority_quorum(n: usize) -> usize {
    (3 * n + 4) / 5
}

/// Confidence-gated sliding-window majority vote over classifier output.
pub struct Stabilizer {
    window: VecDeque<RawPrediction>,
    capacity: usize,
    confidence_threshold: f32,
}

impl Stabilizer {
    pub fn new(capacity: usize, confidence_threshold: f32) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
            confidence_threshold,
        }
    }

    /// Admit one raw prediction and return the smoothed view.
    ///
    /// A prediction below the confidence threshold empties the window
    /// entirely (no partial decay) and reports
    /// [`UNDETERMINED_LABEL`] with zero confidence.
    pub fn admit(&mut self, prediction: RawPrediction) -> SmoothedResult {
        if prediction.confidence < self.confidence_threshold {
            self.window.clear();
            return SmoothedResult::undetermined();
        }
        self.window.push_back(prediction);
        if self.window.len() > self.capacity {
            self.window.pop_front();
        }
        self.evaluate()
    }

    /// Recompute the smoothed view without admitting anything.
    ///
    /// Repeated calls return identical results until the next admission.
    /// `None` while the window is empty.
    pub fn current(&self) -> Option<SmoothedResult> {
        if self.window.is_empty() {
            None
        } else {
            Some(self.evaluate())
        }
    }

    /// Drop all admitted predictions.
    pub fn reset(&mut self) {
        self.window.clear();
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    fn evaluate(&self) -> SmoothedResult {
        let total = self.window.len();
        let latest = match self.window.back() {
            Some(entry) => entry,
            None => return SmoothedResult::undetermined(),
        };

        // Below the warm-up quorum the latest admission passes through
        // unsmoothed, flagged unstable.
        if total < majority_quorum(self.capacity) {
            return SmoothedResult {
                label: latest.label.clone(),
                confidence: latest.confidence,
                is_stable: false,
                votes: 0,
                total,
            };
        }

        // Tally recomputed fresh per evaluation, oldest entry first, so the
        // first-seen label wins ties deterministically.
        let mut tally: Vec<(&str, usize, f32)> = Vec::new();
        for entry in &self.window {
            match tally.iter_mut().find(|(label, _, _)| *label == entry.label) {
                Some((_, count, sum)) => {
                    *count += 1;
                    *sum += entry.confidence;
                }
                None => tally.push((entry.label.as_str(), 1, entry.confidence)),
            }
        }

        let mut winner = match tally.first() {
            Some(entry) => entry,
            None => return SmoothedResult::undetermined(),
        };
        for candidate in &tally[1..] {
            if candidate.1 > winner.1 {
                winner = candidate;
            }
        }

        let (label, votes, confidence_sum) = *winner;
        SmoothedResult {
            label: label.to_string(),
            confidence: confidence_sum / votes as f32,
            is_stable: votes >= majority_quorum(total),
            votes,
            total,
        }
    }
}
