//! Fixed-length sliding window over per-tick feature vectors.

use std::collections::VecDeque;

/// One completed classification window, ordered oldest to newest.
pub type Window = Vec<Vec<f32>>;

/// Strict sliding window over the most recent `window_frames` feature vectors.
///
/// Callers must push vectors of one consistent width; the landmark extractor
/// guarantees [`crate::landmarks::FEATURE_WIDTH`] by construction, so the
/// buffer does not re-validate widths per push.
pub struct FrameWindowBuffer {
    frames: VecDeque<Vec<f32>>,
    window_frames: usize,
}

impl FrameWindowBuffer {
    pub fn new(window_frames: usize) -> Self {
        let window_frames = window_frames.max(1);
        Self {
            frames: VecDeque::with_capacity(window_frames),
            window_frames,
        }
    }

    /// Append a frame, evicting the oldest once the window is full.
    ///
    /// Returns a copy of the full window on the push that fills it and on
    /// every push after that; consecutive windows overlap by all but one
    /// frame.
    pub fn push(&mut self, frame: Vec<f32>) -> Option<Window> {
        self.frames.push_back(frame);
        if self.frames.len() > self.window_frames {
            self.frames.pop_front();
        }
        if self.frames.len() == self.window_frames {
            Some(self.frames.iter().cloned().collect())
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.frames.len() == self.window_frames
    }

    /// Drop all buffered frames; the next window needs a full refill.
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
