//! Default values shared by the CLI definition and validation.

/// Sliding window length handed to the classifier, in frames.
pub const DEFAULT_WINDOW_FRAMES: usize = 24;

/// Flattened landmark width: 21 points x 3 coordinates x 2 hands.
pub const DEFAULT_FEATURE_WIDTH: usize = crate::landmarks::FEATURE_WIDTH;

/// Prediction history length for the majority vote.
pub const DEFAULT_STABILITY_QUEUE: usize = 5;

/// Minimum confidence admitted into the vote window.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Frame cadence for the live loop, in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Frame channel capacity between the producer and the pipeline worker.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Run budget before a hard stop (ten minutes).
pub const DEFAULT_MAX_RUN_MS: u64 = 600_000;

/// Quiet period before a stable label is announced.
pub const DEFAULT_ANNOUNCE_DEBOUNCE_MS: u64 = 800;

/// Upper bound on `--max-run-ms` (one hour).
pub const MAX_RUN_HARD_LIMIT_MS: u64 = 3_600_000;
