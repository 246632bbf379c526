//! Command-line parsing and validation helpers.

mod defaults;
#[cfg(test)]
mod tests;
mod validation;

use clap::Parser;
use std::path::PathBuf;

pub use defaults::{
    DEFAULT_ANNOUNCE_DEBOUNCE_MS, DEFAULT_CHANNEL_CAPACITY, DEFAULT_CONFIDENCE_THRESHOLD,
    DEFAULT_FEATURE_WIDTH, DEFAULT_MAX_RUN_MS, DEFAULT_STABILITY_QUEUE, DEFAULT_TICK_INTERVAL_MS,
    DEFAULT_WINDOW_FRAMES, MAX_RUN_HARD_LIMIT_MS,
};

/// CLI options for the signpipe recognizer. Validated values keep the live
/// loop and its worker threads inside sane bounds.
#[derive(Debug, Parser, Clone)]
#[command(about = "Sign-language frame pipeline", author, version)]
pub struct AppConfig {
    /// Sliding window length handed to the classifier (frames)
    #[arg(long = "window-frames", default_value_t = DEFAULT_WINDOW_FRAMES)]
    pub window_frames: usize,

    /// Flattened feature vector width per frame
    #[arg(long = "feature-width", default_value_t = DEFAULT_FEATURE_WIDTH)]
    pub feature_width: usize,

    /// Prediction history length for the majority vote
    #[arg(long = "stability-queue", default_value_t = DEFAULT_STABILITY_QUEUE)]
    pub stability_queue: usize,

    /// Minimum confidence admitted into the vote window
    #[arg(
        long = "confidence-threshold",
        default_value_t = DEFAULT_CONFIDENCE_THRESHOLD
    )]
    pub confidence_threshold: f32,

    /// Frame cadence for the live loop (milliseconds)
    #[arg(long = "tick-interval-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    pub tick_interval_ms: u64,

    /// Frame channel capacity between the producer and the pipeline worker
    #[arg(long = "channel-capacity", default_value_t = DEFAULT_CHANNEL_CAPACITY)]
    pub channel_capacity: usize,

    /// Maximum run duration before a hard stop (milliseconds)
    #[arg(long = "max-run-ms", default_value_t = DEFAULT_MAX_RUN_MS)]
    pub max_run_ms: u64,

    /// Quiet period before a stable label is announced (milliseconds)
    #[arg(
        long = "announce-debounce-ms",
        default_value_t = DEFAULT_ANNOUNCE_DEBOUNCE_MS
    )]
    pub announce_debounce_ms: u64,

    /// Label catalog file (.json or .yaml); built-in demo labels when omitted
    #[arg(long)]
    pub labels: Option<PathBuf>,

    /// Print the resolved label catalog and exit
    #[arg(long = "list-labels", default_value_t = false)]
    pub list_labels: bool,

    /// Run a live threaded session instead of the offline demo
    #[arg(long, default_value_t = false)]
    pub live: bool,

    /// Mirror results to stdout as newline-delimited JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Announce stable labels through the debounced announcer
    #[arg(long, default_value_t = false)]
    pub announce: bool,

    /// Enable file logging (debug)
    #[arg(long = "logs", env = "SIGNPIPE_LOGS", default_value_t = false)]
    pub logs: bool,

    /// Disable all file logging (overrides --logs and log env vars)
    #[arg(long = "no-logs", env = "SIGNPIPE_NO_LOGS", default_value_t = false)]
    pub no_logs: bool,

    /// Enable verbose timing logs
    #[arg(long)]
    pub log_timings: bool,
}

/// Tunable parameters for the frame window + stabilizer pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub window_frames: usize,
    pub feature_width: usize,
    pub stability_queue: usize,
    pub confidence_threshold: f32,
    pub tick_interval_ms: u64,
    pub channel_capacity: usize,
    pub max_run_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window_frames: DEFAULT_WINDOW_FRAMES,
            feature_width: DEFAULT_FEATURE_WIDTH,
            stability_queue: DEFAULT_STABILITY_QUEUE,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            max_run_ms: DEFAULT_MAX_RUN_MS,
        }
    }
}
