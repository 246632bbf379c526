//! Sliding-window smoothing pipeline for per-frame sign predictions.
//!
//! Frames flow landmark features -> window buffer -> classifier ->
//! stabilizer -> consumers. A single worker owns the whole chain; producers
//! and rate-limited side effects live outside it.

mod feed;
mod frame_buffer;
mod meter;
mod runner;
mod stabilizer;

pub use feed::FrameFeed;
pub use frame_buffer::{FrameWindowBuffer, Window};
pub use meter::TickMeter;
pub use runner::{
    run_offline, run_pipeline, start_pipeline_job, FrameSample, OfflineRun, PipelineJob,
    PipelineMessage, PipelineMetrics, StopReason,
};
pub use stabilizer::{RawPrediction, SmoothedResult, Stabilizer, UNDETERMINED_LABEL};
