pub mod classifier;
pub mod config;
pub mod feedback;
pub mod labels;
pub mod landmarks;
pub mod pipeline;
pub mod rate_limit;
pub mod report;

mod logging;
mod telemetry;

pub use logging::{
    crash_log_path, init_logging, install_panic_hook, log_debug, log_file_path, log_panic,
};
pub use pipeline::{start_pipeline_job, PipelineJob, PipelineMessage};
pub use telemetry::init_tracing;
