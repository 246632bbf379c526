//! Result and summary rendering for human and JSON consumers.

use signpipe::config::AppConfig;
use signpipe::pipeline::{PipelineMetrics, SmoothedResult};
use signpipe::report::{self, ReportEvent};

pub(crate) fn print_result(config: &AppConfig, result: &SmoothedResult) {
    if config.json {
        report::emit(&ReportEvent::result(result));
        return;
    }
    let marker = if result.is_stable { "*" } else { " " };
    println!(
        "{marker} {:<14} {:>4.2}  votes {}/{}",
        result.label, result.confidence, result.votes, result.total
    );
}

pub(crate) fn print_summary(config: &AppConfig, metrics: &PipelineMetrics, rate_hz: Option<f32>) {
    if config.json {
        report::emit(&ReportEvent::summary(metrics, rate_hz));
        return;
    }
    println!(
        "session: {} ticks, {} windows, {} failures, {} resets, {} dropped in {} ms ({})",
        metrics.ticks_processed,
        metrics.windows_completed,
        metrics.classifier_failures,
        metrics.gate_resets,
        metrics.frames_dropped,
        metrics.run_ms,
        metrics.stop_reason.label()
    );
    if let Some(rate) = rate_hz {
        println!("tick rate: {rate:.1}/s");
    }
}
