//! JSON event output for machine-readable sessions.
//!
//! With `--json`, the CLI mirrors its results to stdout as newline-delimited
//! JSON so downstream tools can consume them without scraping the human
//! output.

use std::io::{self, Write};

use serde::Serialize;

use crate::pipeline::{PipelineMetrics, SmoothedResult};

/// Events emitted on stdout in `--json` mode.
///
/// Serialized as JSON with an `"event"` tag field for type discrimination.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum ReportEvent {
    /// One smoothed result per completed window.
    #[serde(rename = "result")]
    Result {
        label: String,
        confidence: f32,
        stable: bool,
        votes: usize,
        total: usize,
    },

    /// A label cleared the announcer's dedup and debounce gates.
    #[serde(rename = "announcement")]
    Announcement { label: String },

    /// Final run accounting, emitted once before exit.
    #[serde(rename = "summary")]
    Summary {
        ticks: usize,
        windows: usize,
        no_detection: usize,
        failures: usize,
        resets: usize,
        dropped: usize,
        run_ms: u64,
        stop: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        rate_hz: Option<f32>,
    },
}

impl ReportEvent {
    pub fn result(result: &SmoothedResult) -> Self {
        ReportEvent::Result {
            label: result.label.clone(),
            confidence: result.confidence,
            stable: result.is_stable,
            votes: result.votes,
            total: result.total,
        }
    }

    pub fn summary(metrics: &PipelineMetrics, rate_hz: Option<f32>) -> Self {
        ReportEvent::Summary {
            ticks: metrics.ticks_processed,
            windows: metrics.windows_completed,
            no_detection: metrics.no_detection_ticks,
            failures: metrics.classifier_failures,
            resets: metrics.gate_resets,
            dropped: metrics.frames_dropped,
            run_ms: metrics.run_ms,
            stop: metrics.stop_reason.label().to_string(),
            rate_hz,
        }
    }
}

/// Write one event as a JSON line on stdout. Output errors are ignored; a
/// closed pipe should not take the pipeline down with it.
pub fn emit(event: &ReportEvent) {
    if let Ok(json) = serde_json::to_string(event) {
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{json}");
        let _ = stdout.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::StopReason;

    #[test]
    fn result_events_serialize_with_an_event_tag() {
        let result = SmoothedResult {
            label: "hello".to_string(),
            confidence: 0.85,
            is_stable: true,
            votes: 2,
            total: 3,
        };
        let json = serde_json::to_string(&ReportEvent::result(&result)).unwrap();
        assert!(json.contains(r#""event":"result""#));
        assert!(json.contains(r#""label":"hello""#));
        assert!(json.contains(r#""stable":true"#));
        assert!(json.contains(r#""votes":2"#));
    }

    #[test]
    fn summary_events_carry_the_stop_label() {
        let metrics = PipelineMetrics {
            ticks_processed: 42,
            windows_completed: 19,
            stop_reason: StopReason::ManualStop,
            ..PipelineMetrics::default()
        };
        let json = serde_json::to_string(&ReportEvent::summary(&metrics, None)).unwrap();
        assert!(json.contains(r#""event":"summary""#));
        assert!(json.contains(r#""ticks":42"#));
        assert!(json.contains(r#""stop":"manual_stop""#));
        assert!(!json.contains("rate_hz"));

        let with_rate = serde_json::to_string(&ReportEvent::summary(&metrics, Some(9.8))).unwrap();
        assert!(with_rate.contains(r#""rate_hz":9.8"#));
    }

    #[test]
    fn announcement_events_serialize_the_label() {
        let event = ReportEvent::Announcement {
            label: "thanks".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"event":"announcement","label":"thanks"}"#);
    }
}
