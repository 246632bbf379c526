//! Pipeline tick loop: frame buffering, classification, and smoothing.
//!
//! A single worker owns both the frame window and the stabilizer, so
//! admission order always matches window completion order. Producers hand
//! samples over a bounded channel and never block on a slow consumer.

use super::frame_buffer::FrameWindowBuffer;
use super::meter::{TickCounter, TickMeter};
use super::stabilizer::{RawPrediction, SmoothedResult, Stabilizer};
use crate::classifier::Classifier;
use crate::config::PipelineConfig;
use crate::log_debug;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

/// One capture tick handed to the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameSample {
    /// Flattened landmark features for a tick with at least one hand visible.
    Features(Vec<f32>),
    /// No landmarks this tick. The pipeline skips it and leaves the window
    /// untouched, so a window may span a detection dropout.
    NoDetection,
}

/// Explains why a run ended so perf smoke tests can classify outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    SourceClosed,
    ManualStop,
    MaxDuration,
}

impl StopReason {
    pub fn label(&self) -> &'static str {
        match self {
            StopReason::SourceClosed => "source_closed",
            StopReason::ManualStop => "manual_stop",
            StopReason::MaxDuration => "max_duration",
        }
    }
}

/// Metrics collected during a pipeline run for observability and CI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineMetrics {
    pub ticks_processed: usize,
    pub frames_buffered: usize,
    pub no_detection_ticks: usize,
    pub windows_completed: usize,
    pub classifier_failures: usize,
    pub gate_resets: usize,
    pub frames_dropped: usize,
    pub run_ms: u64,
    pub stop_reason: StopReason,
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self {
            ticks_processed: 0,
            frames_buffered: 0,
            no_detection_ticks: 0,
            windows_completed: 0,
            classifier_failures: 0,
            gate_resets: 0,
            frames_dropped: 0,
            run_ms: 0,
            stop_reason: StopReason::MaxDuration,
        }
    }
}

/// Per-run state machine: window buffer, stabilizer, and counters.
///
/// Shared by the offline harness and the live loop so both admit predictions
/// in identical order.
struct PipelineState {
    buffer: FrameWindowBuffer,
    stabilizer: Stabilizer,
    metrics: PipelineMetrics,
    tick_interval_ms: u64,
}

impl PipelineState {
    fn new(cfg: &PipelineConfig) -> Self {
        Self {
            buffer: FrameWindowBuffer::new(cfg.window_frames),
            stabilizer: Stabilizer::new(cfg.stability_queue, cfg.confidence_threshold),
            metrics: PipelineMetrics::default(),
            tick_interval_ms: cfg.tick_interval_ms,
        }
    }

    /// Process one tick. Returns the smoothed result when a completed window
    /// produced an admission.
    fn on_sample(
        &mut self,
        sample: FrameSample,
        classifier: &mut dyn Classifier,
    ) -> Option<SmoothedResult> {
        self.metrics.ticks_processed += 1;
        let frame = match sample {
            FrameSample::Features(frame) => frame,
            FrameSample::NoDetection => {
                self.metrics.no_detection_ticks += 1;
                return None;
            }
        };
        self.metrics.frames_buffered += 1;
        let window = match self.buffer.push(frame) {
            Some(window) => window,
            None => return None,
        };
        self.metrics.windows_completed += 1;
        let started = Instant::now();
        let outcome = classifier.classify(&window);
        let classify_us = started.elapsed().as_micros() as u64;
        let raw = match outcome {
            Ok(Some(raw)) => raw,
            Ok(None) => RawPrediction::no_detection(),
            Err(err) => {
                self.metrics.classifier_failures += 1;
                tracing::warn!(classify_us, error = %err, "classifier error, tick skipped");
                log_debug(&format!("classifier error, skipping tick: {err:#}"));
                return None;
            }
        };
        tracing::debug!(
            window = self.metrics.windows_completed,
            classify_us,
            "window classified"
        );
        Some(self.admit(raw))
    }

    fn admit(&mut self, raw: RawPrediction) -> SmoothedResult {
        let result = self.stabilizer.admit(raw);
        if result.is_reset() {
            self.metrics.gate_resets += 1;
        }
        result
    }

    /// Advance the synthetic clock by one tick interval.
    fn advance_tick(&mut self) {
        self.metrics.run_ms = self.metrics.run_ms.saturating_add(self.tick_interval_ms);
    }
}

/// Outcome of an offline run: every emitted result plus final metrics.
#[derive(Debug)]
pub struct OfflineRun {
    pub results: Vec<SmoothedResult>,
    pub metrics: PipelineMetrics,
}

/// Drive the pipeline over a prepared sample list with no channels or clocks.
///
/// Each sample counts as one tick interval against the run budget, matching
/// the live loop's synthetic time accounting. Used by the benchmark harness
/// and tests.
pub fn run_offline(
    samples: &[FrameSample],
    cfg: &PipelineConfig,
    classifier: &mut dyn Classifier,
) -> OfflineRun {
    let mut state = PipelineState::new(cfg);
    let mut results = Vec::new();
    let mut stop_reason = StopReason::SourceClosed;

    for sample in samples {
        state.advance_tick();
        if let Some(result) = state.on_sample(sample.clone(), classifier) {
            results.push(result);
        }
        if state.metrics.run_ms >= cfg.max_run_ms {
            stop_reason = StopReason::MaxDuration;
            break;
        }
    }

    let mut metrics = state.metrics;
    metrics.stop_reason = stop_reason;
    OfflineRun { results, metrics }
}

/// Consumer loop owning the window buffer and stabilizer.
///
/// Runs until the producer disconnects, the stop flag is set, or the run
/// budget is exhausted. Classifier failures are logged and the tick skipped;
/// the loop keeps going.
pub fn run_pipeline(
    receiver: &Receiver<FrameSample>,
    cfg: &PipelineConfig,
    classifier: &mut dyn Classifier,
    stop_flag: Option<&Arc<AtomicBool>>,
    dropped: Option<&Arc<AtomicUsize>>,
    meter: Option<TickMeter>,
    mut on_result: impl FnMut(SmoothedResult),
) -> PipelineMetrics {
    let mut state = PipelineState::new(cfg);
    let mut counter = meter.map(TickCounter::new);
    let wait_time = Duration::from_millis(cfg.tick_interval_ms);
    let mut stop_reason = StopReason::MaxDuration;

    while state.metrics.run_ms < cfg.max_run_ms {
        if let Some(flag) = stop_flag {
            if flag.load(Ordering::Relaxed) {
                stop_reason = StopReason::ManualStop;
                break;
            }
        }
        match receiver.recv_timeout(wait_time) {
            Ok(sample) => {
                state.advance_tick();
                if let Some(counter) = counter.as_mut() {
                    counter.mark();
                }
                if let Some(result) = state.on_sample(sample, classifier) {
                    on_result(result);
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                state.advance_tick();
            }
            Err(RecvTimeoutError::Disconnected) => {
                stop_reason = StopReason::SourceClosed;
                break;
            }
        }
    }

    let mut metrics = state.metrics;
    metrics.stop_reason = stop_reason;
    if let Some(dropped) = dropped {
        metrics.frames_dropped = dropped.load(Ordering::Relaxed);
    }
    log_pipeline_metrics(&metrics, classifier.name());
    metrics
}

/// Emit structured metrics for perf smoke consumption.
/// Format: `pipeline_metrics|engine=...|ticks=...|buffered=...|no_detection=...|windows=...|failures=...|resets=...|dropped=...|run_ms=...|stop=...`
pub(crate) fn log_pipeline_metrics(metrics: &PipelineMetrics, engine: &str) {
    tracing::info!(
        engine,
        ticks = metrics.ticks_processed,
        windows = metrics.windows_completed,
        failures = metrics.classifier_failures,
        resets = metrics.gate_resets,
        dropped = metrics.frames_dropped,
        run_ms = metrics.run_ms,
        stop = metrics.stop_reason.label(),
        "pipeline run finished"
    );
    log_debug(&format!(
        "pipeline_metrics|engine={}|ticks={}|buffered={}|no_detection={}|windows={}|failures={}|resets={}|dropped={}|run_ms={}|stop={}",
        engine,
        metrics.ticks_processed,
        metrics.frames_buffered,
        metrics.no_detection_ticks,
        metrics.windows_completed,
        metrics.classifier_failures,
        metrics.gate_resets,
        metrics.frames_dropped,
        metrics.run_ms,
        metrics.stop_reason.label()
    ));
}

/// Handle the host uses to poll the pipeline worker.
pub struct PipelineJob {
    pub receiver: mpsc::Receiver<PipelineMessage>,
    pub handle: Option<thread::JoinHandle<()>>,
    pub stop_flag: Arc<AtomicBool>,
}

impl PipelineJob {
    /// Signal the worker to stop after its current tick.
    pub fn request_stop(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }
}

/// Messages sent from the pipeline worker back to the host.
#[derive(Debug)]
pub enum PipelineMessage {
    Result(SmoothedResult),
    Finished(PipelineMetrics),
}

/// Spawn the pipeline worker thread.
///
/// The worker owns the buffer and stabilizer; results stream back over the
/// returned receiver, ending with a single `Finished` message carrying the
/// run metrics.
pub fn start_pipeline_job(
    cfg: PipelineConfig,
    mut classifier: Box<dyn Classifier + Send>,
    frames: Receiver<FrameSample>,
    dropped: Arc<AtomicUsize>,
    meter: Option<TickMeter>,
) -> PipelineJob {
    let (tx, rx) = mpsc::channel();
    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_flag_clone = stop_flag.clone();

    let handle = thread::spawn(move || {
        let metrics = run_pipeline(
            &frames,
            &cfg,
            classifier.as_mut(),
            Some(&stop_flag_clone),
            Some(&dropped),
            meter,
            |result| {
                let _ = tx.send(PipelineMessage::Result(result));
            },
        );
        let _ = tx.send(PipelineMessage::Finished(metrics));
    });

    PipelineJob {
        receiver: rx,
        handle: Some(handle),
        stop_flag,
    }
}
