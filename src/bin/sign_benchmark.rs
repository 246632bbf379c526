use anyhow::{bail, Result};
use clap::Parser;
use signpipe::classifier::{ScriptedClassifier, ScriptedStep};
use signpipe::config::{
    PipelineConfig, DEFAULT_CHANNEL_CAPACITY, DEFAULT_CONFIDENCE_THRESHOLD,
    DEFAULT_FEATURE_WIDTH, DEFAULT_MAX_RUN_MS, DEFAULT_STABILITY_QUEUE, DEFAULT_TICK_INTERVAL_MS,
    DEFAULT_WINDOW_FRAMES,
};
use signpipe::pipeline::{run_offline, FrameSample};

/// How many windows a synthetic sign is held before switching labels.
const HOLD_WINDOWS: usize = 12;

const BENCH_LABELS: [&str; 3] = ["alpha", "beta", "gamma"];

/// Synthetic benchmark harness for the smoothing pipeline.
#[derive(Debug, Parser)]
#[command(about = "Benchmark the window + stabilizer loop with scripted sessions")]
struct Args {
    /// Human-friendly label recorded in the output metrics
    #[arg(long, default_value = "session")]
    label: String,

    /// Number of scripted prediction windows to push through the stabilizer
    #[arg(long, default_value_t = 1_000)]
    windows: usize,

    /// Share of scripted predictions below the confidence gate (percent)
    #[arg(long = "low-confidence-pct", default_value_t = 10)]
    low_confidence_pct: u8,

    #[arg(long = "window-frames", default_value_t = DEFAULT_WINDOW_FRAMES)]
    window_frames: usize,

    #[arg(long = "stability-queue", default_value_t = DEFAULT_STABILITY_QUEUE)]
    stability_queue: usize,

    #[arg(
        long = "confidence-threshold",
        default_value_t = DEFAULT_CONFIDENCE_THRESHOLD
    )]
    confidence_threshold: f32,

    #[arg(long = "tick-interval-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_interval_ms: u64,

    #[arg(long = "max-run-ms", default_value_t = DEFAULT_MAX_RUN_MS)]
    max_run_ms: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    validate(&args)?;
    let cfg = build_pipeline_config(&args);
    let script = synthesize_script(args.windows, args.low_confidence_pct);
    let samples = synthesize_samples(&cfg, script.len());
    let mut classifier = ScriptedClassifier::new(script);
    let run = run_offline(&samples, &cfg, &mut classifier);

    let stable = run.results.iter().filter(|result| result.is_stable).count();
    println!(
        "pipeline_metrics|label={}|ticks={}|windows={}|failures={}|resets={}|stable={}|run_ms={}|stop={}",
        args.label,
        run.metrics.ticks_processed,
        run.metrics.windows_completed,
        run.metrics.classifier_failures,
        run.metrics.gate_resets,
        stable,
        run.metrics.run_ms,
        run.metrics.stop_reason.label()
    );

    Ok(())
}

fn validate(args: &Args) -> Result<()> {
    if args.windows == 0 {
        bail!("--windows must be at least 1");
    }
    if args.low_confidence_pct > 100 {
        bail!(
            "--low-confidence-pct must be between 0 and 100, got {}",
            args.low_confidence_pct
        );
    }
    Ok(())
}

fn build_pipeline_config(args: &Args) -> PipelineConfig {
    PipelineConfig {
        window_frames: args.window_frames,
        feature_width: DEFAULT_FEATURE_WIDTH,
        stability_queue: args.stability_queue,
        confidence_threshold: args.confidence_threshold,
        tick_interval_ms: args.tick_interval_ms,
        channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        max_run_ms: args.max_run_ms,
    }
}

/// Cycle through held signs, sprinkling low-confidence predictions at the
/// requested rate so the gate and reset paths stay on the hot path.
fn synthesize_script(windows: usize, low_confidence_pct: u8) -> Vec<ScriptedStep> {
    let low_every = if low_confidence_pct == 0 {
        usize::MAX
    } else {
        (100 / low_confidence_pct as usize).max(1)
    };
    let mut steps = Vec::with_capacity(windows);
    for index in 0..windows {
        let label = BENCH_LABELS[(index / HOLD_WINDOWS) % BENCH_LABELS.len()];
        if index % low_every == low_every - 1 {
            steps.push(ScriptedStep::predict(label, 0.2));
        } else {
            let confidence = 0.7 + 0.25 * ((index % HOLD_WINDOWS) as f32 / HOLD_WINDOWS as f32);
            steps.push(ScriptedStep::predict(label, confidence));
        }
    }
    steps
}

fn synthesize_samples(cfg: &PipelineConfig, script_len: usize) -> Vec<FrameSample> {
    let total = cfg.window_frames.saturating_sub(1) + script_len;
    (0..total)
        .map(|tick| {
            let value = (tick as f32 * 0.05).sin() * 0.5 + 0.5;
            FrameSample::Features(vec![value; cfg.feature_width])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_args_validate() {
        let args = Args::try_parse_from(["sign_benchmark"]).unwrap();
        validate(&args).expect("defaults should be valid");
    }

    #[test]
    fn rejects_zero_windows() {
        let args = Args::try_parse_from(["sign_benchmark", "--windows", "0"]).unwrap();
        let err = validate(&args).unwrap_err();
        assert!(err.to_string().contains("--windows"));
    }

    #[test]
    fn rejects_percentage_above_hundred() {
        let args =
            Args::try_parse_from(["sign_benchmark", "--low-confidence-pct", "101"]).unwrap();
        let err = validate(&args).unwrap_err();
        assert!(err.to_string().contains("--low-confidence-pct"));
    }

    #[test]
    fn zero_percent_scripts_stay_above_the_gate() {
        let script = synthesize_script(50, 0);
        assert_eq!(script.len(), 50);
        for step in script {
            match step {
                ScriptedStep::Predict(prediction) => assert!(prediction.confidence >= 0.7),
                other => panic!("unexpected step {other:?}"),
            }
        }
    }

    #[test]
    fn script_holds_each_label_before_switching() {
        let script = synthesize_script(HOLD_WINDOWS * 2, 0);
        let labels: Vec<String> = script
            .iter()
            .map(|step| match step {
                ScriptedStep::Predict(prediction) => prediction.label.clone(),
                other => panic!("unexpected step {other:?}"),
            })
            .collect();
        assert!(labels[..HOLD_WINDOWS].iter().all(|label| label == "alpha"));
        assert!(labels[HOLD_WINDOWS..].iter().all(|label| label == "beta"));
    }
}
