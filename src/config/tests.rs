use super::defaults::MAX_RUN_HARD_LIMIT_MS;
use super::AppConfig;
use clap::Parser;
use std::time::{SystemTime, UNIX_EPOCH};
use std::{env, fs, path::PathBuf};

fn temp_labels_file(contents: &str, ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let path = env::temp_dir().join(format!("signpipe_labels_{nanos}.{ext}"));
    fs::write(&path, contents).expect("write temp labels file");
    path
}

#[test]
fn rejects_window_frames_out_of_bounds() {
    let mut cfg = AppConfig::parse_from(["test-app", "--window-frames", "0"]);
    assert!(cfg.validate().is_err());

    let mut cfg = AppConfig::parse_from(["test-app", "--window-frames", "241"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn accepts_window_frames_bounds() {
    let mut cfg = AppConfig::parse_from(["test-app", "--window-frames", "1"]);
    assert!(cfg.validate().is_ok());

    let mut cfg = AppConfig::parse_from(["test-app", "--window-frames", "240"]);
    assert!(cfg.validate().is_ok());
}

#[test]
fn rejects_feature_width_out_of_bounds() {
    let mut cfg = AppConfig::parse_from(["test-app", "--feature-width", "0"]);
    assert!(cfg.validate().is_err());

    let mut cfg = AppConfig::parse_from(["test-app", "--feature-width", "4097"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_stability_queue_out_of_bounds() {
    let mut cfg = AppConfig::parse_from(["test-app", "--stability-queue", "0"]);
    assert!(cfg.validate().is_err());

    let mut cfg = AppConfig::parse_from(["test-app", "--stability-queue", "51"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_confidence_threshold_out_of_bounds() {
    let mut cfg = AppConfig::parse_from(["test-app", "--confidence-threshold=-0.1"]);
    assert!(cfg.validate().is_err());

    let mut cfg = AppConfig::parse_from(["test-app", "--confidence-threshold", "1.1"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn accepts_confidence_threshold_bounds() {
    let mut cfg = AppConfig::parse_from(["test-app", "--confidence-threshold", "0.0"]);
    assert!(cfg.validate().is_ok());

    let mut cfg = AppConfig::parse_from(["test-app", "--confidence-threshold", "1.0"]);
    assert!(cfg.validate().is_ok());
}

#[test]
fn rejects_tick_interval_out_of_bounds() {
    let mut cfg = AppConfig::parse_from(["test-app", "--tick-interval-ms", "4"]);
    assert!(cfg.validate().is_err());

    let mut cfg = AppConfig::parse_from(["test-app", "--tick-interval-ms", "1001"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_channel_capacity_out_of_bounds() {
    let mut cfg = AppConfig::parse_from(["test-app", "--channel-capacity", "7"]);
    assert!(cfg.validate().is_err());

    let mut cfg = AppConfig::parse_from(["test-app", "--channel-capacity", "1025"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_max_run_out_of_bounds() {
    let mut cfg = AppConfig::parse_from(["test-app", "--max-run-ms", "0"]);
    assert!(cfg.validate().is_err());

    let mut cfg = AppConfig::parse_from(["test-app", "--max-run-ms", "3600001"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_announce_debounce_out_of_bounds() {
    let mut cfg = AppConfig::parse_from(["test-app", "--announce-debounce-ms", "10001"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn accepts_zero_announce_debounce() {
    let mut cfg = AppConfig::parse_from(["test-app", "--announce-debounce-ms", "0"]);
    assert!(cfg.validate().is_ok());
}

#[test]
fn accepts_valid_defaults() {
    let mut cfg = AppConfig::parse_from(["test-app"]);
    assert!(cfg.validate().is_ok());
}

#[test]
fn max_run_hard_limit_constant_matches_expectation() {
    assert_eq!(MAX_RUN_HARD_LIMIT_MS, 3_600_000);
}

#[test]
fn rejects_missing_labels_path() {
    let mut cfg = AppConfig::parse_from(["test-app"]);
    cfg.labels = Some(PathBuf::from("/definitely/not/here/labels.json"));
    assert!(cfg.validate().is_err());
}

#[test]
fn canonicalizes_the_labels_path() {
    let path = temp_labels_file(r#"["hello"]"#, "json");
    let mut cfg = AppConfig::parse_from(["test-app"]);
    cfg.labels = Some(path.clone());
    assert!(cfg.validate().is_ok());

    let resolved = cfg.labels.expect("labels path survives validation");
    assert!(resolved.is_absolute());
    let _ = fs::remove_file(&path);
}

#[test]
fn pipeline_config_snapshot_mirrors_flags() {
    let mut cfg = AppConfig::parse_from([
        "test-app",
        "--window-frames",
        "12",
        "--stability-queue",
        "7",
        "--confidence-threshold",
        "0.6",
        "--tick-interval-ms",
        "50",
        "--max-run-ms",
        "5000",
    ]);
    cfg.validate().expect("flags are in range");

    let pipeline = cfg.pipeline_config();
    assert_eq!(pipeline.window_frames, 12);
    assert_eq!(pipeline.stability_queue, 7);
    assert!((pipeline.confidence_threshold - 0.6).abs() < f32::EPSILON);
    assert_eq!(pipeline.tick_interval_ms, 50);
    assert_eq!(pipeline.max_run_ms, 5000);
}
