use super::defaults::MAX_RUN_HARD_LIMIT_MS;
use super::{AppConfig, PipelineConfig};
use anyhow::{bail, Context, Result};
use clap::Parser;

impl AppConfig {
    /// Parse CLI arguments and validate them right away.
    pub fn parse_args() -> Result<Self> {
        let mut config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    /// Check CLI values and normalize paths.
    pub fn validate(&mut self) -> Result<()> {
        if !(1..=240).contains(&self.window_frames) {
            bail!(
                "--window-frames must be between 1 and 240, got {}",
                self.window_frames
            );
        }
        if !(1..=4096).contains(&self.feature_width) {
            bail!(
                "--feature-width must be between 1 and 4096, got {}",
                self.feature_width
            );
        }
        if !(1..=50).contains(&self.stability_queue) {
            bail!(
                "--stability-queue must be between 1 and 50, got {}",
                self.stability_queue
            );
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            bail!(
                "--confidence-threshold must be between 0.0 and 1.0, got {}",
                self.confidence_threshold
            );
        }
        if !(5..=1000).contains(&self.tick_interval_ms) {
            bail!(
                "--tick-interval-ms must be between 5 and 1000, got {}",
                self.tick_interval_ms
            );
        }
        if !(8..=1024).contains(&self.channel_capacity) {
            bail!(
                "--channel-capacity must be between 8 and 1024, got {}",
                self.channel_capacity
            );
        }
        if self.max_run_ms == 0 || self.max_run_ms > MAX_RUN_HARD_LIMIT_MS {
            bail!(
                "--max-run-ms must be between 1 and {MAX_RUN_HARD_LIMIT_MS} ms, got {}",
                self.max_run_ms
            );
        }
        if self.announce_debounce_ms > 10_000 {
            bail!(
                "--announce-debounce-ms must be at most 10000 ms, got {}",
                self.announce_debounce_ms
            );
        }

        // Resolve the label catalog up front so a bad path fails at startup
        // rather than mid-session.
        if let Some(path) = &mut self.labels {
            if !path.exists() {
                bail!("label catalog '{}' does not exist", path.display());
            }
            let canonical = path
                .canonicalize()
                .with_context(|| format!("failed to canonicalize label catalog '{}'", path.display()))?;
            *path = canonical;
        }

        Ok(())
    }

    /// Snapshot the CLI-controlled pipeline settings for downstream consumers.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            window_frames: self.window_frames,
            feature_width: self.feature_width,
            stability_queue: self.stability_queue,
            confidence_threshold: self.confidence_threshold,
            tick_interval_ms: self.tick_interval_ms,
            channel_capacity: self.channel_capacity,
            max_run_ms: self.max_run_ms,
        }
    }
}
