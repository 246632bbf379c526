use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared ticks-per-second gauge for live status output.
///
/// The pipeline worker publishes a new rate once per completed second;
/// readers on other threads see the last published value.
#[derive(Clone, Debug)]
pub struct TickMeter {
    rate_bits: Arc<AtomicU32>,
}

impl TickMeter {
    pub fn new() -> Self {
        Self {
            rate_bits: Arc::new(AtomicU32::new(0f32.to_bits())),
        }
    }

    pub fn set_rate(&self, ticks_per_sec: f32) {
        self.rate_bits.store(ticks_per_sec.to_bits(), Ordering::Relaxed);
    }

    pub fn rate(&self) -> f32 {
        f32::from_bits(self.rate_bits.load(Ordering::Relaxed))
    }
}

impl Default for TickMeter {
    fn default() -> Self {
        Self::new()
    }
}

/// Worker-side counter feeding a [`TickMeter`].
pub(super) struct TickCounter {
    meter: TickMeter,
    window_start: Instant,
    ticks: u32,
}

impl TickCounter {
    pub(super) fn new(meter: TickMeter) -> Self {
        Self {
            meter,
            window_start: Instant::now(),
            ticks: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn for_testing(meter: TickMeter, window_start: Instant) -> Self {
        Self {
            meter,
            window_start,
            ticks: 0,
        }
    }

    /// Count one tick; publishes the rate each time a full second completes.
    pub(super) fn mark(&mut self) {
        self.ticks += 1;
        let elapsed = self.window_start.elapsed();
        if elapsed >= Duration::from_secs(1) {
            self.meter.set_rate(self.ticks as f32 / elapsed.as_secs_f32());
            self.ticks = 0;
            self.window_start = Instant::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_meter_defaults_to_zero() {
        let meter = TickMeter::new();
        assert_eq!(meter.rate(), 0.0);
    }

    #[test]
    fn tick_meter_roundtrips_rates() {
        let meter = TickMeter::new();
        meter.set_rate(9.5);
        assert_eq!(meter.rate(), 9.5);
    }

    #[test]
    fn tick_counter_publishes_after_a_full_second() {
        let meter = TickMeter::new();
        let past = Instant::now()
            .checked_sub(Duration::from_secs(2))
            .expect("clock should allow a 2s rewind");
        let mut counter = TickCounter::for_testing(meter.clone(), past);

        counter.mark();
        let rate = meter.rate();
        assert!(rate > 0.0, "rate should publish once the window is complete");
        assert!(rate < 1.0, "one tick over two seconds is below 1/s, got {rate}");
    }
}
