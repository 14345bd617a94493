//! Timer - monotonic interval stopwatch
//!
//! One instance measures one interval at a time; nested timing requires
//! separate instances. `stop()` before `start()` yields an interval measured
//! from construction - garbage by contract, not guarded.

use std::time::{Duration, Instant};

/// Interval stopwatch over the monotonic clock.
#[derive(Debug, Clone)]
pub struct Timer {
    start: Instant,
    duration: Duration,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            duration: Duration::ZERO,
        }
    }

    /// Record the start instant, overwriting any previous one.
    #[inline]
    pub fn start(&mut self) {
        self.start = Instant::now();
    }

    /// Record the stop instant and derive the interval duration.
    #[inline]
    pub fn stop(&mut self) {
        self.duration = self.start.elapsed();
    }

    /// Measured interval in nanoseconds.
    #[inline]
    pub fn nanos(&self) -> u64 {
        self.duration.as_nanos() as u64
    }

    /// Measured interval in seconds.
    #[inline]
    pub fn seconds(&self) -> f64 {
        self.duration.as_secs_f64()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measures_elapsed_work() {
        let mut timer = Timer::new();
        timer.start();
        // Spin a little so the interval is non-zero on any clock resolution.
        let mut acc = 0u64;
        for i in 0..100_000u64 {
            acc = acc.wrapping_add(i);
        }
        std::hint::black_box(acc);
        timer.stop();

        assert!(timer.nanos() > 0);
        assert!(timer.seconds() > 0.0);
    }

    #[test]
    fn test_restart_overwrites_previous_interval() {
        let mut timer = Timer::new();

        timer.start();
        let mut acc = 0u64;
        for i in 0..1_000_000u64 {
            acc = acc.wrapping_add(i);
        }
        std::hint::black_box(acc);
        timer.stop();
        let first = timer.nanos();

        timer.start();
        timer.stop();
        let second = timer.nanos();

        assert!(
            second <= first,
            "an immediate stop should not exceed the spun interval ({} vs {})",
            second,
            first
        );
    }

    #[test]
    fn test_duration_zero_before_stop() {
        let timer = Timer::new();
        assert_eq!(timer.nanos(), 0);
    }
}
