//! Progress reporting capability
//!
//! The suite depends on this abstractly so drivers can announce what they are
//! about to time without owning any output channel. The default sink forwards
//! to `tracing` with structured fields; tests plug in the null sink.

/// Structured progress sink: one call per benchmark stage.
pub trait Progress {
    /// Announce a stage about to run, with its unit count and repetitions.
    fn stage(&self, test: &str, size: u64, reps: u64);

    /// Free-form status message (setup phases, array allocation).
    fn note(&self, message: &str);
}

/// Default sink: structured `tracing` events.
#[derive(Debug, Default)]
pub struct TracingProgress;

impl Progress for TracingProgress {
    fn stage(&self, test: &str, size: u64, reps: u64) {
        tracing::info!(test, size, reps, "running benchmark");
    }

    fn note(&self, message: &str) {
        tracing::debug!("{}", message);
    }
}

/// Silent sink for tests.
#[derive(Debug, Default)]
pub struct NullProgress;

impl Progress for NullProgress {
    fn stage(&self, _test: &str, _size: u64, _reps: u64) {}

    fn note(&self, _message: &str) {}
}
