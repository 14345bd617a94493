//! tierbench - CPU, memory-tier and matrix microbenchmark harness
//!
//! Quantifies raw CPU throughput, memory-hierarchy latency across cache
//! tiers, dense matrix-multiply cost and sparse matrix algebra cost, and
//! emits an ordered JSON report.
//!
//! # Modules
//!
//! - [`rng`] - XorShift96 deterministic generator
//! - [`timer`] - monotonic interval stopwatch
//! - [`sparse`] - row-compressed sparse matrix engine
//! - [`matmul`] - heap-owned dense matrix and naive multiply
//! - [`report`] - ordered benchmark name -> measurement document
//! - [`suite`] - benchmark drivers and run orchestration
//! - [`progress`] - progress-reporting capability
//! - [`config`] - benchmark parameter registry (YAML-loadable)
//! - [`logging`] - tracing subscriber setup

pub mod config;
pub mod logging;
pub mod matmul;
pub mod progress;
pub mod report;
pub mod rng;
pub mod sparse;
pub mod suite;
pub mod timer;

// Convenient re-exports at crate root
pub use config::BenchConfig;
pub use matmul::DenseMatrix;
pub use progress::{NullProgress, Progress, TracingProgress};
pub use report::{BenchmarkResult, ResultReport};
pub use rng::XorShift96;
pub use sparse::{SparseError, SparseMatrix};
pub use suite::{BenchmarkSuite, REPORT_VERSION};
pub use timer::Timer;
