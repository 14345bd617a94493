//! BenchmarkSuite - ordered benchmark drivers over one generator stream
//!
//! The suite owns the generator, the memory backing buffer and the progress
//! sink. Drivers run strictly sequentially and all draw from the same stream,
//! so run order determines every test's input data; `run_all` fixes that
//! order once.
//!
//! # Key Design:
//! - Every hot loop escapes its per-iteration result through
//!   `std::hint::black_box`, so an optimizing build cannot elide the work
//! - The memory buffer is allocated once and reused across levels; with
//!   `carry_over` enabled later levels read cells incremented by earlier ones
//! - Drivers return a [`BenchmarkResult`] instead of writing into shared
//!   state; `run_all` inserts them under the registry names

use std::hash::{Hash, Hasher};
use std::hint::black_box;

use rustc_hash::FxHasher;

use crate::config::BenchConfig;
use crate::matmul::{DenseMatrix, multiply_accumulate};
use crate::progress::{Progress, TracingProgress};
use crate::report::{BenchmarkResult, ResultReport};
use crate::rng::XorShift96;
use crate::sparse::{SparseError, SparseMatrix};
use crate::timer::Timer;

/// Stride between consecutive touched indices in the memory test.
pub const OFFSET: usize = 1024;

/// Half the classic C `RAND_MAX`; centering constant for the hash test.
pub const RAND_MAX_HALF: i64 = 1_073_741_823;

/// Report format version.
pub const REPORT_VERSION: &str = "1.0.1";

fn raw_value(rng: &mut XorShift96) -> i64 {
    rng.next_long() as i64
}

fn small_value(rng: &mut XorShift96) -> i64 {
    rng.range(1, 9)
}

/// Benchmark orchestrator: one generator stream, one backing buffer, one
/// progress sink, parameters from [`BenchConfig`].
pub struct BenchmarkSuite {
    config: BenchConfig,
    rng: XorShift96,
    progress: Box<dyn Progress>,
    mem_buf: Vec<i32>,
}

impl BenchmarkSuite {
    pub fn new(config: BenchConfig) -> Self {
        Self::with_progress(config, Box::new(TracingProgress))
    }

    pub fn with_progress(config: BenchConfig, progress: Box<dyn Progress>) -> Self {
        Self {
            config,
            rng: XorShift96::new(),
            progress,
            mem_buf: Vec::new(),
        }
    }

    /// Run every configured benchmark in the fixed registry order, inserting
    /// each result into `report` under its name.
    ///
    /// Order: memory levels, cpu simple / hash / md5, dense stages
    /// (`mmn_s1..`), sparse matrix-matrix stages (`mms_s1..`), sparse
    /// matrix-vector stages (`mvs_s1..`).
    pub fn run_all(&mut self, report: &mut ResultReport) -> Result<(), SparseError> {
        let memory = self.config.memory.clone();
        for level in &memory.levels {
            let result = self.test_mem(&level.tiers, memory.reps);
            report.insert(level.name.clone(), result);
        }

        let cpu = self.config.cpu.clone();
        report.insert("cpu_simple", self.test_cpu_simple(cpu.simple_reps));
        report.insert("cpu_hash", self.test_cpu_hash(cpu.hash_reps));
        report.insert("cpu_md5", self.test_cpu_md5(cpu.md5_reps, cpu.md5_str_len));

        for (i, stage) in self.config.dense.clone().iter().enumerate() {
            let result = self.test_dense_matmul(stage.size, stage.reps);
            report.insert(format!("mmn_s{}", i + 1), result);
        }

        for (i, stage) in self.config.sparse_mat_mat.clone().iter().enumerate() {
            let result =
                self.test_sparse_mat_mat(stage.rows, stage.cols, stage.nnz, stage.reps)?;
            report.insert(format!("mms_s{}", i + 1), result);
        }

        for (i, stage) in self.config.sparse_mat_vec.clone().iter().enumerate() {
            let result =
                self.test_sparse_mat_vec(stage.rows, stage.cols, stage.nnz, stage.reps)?;
            report.insert(format!("mvs_s{}", i + 1), result);
        }

        Ok(())
    }

    /// Sum generator outputs into one register-resident accumulator.
    ///
    /// `reps x rep_unit` iterations total; no memory pressure beyond the
    /// generator state itself.
    pub fn test_cpu_simple(&mut self, reps: u64) -> BenchmarkResult {
        let rep_unit = self.config.rep_unit;
        self.progress.stage("cpu simple", rep_unit, reps);

        let mut timer = Timer::new();
        timer.start();
        let mut sum = 0u64;
        for _ in 0..reps {
            for _ in 0..rep_unit {
                sum = sum.wrapping_add(self.rng.next_long());
            }
        }
        black_box(sum);
        timer.stop();

        BenchmarkResult {
            duration: timer.seconds(),
            size: rep_unit,
            reps,
        }
    }

    /// Hash a centered generator word per iteration, overwriting one slot.
    pub fn test_cpu_hash(&mut self, reps: u64) -> BenchmarkResult {
        let rep_unit = self.config.rep_unit;
        self.progress.stage("cpu hash", rep_unit, reps);

        let mut timer = Timer::new();
        timer.start();
        for _ in 0..reps {
            for _ in 0..rep_unit {
                let value = (self.rng.next_long() as i64).wrapping_sub(RAND_MAX_HALF);
                let mut hasher = FxHasher::default();
                value.hash(&mut hasher);
                black_box(hasher.finish());
            }
        }
        timer.stop();

        BenchmarkResult {
            duration: timer.seconds(),
            size: rep_unit,
            reps,
        }
    }

    /// Digest a fresh random alphanumeric string per iteration.
    ///
    /// `size` reflects total generated characters: `rep_unit x str_len`.
    pub fn test_cpu_md5(&mut self, reps: u64, str_len: u64) -> BenchmarkResult {
        let rep_unit = self.config.rep_unit;
        self.progress.stage("cpu md5", rep_unit, reps);

        let mut timer = Timer::new();
        timer.start();
        for _ in 0..reps {
            for _ in 0..rep_unit {
                black_box(md5::compute(self.rng.random_string(str_len as usize)));
            }
        }
        timer.stop();

        BenchmarkResult {
            duration: timer.seconds(),
            size: rep_unit * str_len,
            reps,
        }
    }

    /// Increment masked cells of the backing buffer, one tier after another.
    ///
    /// Each tier size `s` (power of two) masks the touched span to `s`
    /// elements via `index & (s - 1)`, confining the working set to the cache
    /// level that span fits in. The duration aggregates all tiers; `size` is
    /// the tier count.
    pub fn test_mem(&mut self, tiers: &[usize], reps: u64) -> BenchmarkResult {
        let rep_unit = self.config.rep_unit;
        let needed = self.config.memory.backing_elems.max(self.config.max_tier_elems());
        if self.mem_buf.is_empty() {
            self.progress.note("allocating backing array");
            self.mem_buf = vec![0i32; needed];
        } else if !self.config.memory.carry_over {
            self.mem_buf.fill(0);
        }

        self.progress.stage("mem", tiers.len() as u64, reps);
        let total = (rep_unit * reps) as usize;
        let buf = &mut self.mem_buf;

        let mut timer = Timer::new();
        timer.start();
        for (i, &tier) in tiers.iter().enumerate() {
            self.progress
                .note(&format!("mem tier {}/{}: {} elems", i + 1, tiers.len(), tier));
            let mask = tier - 1;
            for j in 0..total {
                let idx = (j * OFFSET) & mask;
                buf[idx] = buf[idx].wrapping_add(1);
            }
        }
        timer.stop();
        black_box(&*buf);

        BenchmarkResult {
            duration: timer.seconds(),
            size: tiers.len() as u64,
            reps,
        }
    }

    /// Multiply two random dense matrices `reps` times into one accumulator.
    ///
    /// The accumulator is never reset, so every repetition changes it and
    /// stays observable. O(reps x size^3).
    pub fn test_dense_matmul(&mut self, size: usize, reps: u64) -> BenchmarkResult {
        self.progress
            .note(&format!("generating matrices, size={}x{}", size, size));
        let mut a = DenseMatrix::zeroed(size);
        let mut b = DenseMatrix::zeroed(size);
        a.fill_random(&mut self.rng);
        b.fill_random(&mut self.rng);
        let mut acc = DenseMatrix::zeroed(size);

        self.progress.stage("dense matmul", size as u64, reps);
        let mut timer = Timer::new();
        timer.start();
        for _ in 0..reps {
            multiply_accumulate(&a, &b, &mut acc);
        }
        black_box(&acc);
        timer.stop();

        BenchmarkResult {
            duration: timer.seconds(),
            size: size as u64,
            reps,
        }
    }

    /// Time `reps` sparse matrix-vector products, discarding each result.
    ///
    /// The matrix holds exactly `nnz` distinct non-zeros with raw generator
    /// word values; the vector is dense generator output. `size` records the
    /// column count.
    pub fn test_sparse_mat_vec(
        &mut self,
        rows: usize,
        cols: usize,
        nnz: usize,
        reps: u64,
    ) -> Result<BenchmarkResult, SparseError> {
        self.progress
            .note(&format!("generating matrix, size={}x{}", rows, cols));
        let mut mat = SparseMatrix::new(rows, cols);
        self.populate(&mut mat, nnz, raw_value);
        let vec: Vec<i64> = (0..cols).map(|_| self.rng.next_long() as i64).collect();

        self.progress.stage("sparse mat vec", cols as u64, reps);
        let mut timer = Timer::new();
        timer.start();
        for _ in 0..reps {
            black_box(mat.multiply_vector(&vec)?);
        }
        timer.stop();

        Ok(BenchmarkResult {
            duration: timer.seconds(),
            size: cols as u64,
            reps,
        })
    }

    /// Time `reps` sparse matrix-matrix products, discarding each result.
    ///
    /// Two matrices of transposed shapes, each with exactly `nnz` distinct
    /// non-zeros drawn from `range(1, 9)` so products stay small. `size`
    /// records the column count.
    pub fn test_sparse_mat_mat(
        &mut self,
        rows: usize,
        cols: usize,
        nnz: usize,
        reps: u64,
    ) -> Result<BenchmarkResult, SparseError> {
        self.progress
            .note(&format!("generating matrices, size={}x{}", rows, cols));
        let mut a = SparseMatrix::new(rows, cols);
        let mut b = SparseMatrix::new(cols, rows);
        self.populate(&mut a, nnz, small_value);
        self.populate(&mut b, nnz, small_value);

        self.progress.stage("sparse mat mat", cols as u64, reps);
        let mut timer = Timer::new();
        timer.start();
        for _ in 0..reps {
            black_box(a.multiply_matrix(&b)?);
        }
        timer.stop();

        Ok(BenchmarkResult {
            duration: timer.seconds(),
            size: cols as u64,
            reps,
        })
    }

    /// Store exactly `nnz` non-zeros at distinct random coordinates.
    ///
    /// Re-samples a coordinate until it lands on an empty cell. Unbounded
    /// when `nnz` approaches `rows x cols`; callers keep a margin.
    fn populate(
        &mut self,
        mat: &mut SparseMatrix,
        nnz: usize,
        value: fn(&mut XorShift96) -> i64,
    ) {
        for _ in 0..nnz {
            let (row, col) = loop {
                let row = self.rng.range(1, mat.rows() as i64) as usize;
                let col = self.rng.range(1, mat.cols() as i64) as usize;
                if mat.get(row, col) == 0 {
                    break (row, col);
                }
            };
            mat.set(value(&mut self.rng), row, col);
        }
    }

    #[cfg(test)]
    fn mem_buf(&self) -> &[i32] {
        &self.mem_buf
    }
}
