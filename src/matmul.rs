//! Dense matrix multiply - naive triple-loop kernel
//!
//! Heap-owned, row-major square matrices sized at runtime, so large benchmark
//! configurations cannot blow the stack. The multiply accumulates into its
//! output without resetting it: repeating the kernel inflates the accumulator
//! on purpose, which keeps every repetition observable to the timing loop.

use crate::rng::XorShift96;

/// Square row-major matrix of `i64` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseMatrix {
    size: usize,
    data: Vec<i64>,
}

impl DenseMatrix {
    /// Create a zeroed `size x size` matrix.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn zeroed(size: usize) -> Self {
        assert!(size > 0, "matrix size must be non-zero");
        Self {
            size,
            data: vec![0i64; size * size],
        }
    }

    /// Create a matrix from row-major values.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != size * size`.
    pub fn from_rows(size: usize, data: Vec<i64>) -> Self {
        assert_eq!(data.len(), size * size, "row-major data length mismatch");
        Self { size, data }
    }

    /// Fill every cell from the generator stream, row-major order.
    pub fn fill_random(&mut self, rng: &mut XorShift96) {
        for cell in &mut self.data {
            *cell = rng.next_long() as i64;
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Value at 0-indexed `(row, col)`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.size + col]
    }
}

/// Accumulate `a x b` into `acc` with the naive triple loop.
///
/// `acc` is deliberately not reset: calling this `reps` times inflates the
/// accumulator across repetitions. Products wrap on overflow (inputs are raw
/// generator words). Complexity O(size^3) per call.
///
/// # Panics
///
/// Panics if the three matrices differ in size.
pub fn multiply_accumulate(a: &DenseMatrix, b: &DenseMatrix, acc: &mut DenseMatrix) {
    let size = a.size;
    assert!(
        b.size == size && acc.size == size,
        "matrix sizes must match: a={}, b={}, acc={}",
        a.size,
        b.size,
        acc.size
    );

    for row in 0..size {
        for col in 0..size {
            let mut cell = acc.data[row * size + col];
            for inner in 0..size {
                cell = cell.wrapping_add(a.data[row * size + inner].wrapping_mul(b.data[inner * size + col]));
            }
            acc.data[row * size + col] = cell;
        }
    }
}
