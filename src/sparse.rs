//! SparseMatrix - row-compressed sparse 2-D integer container
//!
//! This module contains only the sparse matrix data structure and its
//! algebraic operations. The benchmark drivers that exercise it live in the
//! suite module.
//!
//! # Key Design:
//! - Shape is fixed at construction; coordinates are 1-indexed
//! - One `BTreeMap<col, value>` per row: ordered, nnz-proportional row scans
//! - Value 0 is never stored; `set(0, ..)` deletes, `get` on an absent
//!   coordinate returns 0
//!
//! # Complexity:
//! | Operation | Time |
//! |-----------|------|
//! | get / set | O(log row_nnz) |
//! | multiply_vector | O(nnz) |
//! | multiply_matrix | O(nnz(self) x avg_row_nnz(rhs)) |
//!
//! The multiply costs track stored entries, never `rows x cols` - that is the
//! defining property of this engine and what the unit tests pin down.

use std::collections::BTreeMap;
use thiserror::Error;

/// Sparse matrix operation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SparseError {
    #[error("vector length {len} does not match matrix column count {cols}")]
    VectorLengthMismatch { len: usize, cols: usize },

    #[error("cannot multiply {lhs_rows}x{lhs_cols} by {rhs_rows}x{rhs_cols}: inner dimensions differ")]
    DimensionMismatch {
        lhs_rows: usize,
        lhs_cols: usize,
        rhs_rows: usize,
        rhs_cols: usize,
    },
}

/// Row-compressed sparse matrix of `i64` values, 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseMatrix {
    rows: usize,
    cols: usize,
    /// rows[i] maps column -> non-zero value for matrix row i+1.
    row_data: Vec<BTreeMap<usize, i64>>,
    nnz: usize,
}

impl SparseMatrix {
    /// Create an empty `rows x cols` matrix.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "matrix shape must be non-zero");
        Self {
            rows,
            cols,
            row_data: vec![BTreeMap::new(); rows],
            nnz: 0,
        }
    }

    /// Identity matrix of shape `n x n`.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 1..=n {
            m.set(1, i, i);
        }
        m
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of stored non-zero entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.nnz
    }

    #[inline]
    fn check_coords(&self, row: usize, col: usize) {
        assert!(
            row >= 1 && row <= self.rows && col >= 1 && col <= self.cols,
            "coordinates ({}, {}) outside {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
    }

    /// Value at `(row, col)`, or 0 if no entry is stored there.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates fall outside the matrix shape.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.check_coords(row, col);
        self.row_data[row - 1].get(&col).copied().unwrap_or(0)
    }

    /// Insert or overwrite the entry at `(row, col)`.
    ///
    /// Setting 0 deletes any stored entry, so a later `get` returns 0 without
    /// the coordinate occupying storage.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates fall outside the matrix shape.
    pub fn set(&mut self, value: i64, row: usize, col: usize) {
        self.check_coords(row, col);
        let row_map = &mut self.row_data[row - 1];
        if value == 0 {
            if row_map.remove(&col).is_some() {
                self.nnz -= 1;
            }
        } else if row_map.insert(col, value).is_none() {
            self.nnz += 1;
        }
    }

    /// Multiply by a dense vector of length `cols`, producing a dense vector
    /// of length `rows`.
    ///
    /// Only stored entries are visited, so the cost is proportional to the
    /// non-zero count. Products accumulate with wrapping arithmetic (values
    /// are raw generator words in the benchmark drivers).
    pub fn multiply_vector(&self, vec: &[i64]) -> Result<Vec<i64>, SparseError> {
        if vec.len() != self.cols {
            return Err(SparseError::VectorLengthMismatch {
                len: vec.len(),
                cols: self.cols,
            });
        }

        let mut result = vec![0i64; self.rows];
        for (i, row_map) in self.row_data.iter().enumerate() {
            let mut acc = 0i64;
            for (&col, &value) in row_map {
                acc = acc.wrapping_add(value.wrapping_mul(vec[col - 1]));
            }
            result[i] = acc;
        }
        Ok(result)
    }

    /// Multiply by another sparse matrix, producing a `self.rows x rhs.cols`
    /// sparse matrix.
    ///
    /// For each stored entry `(i, k)` of `self` only the stored row `k` of
    /// `rhs` is scanned, so the cost is `nnz(self) x avg_row_nnz(rhs)` and
    /// never the dense product of the dimensions. Accumulations that end up
    /// zero are not stored.
    pub fn multiply_matrix(&self, rhs: &SparseMatrix) -> Result<SparseMatrix, SparseError> {
        if rhs.rows != self.cols {
            return Err(SparseError::DimensionMismatch {
                lhs_rows: self.rows,
                lhs_cols: self.cols,
                rhs_rows: rhs.rows,
                rhs_cols: rhs.cols,
            });
        }

        let mut result = SparseMatrix::new(self.rows, rhs.cols);
        for (i, row_map) in self.row_data.iter().enumerate() {
            let acc = &mut result.row_data[i];
            for (&k, &a) in row_map {
                for (&j, &b) in &rhs.row_data[k - 1] {
                    let cell = acc.entry(j).or_insert(0);
                    *cell = cell.wrapping_add(a.wrapping_mul(b));
                }
            }
            acc.retain(|_, v| *v != 0);
            result.nnz += acc.len();
        }
        Ok(result)
    }

    /// Iterate over stored entries as `(row, col, value)`, row-major.
    pub fn iter_entries(&self) -> impl Iterator<Item = (usize, usize, i64)> + '_ {
        self.row_data
            .iter()
            .enumerate()
            .flat_map(|(i, row_map)| row_map.iter().map(move |(&col, &v)| (i + 1, col, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_absent_returns_zero() {
        let m = SparseMatrix::new(5, 7);
        for row in 1..=5 {
            for col in 1..=7 {
                assert_eq!(m.get(row, col), 0);
            }
        }
        assert_eq!(m.nnz(), 0);
    }

    #[test]
    fn test_set_get_round_trip() {
        let mut m = SparseMatrix::new(4, 4);
        m.set(42, 2, 3);

        assert_eq!(m.get(2, 3), 42);
        assert_eq!(m.nnz(), 1);

        m.set(-7, 2, 3);
        assert_eq!(m.get(2, 3), -7);
        assert_eq!(m.nnz(), 1, "overwrite must not grow nnz");
    }

    #[test]
    fn test_set_zero_deletes_entry() {
        let mut m = SparseMatrix::new(3, 3);
        m.set(5, 1, 1);
        m.set(9, 2, 2);
        assert_eq!(m.nnz(), 2);

        m.set(0, 1, 1);
        assert_eq!(m.get(1, 1), 0);
        assert_eq!(m.nnz(), 1);

        // Setting an absent coordinate to zero is a no-op.
        m.set(0, 3, 3);
        assert_eq!(m.nnz(), 1);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_get_out_of_shape_panics() {
        let m = SparseMatrix::new(2, 2);
        let _ = m.get(3, 1);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_zero_coordinate_panics() {
        let mut m = SparseMatrix::new(2, 2);
        m.set(1, 0, 1);
    }

    #[test]
    fn test_multiply_vector_2x2_law() {
        // Entries (1,1)=3, (2,2)=4 times [1, 2] must give [3, 8].
        let mut m = SparseMatrix::new(2, 2);
        m.set(3, 1, 1);
        m.set(4, 2, 2);

        let r = m.multiply_vector(&[1, 2]).unwrap();
        assert_eq!(r, vec![3, 8]);
    }

    #[test]
    fn test_multiply_vector_length_mismatch() {
        let m = SparseMatrix::new(2, 3);
        let err = m.multiply_vector(&[1, 2]).unwrap_err();
        assert_eq!(err, SparseError::VectorLengthMismatch { len: 2, cols: 3 });
    }

    #[test]
    fn test_multiply_matrix_identity_law() {
        let mut b = SparseMatrix::new(4, 4);
        b.set(3, 1, 2);
        b.set(-5, 2, 4);
        b.set(7, 3, 1);
        b.set(11, 4, 4);

        let id = SparseMatrix::identity(4);
        let product = b.multiply_matrix(&id).unwrap();

        assert_eq!(product, b, "B x I must equal B entry-for-entry");
        assert_eq!(product.nnz(), b.nnz());
    }

    #[test]
    fn test_multiply_matrix_known_product() {
        // [[1, 2], [0, 3]] x [[4, 0], [0, 5]] = [[4, 10], [0, 15]]
        let mut a = SparseMatrix::new(2, 2);
        a.set(1, 1, 1);
        a.set(2, 1, 2);
        a.set(3, 2, 2);

        let mut b = SparseMatrix::new(2, 2);
        b.set(4, 1, 1);
        b.set(5, 2, 2);

        let c = a.multiply_matrix(&b).unwrap();
        assert_eq!(c.get(1, 1), 4);
        assert_eq!(c.get(1, 2), 10);
        assert_eq!(c.get(2, 1), 0);
        assert_eq!(c.get(2, 2), 15);
        assert_eq!(c.nnz(), 3);
    }

    #[test]
    fn test_multiply_matrix_cancellation_not_stored() {
        // Row [1, 1] times columns that sum to zero: the accumulated cell is
        // exactly zero and must not occupy storage.
        let mut a = SparseMatrix::new(1, 2);
        a.set(1, 1, 1);
        a.set(1, 1, 2);

        let mut b = SparseMatrix::new(2, 1);
        b.set(6, 1, 1);
        b.set(-6, 2, 1);

        let c = a.multiply_matrix(&b).unwrap();
        assert_eq!(c.get(1, 1), 0);
        assert_eq!(c.nnz(), 0);
    }

    #[test]
    fn test_multiply_matrix_dimension_mismatch() {
        let a = SparseMatrix::new(2, 3);
        let b = SparseMatrix::new(2, 2);
        let err = a.multiply_matrix(&b).unwrap_err();
        assert_eq!(
            err,
            SparseError::DimensionMismatch {
                lhs_rows: 2,
                lhs_cols: 3,
                rhs_rows: 2,
                rhs_cols: 2,
            }
        );
    }

    #[test]
    fn test_iter_entries_row_major() {
        let mut m = SparseMatrix::new(3, 3);
        m.set(9, 2, 3);
        m.set(1, 1, 1);
        m.set(4, 2, 1);

        let entries: Vec<_> = m.iter_entries().collect();
        assert_eq!(entries, vec![(1, 1, 1), (2, 1, 4), (2, 3, 9)]);
    }
}
