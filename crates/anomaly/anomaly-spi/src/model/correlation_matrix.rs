//! Square correlation matrix over a set of series.

use serde::{Deserialize, Serialize};

use crate::error::{AnomalyError, Result};

const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Square, symmetric matrix of pairwise correlation coefficients.
///
/// Stored row-major. The diagonal is 1.0 and every entry lies in `[-1, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    dim: usize,
    values: Vec<f64>,
}

impl CorrelationMatrix {
    /// Identity matrix of dimension `dim`.
    pub fn identity(dim: usize) -> Self {
        let mut values = vec![0.0; dim * dim];
        for i in 0..dim {
            values[i * dim + i] = 1.0;
        }
        Self { dim, values }
    }

    /// Build a matrix from explicit rows.
    ///
    /// Rejects ragged or non-square input, asymmetric entries, diagonals
    /// other than 1.0 and coefficients outside `[-1, 1]`.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let dim = rows.len();
        let mut values = Vec::with_capacity(dim * dim);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != dim {
                return Err(AnomalyError::invalid_input(format!(
                    "correlation matrix must be square: row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    dim
                )));
            }
            values.extend(row);
        }

        let matrix = Self { dim, values };
        for i in 0..dim {
            let diagonal = matrix.get(i, i);
            if diagonal.is_nan() || (diagonal - 1.0).abs() > SYMMETRY_TOLERANCE {
                return Err(AnomalyError::invalid_input(format!(
                    "correlation matrix diagonal must be 1.0, got {} at ({}, {})",
                    diagonal, i, i
                )));
            }
            for j in (i + 1)..dim {
                let value = matrix.get(i, j);
                if !(-1.0..=1.0).contains(&value) {
                    return Err(AnomalyError::invalid_input(format!(
                        "correlation coefficient {} at ({}, {}) is outside [-1, 1]",
                        value, i, j
                    )));
                }
                let mirrored = matrix.get(j, i);
                if mirrored.is_nan() || (value - mirrored).abs() > SYMMETRY_TOLERANCE {
                    return Err(AnomalyError::invalid_input(format!(
                        "correlation matrix is not symmetric at ({}, {})",
                        i, j
                    )));
                }
            }
        }
        Ok(matrix)
    }

    /// Build a matrix by evaluating `coefficient(i, j)` for every `i < j`.
    ///
    /// The upper triangle is mirrored into the lower triangle.
    pub fn from_fn<F>(dim: usize, mut coefficient: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> Result<f64>,
    {
        let mut matrix = Self::identity(dim);
        for i in 0..dim {
            for j in (i + 1)..dim {
                let value = coefficient(i, j)?.clamp(-1.0, 1.0);
                matrix.values[i * dim + j] = value;
                matrix.values[j * dim + i] = value;
            }
        }
        Ok(matrix)
    }

    /// Number of rows (and columns).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Coefficient at row `i`, column `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.dim && j < self.dim, "index ({}, {}) out of bounds", i, j);
        self.values[i * self.dim + j]
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.dim..(i + 1) * self.dim]
    }
}
