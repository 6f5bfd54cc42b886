use super::*;
use rayon::prelude::*;

/// Default number of matrix elements below which `ParallelBackend` falls back to
/// the sequential product. Small products lose more to task scheduling than they gain.
pub const PARALLEL_MULTIPLY_THRESHOLD: usize = 4096;

/// A strategy for the matrix products used by the network's forward and backward passes.
///
/// Implementations must be synchronous and return results numerically equal (within
/// floating-point tolerance) to the reference `Matrix::multiply_vector` /
/// `Matrix::multiply`, including the same `DimensionMismatch` failures. The network
/// selects one backend at construction time and never names a concrete type.
pub trait MultiplyBackend: fmt::Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Computes `matrix · vector`.
    fn matrix_vector(&self, matrix: &Matrix, vector: &Vector) -> Result<Vector>;

    /// Computes `lhs · rhs`.
    fn matrix_matrix(&self, lhs: &Matrix, rhs: &Matrix) -> Result<Matrix>;
}

/// The reference dense CPU implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuBackend;

impl MultiplyBackend for CpuBackend {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn matrix_vector(&self, matrix: &Matrix, vector: &Vector) -> Result<Vector> {
        matrix.multiply_vector(vector)
    }

    fn matrix_matrix(&self, lhs: &Matrix, rhs: &Matrix) -> Result<Matrix> {
        lhs.multiply(rhs)
    }
}

/// Row-parallel products on the rayon thread pool.
///
/// Each output row is computed independently; products with fewer than
/// `threshold` matrix elements are delegated to `CpuBackend`.
///
/// # Example
/// ```rust
/// use rustyrnn::algebra::{CpuBackend, Matrix, MultiplyBackend, ParallelBackend, Vector};
///
/// let m = Matrix::filled(3, 2, 0.5);
/// let v = Vector::new(vec![1.0, 2.0]);
/// let parallel = ParallelBackend::with_threshold(0);
/// assert_eq!(
///     parallel.matrix_vector(&m, &v).unwrap(),
///     CpuBackend.matrix_vector(&m, &v).unwrap()
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParallelBackend {
    threshold: usize,
}

impl ParallelBackend {
    pub fn new() -> Self {
        Self::with_threshold(PARALLEL_MULTIPLY_THRESHOLD)
    }

    /// Creates a backend that parallelises products of at least `threshold` matrix elements.
    pub fn with_threshold(threshold: usize) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

impl Default for ParallelBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiplyBackend for ParallelBackend {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn matrix_vector(&self, matrix: &Matrix, vector: &Vector) -> Result<Vector> {
        if matrix.len() < self.threshold {
            return CpuBackend.matrix_vector(matrix, vector);
        }
        if matrix.cols() != vector.len() {
            return Err(RnnError::dimension_mismatch(
                "matrix-vector product",
                &[matrix.rows(), matrix.cols()],
                &[vector.len()],
            ));
        }

        let v = vector.as_array();
        let result: Vec<f64> = matrix
            .as_array()
            .axis_iter(Axis(0))
            .into_par_iter()
            .map(|row| row.dot(v))
            .collect();
        Ok(Vector::new(result))
    }

    fn matrix_matrix(&self, lhs: &Matrix, rhs: &Matrix) -> Result<Matrix> {
        if lhs.len() < self.threshold {
            return CpuBackend.matrix_matrix(lhs, rhs);
        }
        if lhs.cols() != rhs.rows() {
            return Err(RnnError::dimension_mismatch(
                "matrix-matrix product",
                &[lhs.rows(), lhs.cols()],
                &[rhs.rows(), rhs.cols()],
            ));
        }

        let right = rhs.as_array();
        let mut result = Array2::<f64>::zeros((lhs.rows(), rhs.cols()));
        Zip::from(result.rows_mut())
            .and(lhs.as_array().rows())
            .par_for_each(|mut out_row, lhs_row| {
                out_row.assign(&lhs_row.dot(right));
            });
        Ok(Matrix::from_array(result))
    }
}
