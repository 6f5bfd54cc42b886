/// Dense fixed-size vector of `f64` values
pub mod vector;

/// Dense row-major matrix of `f64` values
pub mod matrix;

/// Interchangeable matrix-multiply strategies (reference CPU and rayon-parallel)
pub mod backend;

pub use backend::*;
pub use matrix::*;
pub use vector::*;

use crate::error::{Result, RnnError};
use ndarray::{Array1, Array2, Axis, Zip};
use std::fmt;

/// Checks that two shapes are identical, reporting `operation` on mismatch.
fn check_same_shape(operation: &'static str, left: &[usize], right: &[usize]) -> Result<()> {
    if left != right {
        return Err(RnnError::dimension_mismatch(operation, left, right));
    }
    Ok(())
}
