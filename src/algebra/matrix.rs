use super::*;
use rand::Rng;
use rand_distr::StandardNormal;

/// A dense two-dimensional array of real numbers with row-major semantics.
///
/// Row and column counts are fixed at construction. Binary operations follow the
/// classical algebra rules and fail with `RnnError::DimensionMismatch` when the
/// operand shapes are incompatible. Apart from the explicit accumulate methods
/// (`add_assign`, `add_dyadic_assign`, `scale_in_place`) every operation returns a
/// new matrix.
///
/// # Example
/// ```rust
/// use rustyrnn::algebra::{Matrix, Vector};
///
/// let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// let v = Vector::new(vec![1.0, 1.0]);
/// assert_eq!(m.multiply_vector(&v).unwrap(), Vector::new(vec![3.0, 7.0]));
/// assert_eq!(m.diagonal().unwrap(), Vector::new(vec![1.0, 4.0]));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix {
    elements: Array2<f64>,
}

impl Matrix {
    /// Wraps an existing ndarray.
    pub fn from_array(elements: Array2<f64>) -> Self {
        Self { elements }
    }

    /// Creates a `rows x cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            elements: Array2::zeros((rows, cols)),
        }
    }

    /// Creates a `rows x cols` matrix with every element equal to `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            elements: Array2::from_elem((rows, cols), value),
        }
    }

    /// Creates the `dimension x dimension` identity matrix.
    pub fn identity(dimension: usize) -> Self {
        Self {
            elements: Array2::eye(dimension),
        }
    }

    /// Creates a matrix whose elements are standard normal samples multiplied by `scale`.
    ///
    /// # Parameters
    ///
    /// - `rows` - Number of rows
    /// - `cols` - Number of columns
    /// - `scale` - Multiplier applied to every N(0, 1) sample
    /// - `rng` - Source of randomness
    pub fn random_normal<R: Rng + ?Sized>(rows: usize, cols: usize, scale: f64, rng: &mut R) -> Self {
        let elements = Array2::from_shape_simple_fn((rows, cols), || {
            let sample: f64 = rng.sample(StandardNormal);
            sample * scale
        });
        Self { elements }
    }

    /// Builds a matrix from a list of rows.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If the rows are not all the same length
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|row| row.len() != n_cols) {
            return Err(RnnError::dimension_mismatch(
                "matrix from rows",
                &[n_rows, n_cols],
                &[n_rows, bad.len()],
            ));
        }
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let elements = Array2::from_shape_vec((n_rows, n_cols), flat).map_err(|_| {
            RnnError::dimension_mismatch("matrix from rows", &[n_rows, n_cols], &[n_rows, n_cols])
        })?;
        Ok(Self { elements })
    }

    /// Copies the matrix out as a list of rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.elements.outer_iter().map(|row| row.to_vec()).collect()
    }

    pub fn rows(&self) -> usize {
        self.elements.nrows()
    }

    pub fn cols(&self) -> usize {
        self.elements.ncols()
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        self.elements.dim()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the element at `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.elements.get((row, col)).copied()
    }

    /// Overwrites the element at `(row, col)`.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If the position lies outside the matrix
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let shape = [self.rows(), self.cols()];
        match self.elements.get_mut((row, col)) {
            Some(element) => {
                *element = value;
                Ok(())
            }
            None => Err(RnnError::dimension_mismatch("matrix set", &shape, &[row, col])),
        }
    }

    /// Iterates the elements in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.elements.iter()
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.elements
    }

    pub(crate) fn as_array_mut(&mut self) -> &mut Array2<f64> {
        &mut self.elements
    }

    pub fn into_array(self) -> Array2<f64> {
        self.elements
    }

    fn shape_slice(&self) -> [usize; 2] {
        [self.rows(), self.cols()]
    }

    /// Elementwise sum.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If the shapes differ
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        check_same_shape("matrix add", &self.shape_slice(), &other.shape_slice())?;
        Ok(Matrix::from_array(&self.elements + &other.elements))
    }

    /// Elementwise difference `self - other`.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If the shapes differ
    pub fn subtract(&self, other: &Matrix) -> Result<Matrix> {
        check_same_shape("matrix subtract", &self.shape_slice(), &other.shape_slice())?;
        Ok(Matrix::from_array(&self.elements - &other.elements))
    }

    /// Multiplies every element by `scalar`.
    pub fn scale(&self, scalar: f64) -> Matrix {
        Matrix::from_array(&self.elements * scalar)
    }

    /// Elementwise (Schur) product.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If the shapes differ
    pub fn schur_product(&self, other: &Matrix) -> Result<Matrix> {
        check_same_shape("matrix schur product", &self.shape_slice(), &other.shape_slice())?;
        Ok(Matrix::from_array(&self.elements * &other.elements))
    }

    /// Matrix-vector product `self · vector`.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If `vector.len() != self.cols()`
    pub fn multiply_vector(&self, vector: &Vector) -> Result<Vector> {
        if self.cols() != vector.len() {
            return Err(RnnError::dimension_mismatch(
                "matrix-vector product",
                &self.shape_slice(),
                &[vector.len()],
            ));
        }
        Ok(Vector::from_array(self.elements.dot(vector.as_array())))
    }

    /// Matrix-matrix product `self · other`.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If `self.cols() != other.rows()`
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols() != other.rows() {
            return Err(RnnError::dimension_mismatch(
                "matrix-matrix product",
                &self.shape_slice(),
                &other.shape_slice(),
            ));
        }
        Ok(Matrix::from_array(self.elements.dot(&other.elements)))
    }

    /// Returns a new matrix with rows and columns swapped.
    pub fn transpose(&self) -> Matrix {
        Matrix::from_array(self.elements.t().to_owned())
    }

    /// Returns the diagonal entries of a square matrix.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If the matrix is not square
    pub fn diagonal(&self) -> Result<Vector> {
        if self.rows() != self.cols() {
            return Err(RnnError::dimension_mismatch(
                "diagonal",
                &self.shape_slice(),
                &[self.rows(), self.rows()],
            ));
        }
        Ok(Vector::from_array(self.elements.diag().to_owned()))
    }

    /// Applies `f` to every element.
    pub fn map<F>(&self, f: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix::from_array(self.elements.mapv(f))
    }

    /// In-place accumulate: `self += other`.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If the shapes differ
    pub fn add_assign(&mut self, other: &Matrix) -> Result<()> {
        check_same_shape("matrix accumulate", &self.shape_slice(), &other.shape_slice())?;
        self.elements += &other.elements;
        Ok(())
    }

    /// In-place accumulate of an outer product: `self[i][j] += left[i] * right[j]`.
    ///
    /// Equivalent to `self.add_assign(&left.dyadic_product(right))` without the
    /// temporary matrix.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If `(left.len(), right.len())` is not the shape of `self`
    pub fn add_dyadic_assign(&mut self, left: &Vector, right: &Vector) -> Result<()> {
        check_same_shape(
            "outer product accumulate",
            &self.shape_slice(),
            &[left.len(), right.len()],
        )?;
        let l = left.as_array();
        let r = right.as_array();
        Zip::indexed(&mut self.elements).for_each(|(i, j), x| *x += l[i] * r[j]);
        Ok(())
    }

    /// In-place scaling by `scalar`.
    pub fn scale_in_place(&mut self, scalar: f64) {
        self.elements.mapv_inplace(|x| x * scalar);
    }

    /// Sets every element to zero, keeping the shape.
    pub fn fill_zero(&mut self) {
        self.elements.fill(0.0);
    }

    /// Largest absolute elementwise difference between two matrices.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If the shapes differ
    pub fn max_abs_diff(&self, other: &Matrix) -> Result<f64> {
        check_same_shape("matrix comparison", &self.shape_slice(), &other.shape_slice())?;
        Ok(Zip::from(&self.elements)
            .and(&other.elements)
            .fold(0.0, |acc, a, b| f64::max(acc, (a - b).abs())))
    }

    /// Row `index` as a vector, or `None` when out of range.
    pub fn row(&self, index: usize) -> Option<Vector> {
        if index >= self.rows() {
            return None;
        }
        Some(Vector::from_array(self.elements.index_axis(Axis(0), index).to_owned()))
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.elements.outer_iter() {
            write!(f, "(")?;
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{:.6}", value)?;
            }
            writeln!(f, ")")?;
        }
        Ok(())
    }
}
