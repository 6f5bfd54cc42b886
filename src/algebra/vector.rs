use super::*;

/// An ordered, fixed-length array of real numbers.
///
/// The size of a vector never changes after construction. Every binary operation
/// validates the operand sizes and fails with `RnnError::DimensionMismatch` instead
/// of truncating or padding. All operations return new values and leave their
/// operands untouched.
///
/// Equality is exact elementwise comparison. Use it for literal values and
/// add/subtract round trips only; numerically derived results should be
/// compared with a tolerance.
///
/// # Example
/// ```rust
/// use rustyrnn::algebra::Vector;
///
/// let a = Vector::new(vec![1.0, 2.0, 3.0]);
/// let b = Vector::new(vec![0.5, 0.5, 0.5]);
/// let sum = a.add(&b).unwrap();
/// assert_eq!(sum.subtract(&b).unwrap(), a);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vector {
    elements: Array1<f64>,
}

impl Vector {
    /// Creates a vector holding the given elements.
    pub fn new(elements: Vec<f64>) -> Self {
        Self {
            elements: Array1::from(elements),
        }
    }

    /// Wraps an existing ndarray.
    pub fn from_array(elements: Array1<f64>) -> Self {
        Self { elements }
    }

    /// Creates a vector of `size` zeros.
    pub fn zeros(size: usize) -> Self {
        Self {
            elements: Array1::zeros(size),
        }
    }

    /// Creates a vector of `size` elements all equal to `value`.
    pub fn filled(size: usize, value: f64) -> Self {
        Self {
            elements: Array1::from_elem(size, value),
        }
    }

    /// Creates a one-hot vector of length `size` with a 1.0 at `index`.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If `index` is not smaller than `size`
    pub fn one_hot(size: usize, index: usize) -> Result<Self> {
        if index >= size {
            return Err(RnnError::dimension_mismatch("one_hot", &[size], &[index]));
        }
        let mut elements = Array1::zeros(size);
        elements[index] = 1.0;
        Ok(Self { elements })
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the element at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.elements.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.elements.iter()
    }

    /// Borrows the underlying ndarray.
    pub fn as_array(&self) -> &Array1<f64> {
        &self.elements
    }

    pub fn into_array(self) -> Array1<f64> {
        self.elements
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.elements.to_vec()
    }

    /// Elementwise sum.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If the vectors differ in length
    pub fn add(&self, other: &Vector) -> Result<Vector> {
        check_same_shape("vector add", &[self.len()], &[other.len()])?;
        Ok(Vector::from_array(&self.elements + &other.elements))
    }

    /// Elementwise difference `self - other`.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If the vectors differ in length
    pub fn subtract(&self, other: &Vector) -> Result<Vector> {
        check_same_shape("vector subtract", &[self.len()], &[other.len()])?;
        Ok(Vector::from_array(&self.elements - &other.elements))
    }

    /// Multiplies every element by `scalar`.
    pub fn scale(&self, scalar: f64) -> Vector {
        Vector::from_array(&self.elements * scalar)
    }

    /// Inner product.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If the vectors differ in length
    pub fn dot(&self, other: &Vector) -> Result<f64> {
        check_same_shape("vector dot product", &[self.len()], &[other.len()])?;
        Ok(self.elements.dot(&other.elements))
    }

    /// Elementwise (Schur) product.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If the vectors differ in length
    pub fn schur_product(&self, other: &Vector) -> Result<Vector> {
        check_same_shape("vector schur product", &[self.len()], &[other.len()])?;
        Ok(Vector::from_array(&self.elements * &other.elements))
    }

    /// Outer product: an `n x k` matrix with `result[i][j] = self[i] * other[j]`.
    ///
    /// The two vectors may have different lengths.
    pub fn dyadic_product(&self, other: &Vector) -> Matrix {
        Matrix::from_array(Array2::from_shape_fn(
            (self.len(), other.len()),
            |(i, j)| self.elements[i] * other.elements[j],
        ))
    }

    /// Applies `f` to every element.
    pub fn map<F>(&self, f: F) -> Vector
    where
        F: Fn(f64) -> f64,
    {
        Vector::from_array(self.elements.mapv(f))
    }

    /// Sum of all elements.
    pub fn sum(&self) -> f64 {
        self.elements.sum()
    }

    /// Index of the largest element; ties resolve to the first maximum seen.
    ///
    /// Returns `None` for an empty vector.
    pub fn argmax(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &value) in self.elements.iter().enumerate() {
            match best {
                Some((_, max)) if value <= max => {}
                _ => best = Some((i, value)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Largest absolute elementwise difference between two vectors.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If the vectors differ in length
    pub fn max_abs_diff(&self, other: &Vector) -> Result<f64> {
        check_same_shape("vector comparison", &[self.len()], &[other.len()])?;
        Ok(self
            .elements
            .iter()
            .zip(other.elements.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max))
    }
}

impl From<Vec<f64>> for Vector {
    fn from(elements: Vec<f64>) -> Self {
        Vector::new(elements)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{:.6}", value)?;
        }
        write!(f, ")")
    }
}
