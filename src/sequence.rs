use crate::algebra::Vector;
use crate::error::{Result, RnnError};

/// An ordered, time-indexed list of equally sized vectors.
///
/// A `Sequence` is the unit a recurrent network consumes and produces: element `t`
/// is the input (or output) at timestep `t`. Construction validates that every
/// element has the same dimension; an empty sequence is always valid. Sequences
/// are immutable once built, and `join` produces a new one.
///
/// # Example
/// ```rust
/// use rustyrnn::algebra::Vector;
/// use rustyrnn::sequence::Sequence;
///
/// let a = Sequence::new(vec![Vector::zeros(3), Vector::zeros(3)]).unwrap();
/// let b = Sequence::new(vec![Vector::filled(3, 1.0)]).unwrap();
/// let joined = a.join(&b).unwrap();
/// assert_eq!(joined.len(), 3);
///
/// assert!(Sequence::new(vec![Vector::zeros(3), Vector::zeros(4)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sequence {
    elements: Vec<Vector>,
}

impl Sequence {
    /// Creates a sequence from `elements`.
    ///
    /// # Errors
    ///
    /// - `RnnError::SequenceError` - If the elements do not all have the same length
    pub fn new(elements: Vec<Vector>) -> Result<Self> {
        Self::check_elements(&elements)?;
        Ok(Self { elements })
    }

    /// The empty sequence.
    pub fn empty() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    fn check_elements(elements: &[Vector]) -> Result<()> {
        if let Some(first) = elements.first() {
            let size = first.len();
            if let Some((t, bad)) = elements.iter().enumerate().find(|(_, v)| v.len() != size) {
                return Err(RnnError::sequence(format!(
                    "Invalid sequence: element {} has size {}, expected {}",
                    t,
                    bad.len(),
                    size
                )));
            }
        }
        Ok(())
    }

    /// Returns a new sequence with `other` appended after the elements of `self`.
    ///
    /// # Errors
    ///
    /// - `RnnError::SequenceError` - If the two sequences hold vectors of different sizes
    pub fn join(&self, other: &Sequence) -> Result<Sequence> {
        let mut elements = Vec::with_capacity(self.len() + other.len());
        elements.extend(self.elements.iter().cloned());
        elements.extend(other.elements.iter().cloned());
        Sequence::new(elements)
    }

    /// Number of timesteps.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Size of the element vectors, or `None` for the empty sequence.
    pub fn dimension(&self) -> Option<usize> {
        self.elements.first().map(Vector::len)
    }

    /// The element at timestep `t`.
    pub fn get(&self, t: usize) -> Option<&Vector> {
        self.elements.get(t)
    }

    /// A fresh iterator over the elements; every call starts from timestep 0.
    pub fn iter(&self) -> std::slice::Iter<'_, Vector> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[Vector] {
        &self.elements
    }

    pub fn into_vec(self) -> Vec<Vector> {
        self.elements
    }
}

impl TryFrom<Vec<Vector>> for Sequence {
    type Error = RnnError;

    fn try_from(elements: Vec<Vector>) -> Result<Self> {
        Sequence::new(elements)
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Vector;
    type IntoIter = std::slice::Iter<'a, Vector>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
