use crate::error::{Result, RnnError};
use crate::sequence::Sequence;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// An input sequence paired with the output sequence the network should produce for it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingPair {
    pub input: Sequence,
    pub expected: Sequence,
}

impl TrainingPair {
    /// Pairs `input` with `expected`.
    ///
    /// # Errors
    ///
    /// - `RnnError::DataSetError` - If the two sequences differ in length
    pub fn new(input: Sequence, expected: Sequence) -> Result<Self> {
        if input.len() != expected.len() {
            return Err(RnnError::DataSetError(format!(
                "input sequence has {} steps but expected output has {}",
                input.len(),
                expected.len()
            )));
        }
        Ok(Self { input, expected })
    }

    /// Number of timesteps.
    pub fn len(&self) -> usize {
        self.input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }
}

/// What to do with the short batch left over when the data set size is not a
/// multiple of the batch size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrailingBatch {
    /// Train on the short batch like any other
    #[default]
    Keep,
    /// Skip it for this epoch
    Drop,
}

/// Source of training pairs for the training loop.
///
/// Implementors supply storage and shuffling; partitioning into minibatches has
/// a default implementation over `pairs`.
pub trait DataSet {
    /// All pairs in their current order.
    fn pairs(&self) -> &[TrainingPair];

    /// Reorders the pairs uniformly at random.
    fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R);

    fn len(&self) -> usize {
        self.pairs().len()
    }

    fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }

    /// Splits the pairs, in order, into batches of `batch_size`.
    ///
    /// The final batch is shorter when the size does not divide evenly; `trailing`
    /// decides whether it is kept. A `batch_size` of zero yields no batches.
    fn minibatches(&self, batch_size: usize, trailing: TrailingBatch) -> Vec<&[TrainingPair]> {
        if batch_size == 0 {
            return Vec::new();
        }
        self.pairs()
            .chunks(batch_size)
            .filter(|batch| trailing == TrailingBatch::Keep || batch.len() == batch_size)
            .collect()
    }

    fn iter(&self) -> std::slice::Iter<'_, TrainingPair> {
        self.pairs().iter()
    }
}

/// In-memory data set of training pairs.
///
/// # Example
/// ```rust
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use rustyrnn::algebra::Vector;
/// use rustyrnn::dataset::{DataSet, SequenceDataSet, TrailingBatch};
/// use rustyrnn::sequence::Sequence;
///
/// let step = |i| Sequence::new(vec![Vector::one_hot(2, i).unwrap()]).unwrap();
/// let mut data = SequenceDataSet::from_sequences(
///     vec![step(0), step(1), step(0)],
///     vec![step(1), step(0), step(1)],
/// )
/// .unwrap();
///
/// data.shuffle(&mut StdRng::seed_from_u64(3));
/// assert_eq!(data.minibatches(2, TrailingBatch::Keep).len(), 2);
/// assert_eq!(data.minibatches(2, TrailingBatch::Drop).len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceDataSet {
    pairs: Vec<TrainingPair>,
}

impl SequenceDataSet {
    pub fn new(pairs: Vec<TrainingPair>) -> Self {
        Self { pairs }
    }

    /// Pairs `inputs[i]` with `expected[i]`.
    ///
    /// # Errors
    ///
    /// - `RnnError::DataSetError` - If the lists differ in length or any pair differs in length
    pub fn from_sequences(inputs: Vec<Sequence>, expected: Vec<Sequence>) -> Result<Self> {
        if inputs.len() != expected.len() {
            return Err(RnnError::DataSetError(format!(
                "{} input sequences but {} expected output sequences",
                inputs.len(),
                expected.len()
            )));
        }
        let pairs = inputs
            .into_iter()
            .zip(expected)
            .map(|(input, expected)| TrainingPair::new(input, expected))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { pairs })
    }

    pub fn push(&mut self, pair: TrainingPair) {
        self.pairs.push(pair);
    }

    /// Total number of timesteps over all pairs.
    pub fn total_timesteps(&self) -> usize {
        self.pairs.iter().map(TrainingPair::len).sum()
    }
}

impl DataSet for SequenceDataSet {
    fn pairs(&self) -> &[TrainingPair] {
        &self.pairs
    }

    fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pairs.shuffle(rng);
    }
}

impl FromIterator<TrainingPair> for SequenceDataSet {
    fn from_iter<I: IntoIterator<Item = TrainingPair>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
