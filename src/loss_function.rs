use crate::error::{Result, RnnError};
use crate::sequence::Sequence;

/// Probabilities are floored at this value before the logarithm so that a zero
/// probability gives a large finite loss instead of `-inf`/`NaN`.
const PROBABILITY_FLOOR: f64 = f64::MIN_POSITIVE;

/// Cross entropy between a sequence of predicted distributions and a sequence of
/// expected (usually one-hot) distributions.
///
/// The per-step loss is `-dot(expected_t, ln(actual_t))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossEntropy;

impl CrossEntropy {
    pub fn new() -> Self {
        Self
    }

    /// Sum of the per-step losses over the whole sequence.
    ///
    /// # Errors
    ///
    /// - `RnnError::SequenceError` - If the sequences differ in length
    /// - `RnnError::DimensionMismatch` - If a pair of steps differs in dimension
    pub fn total_loss(&self, actual: &Sequence, expected: &Sequence) -> Result<f64> {
        if actual.len() != expected.len() {
            return Err(RnnError::sequence(format!(
                "Cannot compute loss: actual output has {} steps, expected output has {}",
                actual.len(),
                expected.len()
            )));
        }

        let mut loss = 0.0;
        for (a, e) in actual.iter().zip(expected.iter()) {
            let log_probabilities = a.map(|p| p.max(PROBABILITY_FLOOR).ln());
            loss -= e.dot(&log_probabilities)?;
        }
        Ok(loss)
    }

    /// Mean per-step loss, `(1/T) · Σ_t -dot(expected_t, ln(actual_t))`.
    ///
    /// Empty sequences have zero loss.
    pub fn sequence_loss(&self, actual: &Sequence, expected: &Sequence) -> Result<f64> {
        if actual.is_empty() && expected.is_empty() {
            return Ok(0.0);
        }
        let total = self.total_loss(actual, expected)?;
        Ok(total / actual.len() as f64)
    }

    /// Batch loss: summed total loss divided by the summed number of timesteps.
    ///
    /// This weights long sequences more heavily than a mean of per-sequence means
    /// would. An empty batch (or one made only of empty sequences) has zero loss.
    ///
    /// # Errors
    ///
    /// - `RnnError::SequenceError` - If the two lists differ in length or any pair differs in length
    pub fn batch_loss(&self, actual: &[Sequence], expected: &[Sequence]) -> Result<f64> {
        if actual.len() != expected.len() {
            return Err(RnnError::sequence(format!(
                "Cannot compute batch loss: {} outputs for {} expected outputs",
                actual.len(),
                expected.len()
            )));
        }

        let mut loss = 0.0;
        let mut timesteps = 0usize;
        for (a, e) in actual.iter().zip(expected.iter()) {
            loss += self.total_loss(a, e)?;
            timesteps += a.len();
        }
        if timesteps == 0 {
            return Ok(0.0);
        }
        Ok(loss / timesteps as f64)
    }
}
