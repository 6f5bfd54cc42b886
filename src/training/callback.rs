use super::*;

/// Hook run before every epoch with read access to the network.
///
/// Callbacks are for diagnostics such as sampling a generated sequence; they
/// cannot change the network and training does not depend on them. Any
/// `FnMut(usize, &RecurrentNetwork)` closure is a callback.
pub trait EpochCallback {
    /// Called with the zero-based index of the epoch about to start.
    fn on_epoch_start(&mut self, epoch: usize, network: &RecurrentNetwork);
}

impl<F> EpochCallback for F
where
    F: FnMut(usize, &RecurrentNetwork),
{
    fn on_epoch_start(&mut self, epoch: usize, network: &RecurrentNetwork) {
        self(epoch, network)
    }
}

/// Logs a sequence generated from a fixed seed at the start of every epoch.
#[derive(Debug, Clone)]
pub struct GenerateSample {
    seed: Sequence,
    total_length: usize,
}

impl GenerateSample {
    pub fn new(seed: Sequence, total_length: usize) -> Self {
        Self { seed, total_length }
    }
}

impl EpochCallback for GenerateSample {
    fn on_epoch_start(&mut self, epoch: usize, network: &RecurrentNetwork) {
        match network.generate(&self.seed, self.total_length) {
            Ok(sample) => {
                let indices: Vec<usize> = sample.iter().filter_map(Vector::argmax).collect();
                info!(epoch, sample = ?indices, "generated sample");
            }
            Err(e) => warn!(epoch, error = %e, "sample generation failed"),
        }
    }
}
