use super::*;
use serde_json::{from_reader, to_writer_pretty};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// On-disk representation of a network: its configuration plus the three weight
/// matrices as nested row vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableRecurrentNetwork {
    pub config: NetworkConfig,
    pub input_weights: Vec<Vec<f64>>,
    pub recurrent_weights: Vec<Vec<f64>>,
    pub output_weights: Vec<Vec<f64>>,
}

impl SerializableRecurrentNetwork {
    pub fn from_network(network: &RecurrentNetwork) -> Self {
        Self {
            config: network.config().clone(),
            input_weights: network.weights(Weight::Input).to_rows(),
            recurrent_weights: network.weights(Weight::Recurrent).to_rows(),
            output_weights: network.weights(Weight::Output).to_rows(),
        }
    }

    /// Rebuilds the network, checking every matrix against the stored configuration.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If a matrix is ragged or does not fit the configuration
    /// - `RnnError::ConfigurationError` - If the stored configuration is invalid
    pub fn into_network(self) -> Result<RecurrentNetwork> {
        RecurrentNetwork::from_weights(
            self.config,
            Matrix::from_rows(self.input_weights)?,
            Matrix::from_rows(self.recurrent_weights)?,
            Matrix::from_rows(self.output_weights)?,
        )
    }
}

impl RecurrentNetwork {
    /// Saves the configuration and weights to a JSON file.
    ///
    /// The backend is not stored; a loaded network uses `CpuBackend` until
    /// `set_backend` is called.
    ///
    /// # Errors
    ///
    /// - `RnnError::Io` - If the file cannot be created or written
    /// - `RnnError::Json` - If serialization fails
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        to_writer_pretty(&mut writer, &SerializableRecurrentNetwork::from_network(self))?;

        writer.flush()?;
        Ok(())
    }

    /// Loads a network previously written by `save_to_path`.
    ///
    /// # Errors
    ///
    /// - `RnnError::Io` - If the file cannot be opened
    /// - `RnnError::Json` - If the file is not a valid network description
    /// - `RnnError::DimensionMismatch` - If the stored weights do not fit the stored dimensions
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let serializable: SerializableRecurrentNetwork = from_reader(reader)?;
        serializable.into_network()
    }
}
