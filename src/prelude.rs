pub use crate::activation::Activation;
pub use crate::algebra::{CpuBackend, Matrix, MultiplyBackend, ParallelBackend, Vector};
pub use crate::dataset::{DataSet, SequenceDataSet, TrailingBatch, TrainingPair};
pub use crate::dictionary::{Dictionary, SequenceEncoder};
pub use crate::error::{Result, RnnError};
pub use crate::loss_function::CrossEntropy;
pub use crate::optimizer::{AdaptiveOptimizer, Optimizer, RMSProp, RMSPropConfig};
pub use crate::recurrent_network::{
    FULL_BPTT, ForwardTrace, GradientCheck, GradientCheckReport, Gradients, NetworkConfig,
    RecurrentNetwork, RecurrentNetworkBuilder, Weight,
};
pub use crate::sequence::Sequence;
pub use crate::training::{
    EpochCallback, GenerateSample, Trainer, TrainingConfig, TrainingOutcome, TrainingReport,
};
