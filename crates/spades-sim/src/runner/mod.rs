//! Experiment drivers: walk a parameter grid, run trial batches, merge them into
//! the persisted tallies and checkpoint after every combination.

mod exposure;
mod nil;
mod pool;

pub use exposure::{ExposureRunner, exposure_keys};
pub use nil::{NilRunner, nil_combinations};
pub use pool::{TRIALS_PER_CHUNK, TrialPool};

use spades_core::analysis::NilError;
use spades_core::deal::DealError;
use spades_core::model::card::ParseCardError;
use thiserror::Error;

use crate::store::StoreError;

/// Settings shared by both drivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// New trials per combination (exposure) or target total per combination (nil).
    pub iterations: u64,
    pub seed: Option<u64>,
    pub threads: usize,
    /// Print stored results without running anything.
    pub show_only: bool,
}

/// Summary details returned after a run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub combinations: usize,
    pub trials_run: u64,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("deal failed: {0}")]
    Deal(#[from] DealError),
    #[error("nil replay failed: {0}")]
    Nil(#[from] NilError),
    #[error("state checkpoint failed: {0}")]
    Store(#[from] StoreError),
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
    #[error("invalid card combination: {0}")]
    Combo(#[from] ParseCardError),
    #[error("{0} is not one of the simulated nil combinations")]
    UnknownCombo(String),
}
