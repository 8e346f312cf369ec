use std::io::Write;
use std::path::PathBuf;

use spades_core::analysis::TrumpExposure;
use spades_core::deal::{DealRequest, SpadeConstraint, deal};
use spades_core::tally::{ExposureGrid, ExposureKey, TrumpTally};
use tracing::{debug, info};

use super::{RunOptions, RunSummary, RunnerError, TrialPool};
use crate::report::exposure_line;
use crate::store;

/// Every (hearts, spades) combination, in reporting order: hearts 1..=13, and for each
/// heart count every spade count that still fits followed by the unconstrained case.
pub fn exposure_keys() -> Vec<ExposureKey> {
    let mut keys = Vec::new();
    for hearts in 1..=13u8 {
        for spades in 0..=(13 - hearts) {
            keys.push(ExposureKey::new(hearts, SpadeConstraint::Count(spades)));
        }
        keys.push(ExposureKey::new(hearts, SpadeConstraint::Free));
    }
    keys
}

/// Estimates how often `Me`'s heart honors can be ruffed.
pub struct ExposureRunner {
    options: RunOptions,
    state_path: PathBuf,
}

impl ExposureRunner {
    pub fn new(options: RunOptions, state_path: impl Into<PathBuf>) -> Self {
        Self {
            options,
            state_path: state_path.into(),
        }
    }

    /// Runs (or just prints) the whole grid, writing one result line per combination to `out`.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<(ExposureGrid, RunSummary), RunnerError> {
        let mut grid: ExposureGrid = store::load_or_default(&self.state_path);
        let keys = exposure_keys();
        let prior = grid
            .get(&ExposureKey::new(1, SpadeConstraint::Free))
            .map_or(0, |tally| tally.iterations);

        if self.options.show_only {
            writeln!(out, "Ran {prior} iterations:")?;
            for key in &keys {
                let tally = grid.get(key).copied().unwrap_or_default();
                writeln!(out, "{}", exposure_line(key, &tally))?;
            }
            return Ok((grid, RunSummary::default()));
        }

        let iterations = self.options.iterations;
        let mut pool = TrialPool::new(self.options.threads, self.options.seed)?;
        info!(
            iterations,
            prior,
            threads = pool.threads(),
            path = %self.state_path.display(),
            "starting trump exposure grid"
        );
        writeln!(
            out,
            "Running {iterations} iterations and combining with {prior} previously run:"
        )?;

        let mut summary = RunSummary::default();
        for key in &keys {
            let request = DealRequest::unconstrained()
                .with_heart_count(key.hearts)
                .with_spades(key.spades);
            let batch: TrumpTally = pool.run(iterations, |rng, tally: &mut TrumpTally| {
                let deal = deal(&request, rng)?;
                debug!(hearts = key.hearts, spades = %key.spades, "dealt\n{deal}");
                tally.record(TrumpExposure::evaluate(&deal));
                Ok(())
            })?;

            grid.add(*key, &batch);
            summary.combinations += 1;
            summary.trials_run += batch.iterations;

            let merged = grid.get(key).copied().unwrap_or_default();
            writeln!(out, "{}", exposure_line(key, &merged))?;
            store::save(&self.state_path, &grid)?;
            info!(
                hearts = key.hearts,
                spades = %key.spades,
                total = merged.iterations,
                "combination checkpointed"
            );
        }

        Ok((grid, summary))
    }
}
