//! Parallel trial batches with deterministic results.
//!
//! A batch is cut into fixed-size chunks. Each chunk draws its own seed from the
//! master RNG before any work starts, so the merged tally depends only on the
//! master seed, never on the thread count or scheduling.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use spades_core::tally::Tally;

use super::RunnerError;

pub const TRIALS_PER_CHUNK: u64 = 512;

pub struct TrialPool {
    pool: ThreadPool,
    master: StdRng,
}

impl TrialPool {
    /// `threads == 0` lets rayon size the pool. Without a seed the master RNG is seeded from entropy.
    pub fn new(threads: usize, seed: Option<u64>) -> Result<Self, RunnerError> {
        let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
        let master = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { pool, master })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Runs `iterations` trials and returns their merged tally.
    ///
    /// The first failing trial aborts the batch; nothing from a failed batch is returned.
    pub fn run<T, F>(&mut self, iterations: u64, trial: F) -> Result<T, RunnerError>
    where
        T: Tally + Default + Send,
        F: Fn(&mut StdRng, &mut T) -> Result<(), RunnerError> + Sync,
    {
        let chunks: Vec<(u64, u64)> = chunk_sizes(iterations)
            .map(|size| (self.master.next_u64(), size))
            .collect();

        let partials = self.pool.install(|| {
            chunks
                .into_par_iter()
                .map(|(seed, size)| {
                    let mut rng = StdRng::seed_from_u64(seed);
                    let mut tally = T::default();
                    for _ in 0..size {
                        trial(&mut rng, &mut tally)?;
                    }
                    Ok(tally)
                })
                .collect::<Result<Vec<T>, RunnerError>>()
        })?;

        let mut total = T::default();
        for partial in &partials {
            total.merge(partial);
        }
        Ok(total)
    }
}

fn chunk_sizes(iterations: u64) -> impl Iterator<Item = u64> {
    let full = iterations / TRIALS_PER_CHUNK;
    let rest = iterations % TRIALS_PER_CHUNK;
    (0..full)
        .map(|_| TRIALS_PER_CHUNK)
        .chain((rest > 0).then_some(rest))
}
