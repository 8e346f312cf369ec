use std::io::Write;
use std::path::PathBuf;

use spades_core::analysis::{NilRule, simulate_nil};
use spades_core::deal::{DealRequest, deal};
use spades_core::model::card::{Card, cards_to_string, parse_cards};
use spades_core::model::rank::Rank;
use spades_core::tally::{NilGrid, NilTally};
use tracing::{debug, info};

use super::{RunOptions, RunSummary, RunnerError, TrialPool};
use crate::report::nil_line;
use crate::store;

/// Heart holdings worth testing for a nil bid, each sorted ascending.
///
/// The deuce can never win a heart trick, so it is left out. Order: every pair,
/// then every singleton, then triples topped by the ace, then triples topped by the king.
pub fn nil_combinations() -> Vec<Vec<Card>> {
    let hearts: Vec<Card> = Rank::ORDERED
        .iter()
        .skip(1)
        .map(|&rank| Card::heart(rank))
        .collect();
    let ace = Card::heart(Rank::Ace);
    let king = Card::heart(Rank::King);

    let mut combos = Vec::new();
    for (i, &low) in hearts.iter().enumerate() {
        for &high in &hearts[i + 1..] {
            combos.push(vec![low, high]);
        }
    }
    combos.extend(hearts.iter().map(|&card| vec![card]));
    for top in [ace, king] {
        let below: Vec<Card> = hearts
            .iter()
            .copied()
            .filter(|card| card.rank < top.rank)
            .collect();
        for (i, &low) in below.iter().enumerate() {
            for &mid in &below[i + 1..] {
                combos.push(vec![low, mid, top]);
            }
        }
    }
    combos
}

/// Canonical text for a combination given on the command line, e.g. `"kh, jh"` becomes `"JH,KH"`.
fn canonical_combo(text: &str) -> Result<String, RunnerError> {
    let mut cards = parse_cards(text)?;
    cards.sort_by_key(|card| card.id());
    Ok(cards_to_string(&cards))
}

/// Estimates how often each heart holding survives a nil bid.
pub struct NilRunner {
    options: RunOptions,
    rule: NilRule,
    state_path: PathBuf,
    only: Option<String>,
}

impl NilRunner {
    pub fn new(options: RunOptions, rule: NilRule, state_path: impl Into<PathBuf>) -> Self {
        Self {
            options,
            rule,
            state_path: state_path.into(),
            only: None,
        }
    }

    /// Restricts the run to a single combination. Fails if it is not one the grid contains.
    pub fn only(mut self, combo: &str) -> Result<Self, RunnerError> {
        let canonical = canonical_combo(combo)?;
        let known = nil_combinations()
            .iter()
            .any(|cards| cards_to_string(cards) == canonical);
        if !known {
            return Err(RunnerError::UnknownCombo(combo.trim().to_string()));
        }
        self.only = Some(canonical);
        Ok(self)
    }

    /// Tops every selected combination up to `iterations` total trials, writing one line each to `out`.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<(NilGrid, RunSummary), RunnerError> {
        let mut grid: NilGrid = store::load_or_default(&self.state_path);
        let mut pool = if self.options.show_only {
            None
        } else {
            Some(TrialPool::new(self.options.threads, self.options.seed)?)
        };
        info!(
            iterations = self.options.iterations,
            rule = ?self.rule,
            path = %self.state_path.display(),
            show_only = self.options.show_only,
            "starting nil grid"
        );

        let mut summary = RunSummary::default();
        for cards in nil_combinations() {
            let combo = cards_to_string(&cards);
            if self.only.as_deref().is_some_and(|only| only != combo) {
                continue;
            }

            if let Some(pool) = pool.as_mut() {
                let missing = self.options.iterations.saturating_sub(grid.iterations(&combo));
                if missing > 0 {
                    let batch = self.simulate(pool, &cards, missing)?;
                    grid.add(&combo, &batch);
                    summary.combinations += 1;
                    summary.trials_run += batch.iterations;
                    store::save(&self.state_path, &grid)?;
                } else {
                    debug!(combo = %combo, "already at target");
                }
            }

            let tally = grid.get(&combo).copied().unwrap_or_default();
            writeln!(out, "{}", nil_line(&combo, &tally))?;
        }

        Ok((grid, summary))
    }

    fn simulate(
        &self,
        pool: &mut TrialPool,
        cards: &[Card],
        iterations: u64,
    ) -> Result<NilTally, RunnerError> {
        let request = DealRequest::unconstrained()
            .with_hearts(cards)
            .with_spade_count(0);
        let rule = self.rule;
        pool.run(iterations, |rng, tally: &mut NilTally| {
            let deal = deal(&request, rng)?;
            let outcome = simulate_nil(&deal, rule)?;
            debug!("dealt\n{deal}");
            for trick in &outcome.tricks {
                debug!("{trick}");
            }
            tally.record(outcome.covered);
            Ok(())
        })
    }
}
