//! Outcome counters for simulation runs.
//!
//! Tallies only ever grow: merging adds counts pairwise, so partial results from
//! separate workers or separate runs can be combined in any order.

use crate::analysis::trump::{Honor, TrumpExposure};
use crate::deal::SpadeConstraint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub trait Tally {
    fn merge(&mut self, other: &Self);
}

fn percent(count: u64, iterations: u64) -> Option<f64> {
    if iterations == 0 {
        None
    } else {
        Some(count as f64 * 100.0 / iterations as f64)
    }
}

/// Trials for one (hearts, spades) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrumpTally {
    pub iterations: u64,
    pub aces: u64,
    pub kings: u64,
    pub queens: u64,
    pub jacks: u64,
}

impl TrumpTally {
    pub fn record(&mut self, exposure: TrumpExposure) {
        self.iterations += 1;
        self.aces += u64::from(exposure.ace);
        self.kings += u64::from(exposure.king);
        self.queens += u64::from(exposure.queen);
        self.jacks += u64::from(exposure.jack);
    }

    pub fn trumped(&self, honor: Honor) -> u64 {
        match honor {
            Honor::Ace => self.aces,
            Honor::King => self.kings,
            Honor::Queen => self.queens,
            Honor::Jack => self.jacks,
        }
    }

    pub fn percent(&self, honor: Honor) -> Option<f64> {
        percent(self.trumped(honor), self.iterations)
    }
}

impl Tally for TrumpTally {
    fn merge(&mut self, other: &Self) {
        self.iterations += other.iterations;
        self.aces += other.aces;
        self.kings += other.kings;
        self.queens += other.queens;
        self.jacks += other.jacks;
    }
}

/// Trials for one nil heart combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NilTally {
    pub iterations: u64,
    pub covered: u64,
}

impl NilTally {
    pub fn record(&mut self, covered: bool) {
        self.iterations += 1;
        self.covered += u64::from(covered);
    }

    pub fn percent(&self) -> Option<f64> {
        percent(self.covered, self.iterations)
    }
}

impl Tally for NilTally {
    fn merge(&mut self, other: &Self) {
        self.iterations += other.iterations;
        self.covered += other.covered;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExposureKey {
    pub hearts: u8,
    pub spades: SpadeConstraint,
}

impl ExposureKey {
    pub const fn new(hearts: u8, spades: SpadeConstraint) -> Self {
        Self { hearts, spades }
    }
}

/// On-disk form of one [`ExposureGrid`] cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureRow {
    pub hearts: u8,
    pub spades: SpadeConstraint,
    #[serde(flatten)]
    pub tally: TrumpTally,
}

/// On-disk form of one [`NilGrid`] cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NilRow {
    pub combo: String,
    #[serde(flatten)]
    pub tally: NilTally,
}

/// Trump-exposure tallies keyed by the dealt heart and spade counts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ExposureRow>", into = "Vec<ExposureRow>")]
pub struct ExposureGrid {
    cells: BTreeMap<ExposureKey, TrumpTally>,
}

impl ExposureGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &ExposureKey) -> Option<&TrumpTally> {
        self.cells.get(key)
    }

    pub fn add(&mut self, key: ExposureKey, tally: &TrumpTally) {
        self.cells.entry(key).or_default().merge(tally);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ExposureKey, &TrumpTally)> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Tally for ExposureGrid {
    fn merge(&mut self, other: &Self) {
        for (key, tally) in other.iter() {
            self.add(*key, tally);
        }
    }
}

impl From<Vec<ExposureRow>> for ExposureGrid {
    fn from(rows: Vec<ExposureRow>) -> Self {
        let mut grid = Self::new();
        for row in rows {
            grid.add(ExposureKey::new(row.hearts, row.spades), &row.tally);
        }
        grid
    }
}

impl From<ExposureGrid> for Vec<ExposureRow> {
    fn from(grid: ExposureGrid) -> Self {
        grid.cells
            .into_iter()
            .map(|(key, tally)| ExposureRow {
                hearts: key.hearts,
                spades: key.spades,
                tally,
            })
            .collect()
    }
}

/// Nil tallies keyed by the comma separated heart combination, e.g. `"JH,KH"`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<NilRow>", into = "Vec<NilRow>")]
pub struct NilGrid {
    cells: BTreeMap<String, NilTally>,
}

impl NilGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, combo: &str) -> Option<&NilTally> {
        self.cells.get(combo)
    }

    pub fn iterations(&self, combo: &str) -> u64 {
        self.get(combo).map_or(0, |tally| tally.iterations)
    }

    pub fn add(&mut self, combo: &str, tally: &NilTally) {
        self.cells.entry(combo.to_string()).or_default().merge(tally);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &NilTally)> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Tally for NilGrid {
    fn merge(&mut self, other: &Self) {
        for (combo, tally) in other.iter() {
            self.add(combo, tally);
        }
    }
}

impl From<Vec<NilRow>> for NilGrid {
    fn from(rows: Vec<NilRow>) -> Self {
        let mut grid = Self::new();
        for row in rows {
            grid.add(&row.combo, &row.tally);
        }
        grid
    }
}

impl From<NilGrid> for Vec<NilRow> {
    fn from(grid: NilGrid) -> Self {
        grid.cells
            .into_iter()
            .map(|(combo, tally)| NilRow { combo, tally })
            .collect()
    }
}
