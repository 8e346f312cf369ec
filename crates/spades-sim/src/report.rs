//! Plain-text result lines.

use spades_core::analysis::Honor;
use spades_core::tally::{ExposureKey, NilTally, TrumpTally};

fn percent_cell(tally: &TrumpTally, honor: Honor) -> String {
    match tally.percent(honor) {
        Some(pct) if tally.trumped(honor) > 0 => format!("{pct:6.2} %"),
        _ => "   --   ".to_string(),
    }
}

pub fn exposure_line(key: &ExposureKey, tally: &TrumpTally) -> String {
    format!(
        "Dealt {:2} hearts. Dealt {} spades. Aces can be trumped {} of the time. Kings {} Queens {} Jacks {}",
        key.hearts,
        key.spades,
        percent_cell(tally, Honor::Ace),
        percent_cell(tally, Honor::King),
        percent_cell(tally, Honor::Queen),
        percent_cell(tally, Honor::Jack),
    )
}

pub fn nil_line(combo: &str, tally: &NilTally) -> String {
    match tally.percent() {
        Some(pct) => format!(
            "{} iters, {combo} is covered {pct:.4} %",
            tally.iterations
        ),
        None => format!("0 iters, {combo} has not been simulated"),
    }
}
