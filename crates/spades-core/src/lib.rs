#![deny(warnings)]
pub mod analysis;
pub mod deal;
pub mod model;
pub mod tally;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "spades"
    }

    pub const fn description() -> &'static str {
        "Monte Carlo odds for spades honors and nil bids"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
