//! Pure evaluations of a finished deal.
//!
//! - `trump`: can an opponent ruff one of `Me`'s heart honors.
//! - `nil`: does the partner (or a forced opponent) cover every heart `Me` leads.

pub mod nil;
pub mod trump;

pub use nil::{HeartTrick, NilError, NilOutcome, NilRule, is_nil_covered, simulate_nil};
pub use trump::{Honor, TrumpExposure, can_honor_be_trumped};
