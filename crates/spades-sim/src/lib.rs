//! Monte Carlo drivers for Spades heart-suit questions: how exposed `Me`'s heart
//! honors are to a ruff, and how often a nil bid survives the heart suit.

pub mod config;
pub mod logging;
pub mod report;
pub mod runner;
pub mod store;
