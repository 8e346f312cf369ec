//! Deals of four 13-card hands.
//!
//! - `request`: suit-count constraints placed on `Me`.
//! - `dealer`: the constrained random dealer.

mod dealer;
mod request;

pub use dealer::deal;
pub use request::{DealRequest, HeartConstraint, RequestError, SpadeConstraint};

use crate::model::card::Card;
use crate::model::deck::DECK_SIZE;
use crate::model::hand::Hand;
use crate::model::seat::Seat;
use core::fmt;
use thiserror::Error;

pub const HAND_SIZE: usize = 13;

/// A complete deal: four disjoint 13-card hands covering the deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    hands: [Hand; 4],
}

impl Deal {
    pub(crate) fn new_unchecked(hands: [Hand; 4]) -> Self {
        Self { hands }
    }

    /// Builds a deal from explicit hands, checking sizes and that every card appears once.
    pub fn from_hands(hands: [Hand; 4]) -> Result<Self, DealError> {
        let mut seen = [false; DECK_SIZE];
        for seat in Seat::ALL {
            let hand = &hands[seat.index()];
            if hand.len() != HAND_SIZE {
                return Err(DealError::Malformed {
                    reason: format!("{seat} holds {} cards", hand.len()),
                });
            }
            for card in hand.iter() {
                let slot = &mut seen[card.id() as usize];
                if *slot {
                    return Err(DealError::Malformed {
                        reason: format!("{card} appears more than once"),
                    });
                }
                *slot = true;
            }
        }
        Ok(Self { hands })
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn hands(&self) -> &[Hand; 4] {
        &self.hands
    }

    pub fn into_hands(self) -> [Hand; 4] {
        self.hands
    }
}

impl fmt::Display for Deal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for seat in Seat::ALL {
            writeln!(f, "{seat} -> {}", self.hand(seat))?;
        }
        Ok(())
    }
}

/// Failures while building a deal. A failed deal must never be counted as a trial.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DealError {
    #[error("invalid deal request: {0}")]
    InvalidRequest(#[from] RequestError),
    #[error("no room for {card} in {seat}'s hand")]
    Capacity { seat: Seat, card: Card },
    #[error("no other seat has room for {card}")]
    NoRoom { card: Card },
    #[error("{needed} cards needed to fill the hands but {available} remain")]
    PoolMismatch { needed: usize, available: usize },
    #[error("malformed deal: {reason}")]
    Malformed { reason: String },
}
