use crate::model::card::Card;
use crate::model::deck::SUIT_SIZE;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Which hearts `Me` must hold.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HeartConstraint {
    /// Hearts are shuffled with the rest of the pool.
    #[default]
    Free,
    /// `Me` holds exactly the top `n` hearts.
    Count(u8),
    /// `Me` holds exactly these hearts.
    Exact(Vec<Card>),
}

impl HeartConstraint {
    pub fn forced_count(&self) -> usize {
        match self {
            HeartConstraint::Free => 0,
            HeartConstraint::Count(n) => *n as usize,
            HeartConstraint::Exact(cards) => cards.len(),
        }
    }
}

/// How many spades `Me` must hold.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SpadeConstraint {
    #[default]
    Free,
    Count(u8),
}

impl SpadeConstraint {
    pub fn forced_count(self) -> usize {
        match self {
            SpadeConstraint::Free => 0,
            SpadeConstraint::Count(n) => n as usize,
        }
    }
}

impl fmt::Display for SpadeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpadeConstraint::Free => f.write_str("**"),
            SpadeConstraint::Count(n) => write!(f, "{n:2}"),
        }
    }
}

/// Suit-count constraints placed on `Me` before the rest of the deck is dealt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DealRequest {
    hearts: HeartConstraint,
    spades: SpadeConstraint,
}

impl DealRequest {
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Forces the top `count` hearts onto `Me`, replacing any earlier heart constraint.
    pub fn with_heart_count(mut self, count: u8) -> Self {
        self.hearts = HeartConstraint::Count(count);
        self
    }

    /// Forces exactly `cards` onto `Me`, replacing any earlier heart constraint.
    pub fn with_hearts(mut self, cards: &[Card]) -> Self {
        self.hearts = HeartConstraint::Exact(cards.to_vec());
        self
    }

    pub fn with_spade_count(mut self, count: u8) -> Self {
        self.spades = SpadeConstraint::Count(count);
        self
    }

    pub fn with_spades(mut self, spades: SpadeConstraint) -> Self {
        self.spades = spades;
        self
    }

    pub fn hearts(&self) -> &HeartConstraint {
        &self.hearts
    }

    pub fn spades(&self) -> SpadeConstraint {
        self.spades
    }

    /// Checks the request without dealing anything.
    pub fn validate(&self) -> Result<(), RequestError> {
        match &self.hearts {
            HeartConstraint::Free => {}
            HeartConstraint::Count(n) if *n as usize > SUIT_SIZE => {
                return Err(RequestError::HeartCount(*n));
            }
            HeartConstraint::Count(_) => {}
            HeartConstraint::Exact(cards) => {
                let mut seen = HashSet::with_capacity(cards.len());
                for &card in cards {
                    if !card.is_heart() {
                        return Err(RequestError::NotAHeart(card));
                    }
                    if !seen.insert(card) {
                        return Err(RequestError::DuplicateHeart(card));
                    }
                }
            }
        }

        if let SpadeConstraint::Count(n) = self.spades {
            if n as usize > SUIT_SIZE {
                return Err(RequestError::SpadeCount(n));
            }
        }

        let hearts = self.hearts.forced_count();
        let spades = self.spades.forced_count();
        if hearts + spades > SUIT_SIZE {
            return Err(RequestError::Overfull { hearts, spades });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("cannot force {0} hearts onto one hand")]
    HeartCount(u8),
    #[error("cannot force {0} spades onto one hand")]
    SpadeCount(u8),
    #[error("{0} is not a heart")]
    NotAHeart(Card),
    #[error("{0} requested more than once")]
    DuplicateHeart(Card),
    #[error("{hearts} hearts plus {spades} spades do not fit in a 13 card hand")]
    Overfull { hearts: usize, spades: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn later_heart_constraint_replaces_earlier() {
        let request = DealRequest::unconstrained()
            .with_heart_count(4)
            .with_hearts(&[Card::heart(Rank::Jack)]);
        assert_eq!(
            request.hearts(),
            &HeartConstraint::Exact(vec![Card::heart(Rank::Jack)])
        );
    }

    #[test]
    fn rejects_counts_above_a_suit() {
        let err = DealRequest::unconstrained()
            .with_heart_count(14)
            .validate()
            .unwrap_err();
        assert_eq!(err, RequestError::HeartCount(14));

        let err = DealRequest::unconstrained()
            .with_spade_count(20)
            .validate()
            .unwrap_err();
        assert_eq!(err, RequestError::SpadeCount(20));
    }

    #[test]
    fn rejects_overfull_hand() {
        let err = DealRequest::unconstrained()
            .with_heart_count(13)
            .with_spade_count(1)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            RequestError::Overfull {
                hearts: 13,
                spades: 1
            }
        );
        assert!(
            DealRequest::unconstrained()
                .with_heart_count(6)
                .with_spade_count(7)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn rejects_bad_explicit_hearts() {
        let spade = Card::new(Rank::Ace, Suit::Spades);
        let err = DealRequest::unconstrained()
            .with_hearts(&[spade])
            .validate()
            .unwrap_err();
        assert_eq!(err, RequestError::NotAHeart(spade));

        let jack = Card::heart(Rank::Jack);
        let err = DealRequest::unconstrained()
            .with_hearts(&[jack, jack])
            .validate()
            .unwrap_err();
        assert_eq!(err, RequestError::DuplicateHeart(jack));
    }

    #[test]
    fn free_spades_display_as_stars() {
        assert_eq!(SpadeConstraint::Free.to_string(), "**");
        assert_eq!(SpadeConstraint::Count(3).to_string(), " 3");
    }
}
