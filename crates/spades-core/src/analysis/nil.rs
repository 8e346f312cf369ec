//! Replays `Me` leading every heart, lowest first, against fixed partner and
//! opponent policies to decide whether a nil bid survives the heart suit.

use crate::deal::Deal;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether an opponent's incidental cover also saves the nil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NilRule {
    /// Only the partner can cover.
    #[default]
    Standard,
    /// A spade or higher heart played by either opponent also covers.
    OpponentsForced,
}

/// The four cards played to one heart trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartTrick {
    pub led: Card,
    pub partner: Card,
    pub left: Card,
    pub right: Card,
    pub covered: bool,
}

impl fmt::Display for HeartTrick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Me {}, Partner {}, Left {}, Right {} -> {}",
            self.led,
            self.partner,
            self.left,
            self.right,
            if self.covered { "covered" } else { "busted" }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NilOutcome {
    pub covered: bool,
    /// Tricks in play order; ends with the first uncovered heart when busted.
    pub tricks: Vec<HeartTrick>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NilError {
    #[error("{seat} has no card left to play")]
    EmptyHand { seat: Seat },
}

/// True if `Me` never has to win a heart trick under `rule`.
pub fn is_nil_covered(deal: &Deal, rule: NilRule) -> Result<bool, NilError> {
    simulate_nil(deal, rule).map(|outcome| outcome.covered)
}

pub fn simulate_nil(deal: &Deal, rule: NilRule) -> Result<NilOutcome, NilError> {
    let mut hands = deal.hands().clone();
    let led: Vec<Card> = deal.hand(Seat::Me).of_suit(Suit::Hearts).collect();
    let mut tricks = Vec::with_capacity(led.len());

    for heart in led {
        let partner = play(&mut hands, Seat::Partner, |hand| partner_card(hand, heart))?;
        let left = play(&mut hands, Seat::Left, |hand| opponent_card(hand, heart))?;
        let right = play(&mut hands, Seat::Right, |hand| opponent_card(hand, heart))?;

        let mut covered = partner.beats_heart(heart) || partner.is_spade();
        if !covered && rule == NilRule::OpponentsForced {
            covered = [left, right]
                .iter()
                .any(|card| card.is_spade() || card.beats_heart(heart));
        }

        tricks.push(HeartTrick {
            led: heart,
            partner,
            left,
            right,
            covered,
        });
        if !covered {
            return Ok(NilOutcome {
                covered: false,
                tricks,
            });
        }
    }

    Ok(NilOutcome {
        covered: true,
        tricks,
    })
}

fn play<F>(hands: &mut [Hand; 4], seat: Seat, choose: F) -> Result<Card, NilError>
where
    F: FnOnce(&Hand) -> Option<Card>,
{
    let hand = &mut hands[seat.index()];
    let card = choose(hand).ok_or(NilError::EmptyHand { seat })?;
    hand.remove(card);
    Ok(card)
}

/// Cheapest heart that covers, else the lowest heart; without hearts, the lowest
/// spade ruffs; otherwise the first remaining card.
fn partner_card(hand: &Hand, led: Card) -> Option<Card> {
    if hand.has_suit(Suit::Hearts) {
        hand.lowest_above(led).or_else(|| hand.lowest_of(Suit::Hearts))
    } else {
        hand.lowest_of(Suit::Spades)
            .or_else(|| hand.cards().first().copied())
    }
}

/// Slough the highest heart under `led`; if none, forced to play the top heart.
/// Void in hearts: discard a club, then a diamond, a spade only as last resort.
fn opponent_card(hand: &Hand, led: Card) -> Option<Card> {
    if hand.has_suit(Suit::Hearts) {
        hand.highest_below(led)
            .or_else(|| hand.highest_of(Suit::Hearts))
    } else {
        hand.lowest_of(Suit::Clubs)
            .or_else(|| hand.lowest_of(Suit::Diamonds))
            .or_else(|| hand.lowest_of(Suit::Spades))
    }
}
