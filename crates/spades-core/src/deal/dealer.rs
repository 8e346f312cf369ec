//! Constrained dealing: force suit counts onto `Me`, then fill every hand at random.

use super::request::{DealRequest, HeartConstraint, SpadeConstraint};
use super::{Deal, DealError, HAND_SIZE};
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use rand::Rng;
use rand::seq::SliceRandom;
use std::array;

/// Deals all 52 cards so that `Me` satisfies `request`.
///
/// Hearts and spades that are not forced onto `Me` go one at a time to a random
/// other seat with room left. Clubs, diamonds and any unconstrained suit are
/// shuffled together and used to top every hand up to 13 cards.
pub fn deal<R: Rng + ?Sized>(request: &DealRequest, rng: &mut R) -> Result<Deal, DealError> {
    request.validate()?;

    let mut hands: [Hand; 4] = array::from_fn(|_| Hand::new());

    // Highest first, so a count constraint takes the top of the suit.
    let mut hearts = Deck::suit(Suit::Hearts);
    hearts.reverse();
    match request.hearts() {
        HeartConstraint::Free => {}
        HeartConstraint::Count(count) => {
            let rest = hearts.split_off(*count as usize);
            give(&mut hands, Seat::Me, hearts)?;
            scatter(&mut hands, rest, rng)?;
        }
        HeartConstraint::Exact(mine) => {
            hearts.retain(|card| !mine.contains(card));
            give(&mut hands, Seat::Me, mine.iter().copied())?;
            scatter(&mut hands, hearts, rng)?;
        }
    }

    if let SpadeConstraint::Count(count) = request.spades() {
        let mut spades = Deck::suit(Suit::Spades);
        let rest = spades.split_off(count as usize);
        give(&mut hands, Seat::Me, spades)?;
        scatter(&mut hands, rest, rng)?;
    }

    let pooled = |suit: Suit| match suit {
        Suit::Hearts => matches!(request.hearts(), HeartConstraint::Free),
        Suit::Spades => request.spades() == SpadeConstraint::Free,
        Suit::Clubs | Suit::Diamonds => true,
    };
    let mut pool: Vec<Card> = Deck::standard()
        .cards()
        .iter()
        .copied()
        .filter(|card| pooled(card.suit))
        .collect();
    pool.shuffle(rng);

    let needed: usize = hands.iter().map(|hand| HAND_SIZE - hand.len()).sum();
    if needed != pool.len() {
        return Err(DealError::PoolMismatch {
            needed,
            available: pool.len(),
        });
    }

    let mut offset = 0;
    for seat in Seat::ALL {
        let hand = &mut hands[seat.index()];
        let take = HAND_SIZE - hand.len();
        hand.extend(pool[offset..offset + take].iter().copied());
        offset += take;
    }

    Ok(Deal::new_unchecked(hands))
}

fn give<I>(hands: &mut [Hand; 4], seat: Seat, cards: I) -> Result<(), DealError>
where
    I: IntoIterator<Item = Card>,
{
    let hand = &mut hands[seat.index()];
    for card in cards {
        if hand.len() >= HAND_SIZE {
            return Err(DealError::Capacity { seat, card });
        }
        hand.add(card);
    }
    Ok(())
}

/// Hands each card to a uniformly chosen seat among Partner/Left/Right that still has room.
fn scatter<R: Rng + ?Sized>(
    hands: &mut [Hand; 4],
    cards: Vec<Card>,
    rng: &mut R,
) -> Result<(), DealError> {
    let mut open = Vec::with_capacity(Seat::OTHERS.len());
    for card in cards {
        open.clear();
        open.extend(
            Seat::OTHERS
                .iter()
                .copied()
                .filter(|seat| hands[seat.index()].len() < HAND_SIZE),
        );
        let seat = *open.choose(rng).ok_or(DealError::NoRoom { card })?;
        hands[seat.index()].add(card);
    }
    Ok(())
}
