use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;

pub const DECK_SIZE: usize = 52;
pub const SUIT_SIZE: usize = 13;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL.iter().copied() {
            cards.extend(Self::suit(suit));
        }
        Self { cards }
    }

    /// The 13 cards of one suit, lowest first.
    pub fn suit(suit: Suit) -> Vec<Card> {
        Rank::ORDERED
            .iter()
            .copied()
            .map(|rank| Card::new(rank, suit))
            .collect()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
