use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use core::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn heart(rank: Rank) -> Self {
        Self::new(rank, Suit::Hearts)
    }

    /// Dense id in `0..52`: suits occupy consecutive blocks of 13, ranks ascend inside a block.
    pub const fn id(self) -> u8 {
        self.suit as u8 * 13 + self.rank.offset()
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        if id >= 52 {
            return None;
        }
        let suit = match Suit::from_index((id / 13) as usize) {
            Some(suit) => suit,
            None => return None,
        };
        match Rank::from_value(id % 13 + 2) {
            Some(rank) => Some(Self::new(rank, suit)),
            None => None,
        }
    }

    pub const fn is_heart(self) -> bool {
        self.suit.is_heart()
    }

    pub const fn is_spade(self) -> bool {
        self.suit.is_trump()
    }

    /// True when both cards are hearts and `self` outranks `other`.
    pub fn beats_heart(self, other: Card) -> bool {
        self.is_heart() && other.is_heart() && self.rank > other.rank
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCardError {
    #[error("card text {0:?} must be a rank followed by a suit, e.g. \"QH\"")]
    Shape(String),
    #[error("unknown rank in {0:?}")]
    Rank(String),
    #[error("unknown suit in {0:?}")]
    Suit(String),
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        let (rank_text, suit_text) = match trimmed.char_indices().last() {
            Some((idx, _)) if idx > 0 => trimmed.split_at(idx),
            _ => return Err(ParseCardError::Shape(text.to_string())),
        };

        let rank = match rank_text {
            "10" => Some(Rank::Ten),
            _ => {
                let mut chars = rank_text.chars();
                match (chars.next(), chars.next()) {
                    (Some(symbol), None) => Rank::from_symbol(symbol),
                    _ => return Err(ParseCardError::Shape(text.to_string())),
                }
            }
        }
        .ok_or_else(|| ParseCardError::Rank(text.to_string()))?;

        let suit = suit_text
            .chars()
            .next()
            .and_then(Suit::from_symbol)
            .ok_or_else(|| ParseCardError::Suit(text.to_string()))?;

        Ok(Card::new(rank, suit))
    }
}

/// Parses a comma separated card list such as `"JH,KH"`.
pub fn parse_cards(text: &str) -> Result<Vec<Card>, ParseCardError> {
    text.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Joins cards with commas, in the order given.
pub fn cards_to_string(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
