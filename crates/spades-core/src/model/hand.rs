use crate::model::card::Card;
use crate::model::suit::Suit;
use core::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
        self.sort();
    }

    pub fn extend<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        self.cards.extend(cards);
        self.sort();
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Cards of `suit`, lowest first.
    pub fn of_suit(&self, suit: Suit) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied().filter(move |card| card.suit == suit)
    }

    pub fn count_suit(&self, suit: Suit) -> usize {
        self.of_suit(suit).count()
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.cards.iter().any(|card| card.suit == suit)
    }

    pub fn lowest_of(&self, suit: Suit) -> Option<Card> {
        self.of_suit(suit).next()
    }

    pub fn highest_of(&self, suit: Suit) -> Option<Card> {
        self.cards.iter().rev().copied().find(|c| c.suit == suit)
    }

    /// Lowest card of the same suit that outranks `card`.
    pub fn lowest_above(&self, card: Card) -> Option<Card> {
        self.of_suit(card.suit).find(|c| c.rank > card.rank)
    }

    /// Highest card of the same suit ranked strictly below `card`.
    pub fn highest_below(&self, card: Card) -> Option<Card> {
        self.cards
            .iter()
            .rev()
            .copied()
            .find(|c| c.suit == card.suit && c.rank < card.rank)
    }

    fn sort(&mut self) {
        self.cards
            .sort_by(|a, b| a.suit.cmp(&b.suit).then(a.rank.cmp(&b.rank)));
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, card) in self.cards.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn add_and_remove_cards() {
        let mut hand = Hand::new();
        let card = Card::new(Rank::Three, Suit::Clubs);
        hand.add(card);
        assert!(hand.contains(card));
        assert!(hand.remove(card));
        assert!(!hand.contains(card));
        assert!(!hand.remove(card));
    }

    #[test]
    fn cards_are_sorted_by_suit_then_rank() {
        let mut hand = Hand::new();
        hand.add(Card::new(Rank::King, Suit::Spades));
        hand.add(Card::new(Rank::Two, Suit::Clubs));
        hand.add(Card::new(Rank::Ace, Suit::Clubs));
        let ordered: Vec<_> = hand.iter().copied().collect();
        assert_eq!(ordered[0], Card::new(Rank::Two, Suit::Clubs));
        assert_eq!(ordered[1], Card::new(Rank::Ace, Suit::Clubs));
        assert_eq!(ordered[2], Card::new(Rank::King, Suit::Spades));
    }

    #[test]
    fn neighbours_within_suit() {
        let hand = Hand::with_cards(vec![
            Card::heart(Rank::Four),
            Card::heart(Rank::Nine),
            Card::heart(Rank::King),
            Card::new(Rank::Ace, Suit::Spades),
        ]);
        let jack = Card::heart(Rank::Jack);
        assert_eq!(hand.lowest_above(jack), Some(Card::heart(Rank::King)));
        assert_eq!(hand.highest_below(jack), Some(Card::heart(Rank::Nine)));
        assert_eq!(hand.lowest_above(Card::heart(Rank::Ace)), None);
        assert_eq!(hand.highest_below(Card::heart(Rank::Four)), None);
        assert_eq!(hand.count_suit(Suit::Hearts), 3);
        assert_eq!(hand.highest_of(Suit::Hearts), Some(Card::heart(Rank::King)));
        assert_eq!(hand.lowest_of(Suit::Clubs), None);
    }

    #[test]
    fn displays_comma_separated() {
        let hand = Hand::with_cards(vec![Card::heart(Rank::King), Card::heart(Rank::Jack)]);
        assert_eq!(hand.to_string(), "JH,KH");
    }
}
