use crate::deal::Deal;
use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use core::fmt;

/// A heart honor held by `Me`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Honor {
    Ace,
    King,
    Queen,
    Jack,
}

impl Honor {
    pub const ALL: [Honor; 4] = [Honor::Ace, Honor::King, Honor::Queen, Honor::Jack];

    /// Most hearts an opponent may hold and still be out of the suit by the time this honor is led.
    pub const fn threshold(self) -> usize {
        match self {
            Honor::Ace => 0,
            Honor::King => 1,
            Honor::Queen => 2,
            Honor::Jack => 3,
        }
    }

    pub const fn rank(self) -> Rank {
        match self {
            Honor::Ace => Rank::Ace,
            Honor::King => Rank::King,
            Honor::Queen => Rank::Queen,
            Honor::Jack => Rank::Jack,
        }
    }

    pub const fn card(self) -> Card {
        Card::heart(self.rank())
    }
}

impl fmt::Display for Honor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Honor::Ace => "Ace",
            Honor::King => "King",
            Honor::Queen => "Queen",
            Honor::Jack => "Jack",
        };
        f.write_str(label)
    }
}

/// True if either opponent holds at most `threshold` hearts and at least one spade.
pub fn can_honor_be_trumped(deal: &Deal, threshold: usize) -> bool {
    Seat::OPPONENTS.iter().any(|&seat| {
        let hand = deal.hand(seat);
        hand.count_suit(Suit::Hearts) <= threshold && hand.has_suit(Suit::Spades)
    })
}

pub fn can_ace_be_trumped(deal: &Deal) -> bool {
    can_honor_be_trumped(deal, Honor::Ace.threshold())
}

pub fn can_king_be_trumped(deal: &Deal) -> bool {
    can_honor_be_trumped(deal, Honor::King.threshold())
}

pub fn can_queen_be_trumped(deal: &Deal) -> bool {
    can_honor_be_trumped(deal, Honor::Queen.threshold())
}

pub fn can_jack_be_trumped(deal: &Deal) -> bool {
    can_honor_be_trumped(deal, Honor::Jack.threshold())
}

/// Per-honor verdicts for one deal. An honor `Me` does not hold is never reported as trumped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrumpExposure {
    pub ace: bool,
    pub king: bool,
    pub queen: bool,
    pub jack: bool,
}

impl TrumpExposure {
    pub fn evaluate(deal: &Deal) -> Self {
        let mine = deal.hand(Seat::Me);
        let check = |honor: Honor| {
            mine.contains(honor.card()) && can_honor_be_trumped(deal, honor.threshold())
        };
        Self {
            ace: check(Honor::Ace),
            king: check(Honor::King),
            queen: check(Honor::Queen),
            jack: check(Honor::Jack),
        }
    }

    pub fn get(&self, honor: Honor) -> bool {
        match honor {
            Honor::Ace => self.ace,
            Honor::King => self.king,
            Honor::Queen => self.queen,
            Honor::Jack => self.jack,
        }
    }
}
