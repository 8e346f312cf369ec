use core::fmt;

/// The four hands of a deal, labelled relative to the simulated player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Seat {
    Me = 0,
    Partner = 1,
    Left = 2,
    Right = 3,
}

impl Seat {
    /// Fixed order used when topping hands up to 13 cards.
    pub const ALL: [Seat; 4] = [Seat::Me, Seat::Partner, Seat::Left, Seat::Right];

    /// Seats that receive the hearts not forced onto `Me`.
    pub const OTHERS: [Seat; 3] = [Seat::Partner, Seat::Left, Seat::Right];

    pub const OPPONENTS: [Seat; 2] = [Seat::Left, Seat::Right];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            Seat::Me => "Me",
            Seat::Partner => "Partner",
            Seat::Left => "Left",
            Seat::Right => "Right",
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::Seat;

    #[test]
    fn index_follows_dealing_order() {
        for (i, seat) in Seat::ALL.iter().enumerate() {
            assert_eq!(seat.index(), i);
        }
    }

    #[test]
    fn opponents_are_left_and_right() {
        assert_eq!(Seat::OPPONENTS, [Seat::Left, Seat::Right]);
        assert!(Seat::OPPONENTS.iter().all(|seat| Seat::OTHERS.contains(seat)));
        assert!(!Seat::OTHERS.contains(&Seat::Me));
    }
}
