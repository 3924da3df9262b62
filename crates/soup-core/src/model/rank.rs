use core::fmt;
use serde::{Deserialize, Serialize};

/// Card ranks in climbing order. The ordinal drives both comparison and
/// run contiguity, so Two and the jokers sit above Ace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Three = 0,
    Four = 1,
    Five = 2,
    Six = 3,
    Seven = 4,
    Eight = 5,
    Nine = 6,
    Ten = 7,
    Jack = 8,
    Queen = 9,
    King = 10,
    Ace = 11,
    Two = 12,
    LittleJoker = 13,
    BigJoker = 14,
}

impl Rank {
    pub const ORDERED: [Rank; 15] = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
        Rank::LittleJoker,
        Rank::BigJoker,
    ];

    pub const SUITED: [Rank; 13] = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
    ];

    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        if (ordinal as usize) < Self::ORDERED.len() {
            Some(Self::ORDERED[ordinal as usize])
        } else {
            None
        }
    }

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn points(self) -> u32 {
        match self {
            Rank::Five => 5,
            Rank::Ten | Rank::King => 10,
            _ => 0,
        }
    }

    pub const fn is_joker(self) -> bool {
        matches!(self, Rank::LittleJoker | Rank::BigJoker)
    }

    pub const fn is_suited(self) -> bool {
        !self.is_joker()
    }

    /// Two and the jokers never take part in a run.
    pub const fn can_be_consecutive(self) -> bool {
        !matches!(self, Rank::Two | Rank::LittleJoker | Rank::BigJoker)
    }

    pub(crate) fn from_symbol(symbol: &str) -> Option<Self> {
        let rank = match symbol.to_ascii_uppercase().as_str() {
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            "2" => Rank::Two,
            "LJ" => Rank::LittleJoker,
            "BJ" => Rank::BigJoker,
            _ => return None,
        };
        Some(rank)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::LittleJoker => "LJ",
            Rank::BigJoker => "BJ",
        };
        f.write_str(text)
    }
}
