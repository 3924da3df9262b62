use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::LazyLock;

/// One of the 54 distinct cards. Suited ranks always carry a real suit and
/// jokers never do; the only way to obtain a `Card` is through [`Card::of`]
/// and friends, so that invariant holds for every value in circulation.
///
/// Ordering is by rank first, then suit, which gives a stable total order
/// for sorting card multisets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    rank: Rank,
    suit: Option<Suit>,
}

static CATALOG: LazyLock<Vec<Card>> = LazyLock::new(|| {
    let mut cards = Vec::with_capacity(Card::DISTINCT);
    for rank in Rank::ORDERED.iter().copied().filter(|r| r.is_suited()) {
        for suit in Suit::ALL.iter().copied() {
            cards.push(Card {
                rank,
                suit: Some(suit),
            });
        }
    }
    cards.push(Card::LITTLE_JOKER);
    cards.push(Card::BIG_JOKER);
    cards
});

impl Card {
    pub const DISTINCT: usize = 54;

    pub const LITTLE_JOKER: Card = Card {
        rank: Rank::LittleJoker,
        suit: None,
    };

    pub const BIG_JOKER: Card = Card {
        rank: Rank::BigJoker,
        suit: None,
    };

    pub const fn of(rank: Rank, suit: Option<Suit>) -> Result<Self, CardError> {
        match (rank.is_suited(), suit) {
            (true, Some(_)) | (false, None) => Ok(Self { rank, suit }),
            _ => Err(CardError::InvalidCombination { rank, suit }),
        }
    }

    pub const fn suited(rank: Rank, suit: Suit) -> Result<Self, CardError> {
        Self::of(rank, Some(suit))
    }

    /// Every distinct card once: 13 suited ranks in each suit, then the two jokers.
    pub fn catalog() -> &'static [Card] {
        &CATALOG
    }

    pub const fn rank(self) -> Rank {
        self.rank
    }

    pub const fn suit(self) -> Option<Suit> {
        self.suit
    }

    pub const fn is_joker(self) -> bool {
        self.rank.is_joker()
    }

    pub const fn points(self) -> u32 {
        self.rank.points()
    }

    /// Compares ranks only; cards of equal rank are equal under this order.
    pub fn compare_by_rank(&self, other: &Card) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suit {
            Some(suit) => write!(f, "{}{}", self.rank, suit),
            None => write!(f, "{}", self.rank),
        }
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || CardError::InvalidArgument(text.to_string());

        if let Some(rank) = Rank::from_symbol(text).filter(|r| r.is_joker()) {
            return Card::of(rank, None);
        }

        let mut chars = text.chars();
        let suit_symbol = chars.next_back().ok_or_else(invalid)?;
        let rank = Rank::from_symbol(chars.as_str()).ok_or_else(invalid)?;
        let suit = Suit::from_symbol(suit_symbol).ok_or_else(invalid)?;
        Card::of(rank, Some(suit))
    }
}

impl TryFrom<String> for Card {
    type Error = CardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

/// Parses a whitespace- or comma-separated card list such as `"3H 4H LJ"`.
pub fn parse_cards(text: &str) -> Result<Vec<Card>, CardError> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    InvalidCombination { rank: Rank, suit: Option<Suit> },
    InvalidArgument(String),
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardError::InvalidCombination { rank, suit: Some(suit) } => {
                write!(f, "rank {rank} cannot carry suit {suit}")
            }
            CardError::InvalidCombination { rank, suit: None } => {
                write!(f, "rank {rank} requires a suit")
            }
            CardError::InvalidArgument(text) => write!(f, "unrecognised card '{text}'"),
        }
    }
}

impl std::error::Error for CardError {}
