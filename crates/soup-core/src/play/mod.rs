//! Play shapes and the rules that recognise and compare them.
//!
//! A [`Play`] is only produced by [`classify`] (or the thin helpers built on
//! it), so every non-pass variant holds a card multiset that satisfies its
//! shape's predicate.

pub mod classify;
pub mod legality;
pub mod ranks;

pub use classify::classify;
pub use ranks::RankCounts;

use crate::model::card::Card;
use crate::model::rank::Rank;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Pass,
    Single,
    Pairs,
    Triples,
    FullHouses,
    Straight,
}

impl Shape {
    pub const ALL: [Shape; 6] = [
        Shape::Pass,
        Shape::Single,
        Shape::Pairs,
        Shape::Triples,
        Shape::FullHouses,
        Shape::Straight,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Shape::Pass => "pass",
            Shape::Single => "single",
            Shape::Pairs => "pairs",
            Shape::Triples => "triples",
            Shape::FullHouses => "full_houses",
            Shape::Straight => "straight",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A card multiset in its shape's canonical order. Only the classifier can
/// build one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortedCards(Vec<Card>);

impl SortedCards {
    pub(crate) fn by_rank(cards: &[Card]) -> Self {
        let mut sorted = cards.to_vec();
        sorted.sort();
        Self(sorted)
    }

    pub(crate) fn sorted_by_key<K: Ord>(cards: &[Card], key: impl FnMut(&Card) -> K) -> Self {
        let mut sorted = cards.to_vec();
        sorted.sort_by_key(key);
        Self(sorted)
    }
}

impl Deref for SortedCards {
    type Target = [Card];

    fn deref(&self) -> &[Card] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PlayRecord", into = "PlayRecord")]
pub enum Play {
    Pass,
    Single(Card),
    Pairs(SortedCards),
    Triples(SortedCards),
    FullHouses(SortedCards),
    Straight(SortedCards),
}

impl Play {
    pub const fn pass() -> Self {
        Play::Pass
    }

    pub const fn single(card: Card) -> Self {
        Play::Single(card)
    }

    /// First interpretation of `cards` in recognizer order, if any.
    pub fn from_cards(cards: &[Card]) -> Option<Self> {
        classify(cards).into_iter().next()
    }

    /// The interpretation of `cards` as `shape`, if the cards form it.
    pub fn with_shape(cards: &[Card], shape: Shape) -> Option<Self> {
        classify(cards).into_iter().find(|play| play.shape() == shape)
    }

    pub const fn shape(&self) -> Shape {
        match self {
            Play::Pass => Shape::Pass,
            Play::Single(_) => Shape::Single,
            Play::Pairs(_) => Shape::Pairs,
            Play::Triples(_) => Shape::Triples,
            Play::FullHouses(_) => Shape::FullHouses,
            Play::Straight(_) => Shape::Straight,
        }
    }

    pub const fn is_pass(&self) -> bool {
        matches!(self, Play::Pass)
    }

    pub fn cards(&self) -> &[Card] {
        match self {
            Play::Pass => &[],
            Play::Single(card) => std::slice::from_ref(card),
            Play::Pairs(cards)
            | Play::Triples(cards)
            | Play::FullHouses(cards)
            | Play::Straight(cards) => cards,
        }
    }

    pub fn len(&self) -> usize {
        self.cards().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards().is_empty()
    }

    pub fn points(&self) -> u32 {
        self.cards().iter().map(|card| card.points()).sum()
    }

    /// Lowest rank among all cards, including the pair ranks of a full house.
    pub fn lowest_rank(&self) -> Option<Rank> {
        self.cards().iter().map(|card| card.rank()).min()
    }
}

impl fmt::Display for Play {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pass() {
            return f.write_str("pass");
        }
        write!(f, "{}(", self.shape())?;
        for (i, card) in self.cards().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        f.write_str(")")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlayRecord {
    shape: Shape,
    #[serde(default)]
    cards: Vec<Card>,
}

impl From<Play> for PlayRecord {
    fn from(play: Play) -> Self {
        PlayRecord {
            shape: play.shape(),
            cards: play.cards().to_vec(),
        }
    }
}

impl TryFrom<PlayRecord> for Play {
    type Error = ShapeMismatch;

    fn try_from(record: PlayRecord) -> Result<Self, Self::Error> {
        Play::with_shape(&record.cards, record.shape).ok_or(ShapeMismatch {
            shape: record.shape,
            cards: record.cards,
        })
    }
}

/// Raised when a serialized play's cards do not form its recorded shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMismatch {
    pub shape: Shape,
    pub cards: Vec<Card>,
}

impl fmt::Display for ShapeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cards do not form {}", self.cards.len(), self.shape)
    }
}

impl std::error::Error for ShapeMismatch {}
