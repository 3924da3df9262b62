use crate::model::card::Card;
use crate::model::deck::DECK_COUNT;
use crate::play::{Play, classify};
use std::collections::HashMap;
use std::fmt;

/// Cards each seat starts with.
pub const HAND_SIZE: usize = 26;

/// One seat's cards. Holds at most one copy of a card per deck in play and
/// keeps them sorted by rank, then suit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self, HandError> {
        let mut hand = Self::new();
        for card in cards {
            hand.add(card)?;
        }
        Ok(hand)
    }

    /// A freshly dealt hand, which must hold exactly [`HAND_SIZE`] cards.
    pub fn dealt(cards: impl IntoIterator<Item = Card>) -> Result<Self, HandError> {
        let hand = Self::with_cards(cards)?;
        if hand.len() != HAND_SIZE {
            return Err(HandError::WrongSize(hand.len()));
        }
        Ok(hand)
    }

    pub fn add(&mut self, card: Card) -> Result<(), HandError> {
        if self.count(card) >= DECK_COUNT {
            return Err(HandError::DuplicateCard(card));
        }
        self.insert_unchecked(card);
        Ok(())
    }

    pub(crate) fn insert_unchecked(&mut self, card: Card) {
        let index = self.cards.partition_point(|held| *held <= card);
        self.cards.insert(index, card);
    }

    pub fn count(&self, card: Card) -> usize {
        self.cards.iter().filter(|held| **held == card).count()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// True when the hand holds every card in `cards`, counting repeats.
    pub fn contains_all(&self, cards: &[Card]) -> bool {
        self.first_missing(cards).is_none()
    }

    /// Classifies `cards` after checking they all come from this hand.
    pub fn offer(&self, cards: &[Card]) -> Result<Vec<Play>, HandError> {
        if let Some(missing) = self.first_missing(cards) {
            return Err(HandError::CardNotInHand(missing));
        }
        Ok(classify(cards))
    }

    /// Removes `cards` from the hand. Nothing is removed unless every card is
    /// present. Returns whether the hand is now empty.
    pub fn play(&mut self, cards: &[Card]) -> Result<bool, HandError> {
        if let Some(missing) = self.first_missing(cards) {
            return Err(HandError::CardNotInHand(missing));
        }
        for card in cards {
            if let Some(index) = self.cards.iter().position(|held| held == card) {
                self.cards.remove(index);
            }
        }
        Ok(self.is_out())
    }

    pub fn is_out(&self) -> bool {
        self.cards.is_empty()
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

    fn first_missing(&self, cards: &[Card]) -> Option<Card> {
        let mut wanted: HashMap<Card, usize> = HashMap::new();
        for card in cards {
            let needed = wanted.entry(*card).or_insert(0);
            *needed += 1;
            if *needed > self.count(*card) {
                return Some(*card);
            }
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandError {
    DuplicateCard(Card),
    CardNotInHand(Card),
    WrongSize(usize),
}

impl fmt::Display for HandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandError::DuplicateCard(card) => {
                write!(f, "hand already holds {DECK_COUNT} copies of {card}")
            }
            HandError::CardNotInHand(card) => write!(f, "{card} is not in the hand"),
            HandError::WrongSize(len) => {
                write!(f, "a dealt hand holds {HAND_SIZE} cards, got {len}")
            }
        }
    }
}

impl std::error::Error for HandError {}
