use crate::model::card::Card;
use crate::model::hand::{HAND_SIZE, Hand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::array;

/// Number of full decks shuffled together.
pub const DECK_COUNT: usize = 2;

pub const SEATS: usize = 4;

/// Two complete 54-card decks shuffled together.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

/// Result of dealing a deck: one hand per seat and whatever was left over.
#[derive(Debug, Clone)]
pub struct Deal {
    pub hands: [Hand; SEATS],
    pub undealt: Vec<Card>,
}

impl Deck {
    pub fn double() -> Self {
        let mut cards = Vec::with_capacity(Card::DISTINCT * DECK_COUNT);
        for _ in 0..DECK_COUNT {
            cards.extend_from_slice(Card::catalog());
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::double();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Deals [`HAND_SIZE`] cards to each seat round-robin from the top of the
    /// deck; the remainder is returned untouched.
    pub fn deal(&self) -> Deal {
        let dealt = HAND_SIZE * SEATS;
        let mut hands: [Hand; SEATS] = array::from_fn(|_| Hand::new());
        for (index, card) in self.cards.iter().take(dealt).enumerate() {
            hands[index % SEATS].insert_unchecked(*card);
        }
        Deal {
            hands,
            undealt: self.cards.iter().skip(dealt).copied().collect(),
        }
    }
}
