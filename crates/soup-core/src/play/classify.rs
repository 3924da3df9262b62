use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::play::ranks::RankCounts;
use crate::play::{Play, SortedCards};
use std::cmp::Reverse;

/// Shortest run of ranks that counts as a straight.
pub const MIN_STRAIGHT_LEN: usize = 5;

/// Highest rank a straight may reach.
pub const MAX_STRAIGHT_RANK: Rank = Rank::Ace;

type Recognizer = fn(&[Card]) -> Option<Play>;

const RECOGNIZERS: [Recognizer; 6] = [
    try_pass,
    try_single,
    try_pairs,
    try_triples,
    try_full_houses,
    try_straight,
];

/// Every shape `cards` legally forms, in recognizer order. Usually zero or
/// one entry; an empty result means the cards form no play.
pub fn classify(cards: &[Card]) -> Vec<Play> {
    RECOGNIZERS
        .iter()
        .filter_map(|recognize| recognize(cards))
        .collect()
}

fn try_pass(cards: &[Card]) -> Option<Play> {
    cards.is_empty().then_some(Play::Pass)
}

fn try_single(cards: &[Card]) -> Option<Play> {
    match cards {
        [card] => Some(Play::Single(*card)),
        _ => None,
    }
}

fn try_pairs(cards: &[Card]) -> Option<Play> {
    is_same_rank_run(cards, 2).then(|| Play::Pairs(SortedCards::by_rank(cards)))
}

fn try_triples(cards: &[Card]) -> Option<Play> {
    is_same_rank_run(cards, 3).then(|| Play::Triples(SortedCards::by_rank(cards)))
}

/// Shared rule for pairs and triples. Jokers (mixed freely) and Twos only
/// form a single group; everything else must be a run of ranks each held
/// exactly `multiplicity` times.
fn is_same_rank_run(cards: &[Card], multiplicity: usize) -> bool {
    let counts = RankCounts::of(cards);
    if cards.len() == multiplicity && counts.all_jokers() {
        return true;
    }
    if cards.len() == multiplicity && counts.len() == 1 && counts.contains(Rank::Two) {
        return true;
    }
    if counts.any_unrunnable() {
        return false;
    }
    counts.is_consecutive(multiplicity)
}

fn try_full_houses(cards: &[Card]) -> Option<Play> {
    let counts = RankCounts::of(cards);
    let triples = counts.with_count(3);
    if !triples.is_consecutive(3) {
        return None;
    }
    if triples.len() != counts.with_count(2).len() {
        return None;
    }
    if cards.len() % 5 != 0 {
        return None;
    }
    let sorted = SortedCards::sorted_by_key(cards, |card| (Reverse(counts.count(card.rank())), *card));
    Some(Play::FullHouses(sorted))
}

fn try_straight(cards: &[Card]) -> Option<Play> {
    if cards.len() < MIN_STRAIGHT_LEN {
        return None;
    }
    let counts = RankCounts::of(cards);
    if counts.any_unrunnable() {
        return None;
    }
    if counts.len() != cards.len() {
        return None;
    }
    if counts.highest().is_none_or(|top| top > MAX_STRAIGHT_RANK) {
        return None;
    }
    counts
        .is_consecutive(1)
        .then(|| Play::Straight(SortedCards::by_rank(cards)))
}
