use crate::model::card::Card;
use crate::model::rank::Rank;
use std::collections::BTreeMap;

/// Occurrences of each rank in a card multiset, keyed in rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankCounts {
    counts: BTreeMap<Rank, usize>,
}

impl RankCounts {
    pub fn of(cards: &[Card]) -> Self {
        let mut counts = BTreeMap::new();
        for card in cards {
            *counts.entry(card.rank()).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn count(&self, rank: Rank) -> usize {
        self.counts.get(&rank).copied().unwrap_or(0)
    }

    pub fn contains(&self, rank: Rank) -> bool {
        self.counts.contains_key(&rank)
    }

    /// Number of distinct ranks present.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn ranks(&self) -> impl Iterator<Item = Rank> + '_ {
        self.counts.keys().copied()
    }

    pub fn lowest(&self) -> Option<Rank> {
        self.counts.keys().next().copied()
    }

    pub fn highest(&self) -> Option<Rank> {
        self.counts.keys().next_back().copied()
    }

    /// The sub-map of ranks that occur exactly `multiplicity` times.
    pub fn with_count(&self, multiplicity: usize) -> RankCounts {
        let counts = self
            .counts
            .iter()
            .filter(|(_, count)| **count == multiplicity)
            .map(|(rank, count)| (*rank, *count))
            .collect();
        Self { counts }
    }

    pub fn all_jokers(&self) -> bool {
        self.ranks().all(Rank::is_joker)
    }

    pub fn any_unrunnable(&self) -> bool {
        self.ranks().any(|rank| !rank.can_be_consecutive())
    }

    /// True when every present rank occurs exactly `multiplicity` times and
    /// the ranks form one gap-free run by ordinal. An empty map is only
    /// consecutive for a zero multiplicity.
    pub fn is_consecutive(&self, multiplicity: usize) -> bool {
        let (Some(first), Some(last)) = (self.lowest(), self.highest()) else {
            return multiplicity == 0;
        };
        if self.counts.values().any(|count| *count != multiplicity) {
            return false;
        }
        usize::from(last.ordinal() - first.ordinal()) == self.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::RankCounts;
    use crate::model::card::{Card, parse_cards};
    use crate::model::rank::Rank;

    fn counts(text: &str) -> RankCounts {
        RankCounts::of(&parse_cards(text).unwrap())
    }

    #[test]
    fn counts_group_by_rank() {
        let map = counts("3H 3S 5D 3C");
        assert_eq!(map.count(Rank::Three), 3);
        assert_eq!(map.count(Rank::Five), 1);
        assert_eq!(map.count(Rank::Four), 0);
        assert_eq!(map.len(), 2);
        assert_eq!(map.lowest(), Some(Rank::Three));
        assert_eq!(map.highest(), Some(Rank::Five));
    }

    #[test]
    fn consecutive_pairs_detected() {
        assert!(counts("3H 3S 4D 4C 5H 5H").is_consecutive(2));
        assert!(!counts("3H 3S 5D 5C").is_consecutive(2));
        assert!(!counts("3H 3S 4D").is_consecutive(2));
    }

    #[test]
    fn empty_map_needs_zero_multiplicity() {
        let empty = RankCounts::of(&[]);
        assert!(!empty.is_consecutive(2));
        assert!(!empty.is_consecutive(3));
        assert!(empty.is_consecutive(0));
    }

    #[test]
    fn with_count_filters_exact_multiplicity() {
        let map = counts("KH KS KD QH QS JC");
        let triples = map.with_count(3);
        assert_eq!(triples.ranks().collect::<Vec<_>>(), vec![Rank::King]);
        let pairs = map.with_count(2);
        assert_eq!(pairs.ranks().collect::<Vec<_>>(), vec![Rank::Queen]);
    }

    #[test]
    fn joker_probes() {
        let jokers = RankCounts::of(&[Card::LITTLE_JOKER, Card::BIG_JOKER]);
        assert!(jokers.all_jokers());
        assert!(jokers.any_unrunnable());
        assert!(!counts("2H 3H").all_jokers());
        assert!(counts("2H 3H").any_unrunnable());
        assert!(!counts("AH KH").any_unrunnable());
    }
}
