use crate::play::Play;

impl Play {
    /// Whether `self` may follow `last_play` within a trick.
    ///
    /// A pass is always legal. Anything else needs a previous play of the same
    /// shape with the same card count and a strictly lower floor; singles
    /// compare their one card. Straights compare floors only and do not check
    /// that the lengths agree.
    pub fn is_legal_given(&self, last_play: Option<&Play>) -> bool {
        let Some(last) = last_play else {
            return self.is_pass();
        };

        match (self, last) {
            (Play::Pass, _) => true,
            (Play::Single(card), Play::Single(previous)) => card.compare_by_rank(previous).is_gt(),
            (Play::Pairs(cards), Play::Pairs(previous))
            | (Play::Triples(cards), Play::Triples(previous))
            | (Play::FullHouses(cards), Play::FullHouses(previous)) => {
                cards.len() == previous.len() && self.lowest_rank() > last.lowest_rank()
            }
            (Play::Straight(_), Play::Straight(_)) => self.lowest_rank() > last.lowest_rank(),
            _ => false,
        }
    }

    /// Any non-pass play may open a trick.
    pub const fn can_lead(&self) -> bool {
        !self.is_pass()
    }
}
