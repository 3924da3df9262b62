use crate::model::card::Card;
use crate::play::Play;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{Level, event};

/// Consecutive passes that close a trick.
pub const PASSES_TO_END: u8 = 3;

/// A finished trick: the lead, every later play in order, and the three
/// closing passes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Play>", into = "Vec<Play>")]
pub struct Trick {
    plays: Vec<Play>,
}

impl Trick {
    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn lead(&self) -> &Play {
        &self.plays[0]
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Play> {
        self.plays.iter()
    }

    pub fn points(&self) -> u32 {
        total_points(&self.plays)
    }

    /// The play the closing passes conceded to.
    pub fn winning_play(&self) -> &Play {
        self.plays
            .iter()
            .rev()
            .find(|play| !play.is_pass())
            .unwrap_or_else(|| self.lead())
    }

    /// Position of [`Trick::winning_play`] in the sequence.
    pub fn winning_index(&self) -> usize {
        self.plays.len() - 1 - usize::from(PASSES_TO_END)
    }
}

impl TryFrom<Vec<Play>> for Trick {
    type Error = TrickError;

    /// Replays `plays` through a [`TrickBuilder`] so only a sequence that
    /// could have been built turns into a `Trick`.
    fn try_from(plays: Vec<Play>) -> Result<Self, Self::Error> {
        let mut plays = plays.into_iter();
        let lead = plays.next().ok_or(TrickError::InvalidLead)?;
        let mut builder = TrickBuilder::begin(lead)?;
        for play in plays {
            builder.add_play(play)?;
        }
        Ok(builder.finalize()?)
    }
}

impl From<Trick> for Vec<Play> {
    fn from(trick: Trick) -> Self {
        trick.plays
    }
}

impl<'a> IntoIterator for &'a Trick {
    type Item = &'a Play;
    type IntoIter = std::slice::Iter<'a, Play>;

    fn into_iter(self) -> Self::IntoIter {
        self.plays.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrickState {
    InProgress,
    Terminated,
}

/// Accumulates plays for the trick in progress. Owned by whoever sequences
/// turns; only the finished [`Trick`] is meant to be shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickBuilder {
    plays: Vec<Play>,
    consecutive_passes: u8,
}

impl TrickBuilder {
    pub fn begin(lead: Play) -> Result<Self, TrickError> {
        if !lead.can_lead() {
            return Err(TrickError::InvalidLead);
        }
        event!(target: "soup_core::trick", Level::DEBUG, lead = %lead, "trick started");
        let mut plays = Vec::with_capacity(8);
        plays.push(lead);
        Ok(Self {
            plays,
            consecutive_passes: 0,
        })
    }

    pub fn lead_card(card: Card) -> Self {
        event!(target: "soup_core::trick", Level::DEBUG, lead = %card, "trick started");
        Self {
            plays: vec![Play::single(card)],
            consecutive_passes: 0,
        }
    }

    pub fn state(&self) -> TrickState {
        if self.consecutive_passes >= PASSES_TO_END {
            TrickState::Terminated
        } else {
            TrickState::InProgress
        }
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    /// The most recent non-pass play: what the next play has to beat.
    pub fn top_play(&self) -> &Play {
        self.plays
            .iter()
            .rev()
            .find(|play| !play.is_pass())
            .unwrap_or(&self.plays[0])
    }

    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    /// Whether [`TrickBuilder::add_play`] would accept `play` right now.
    pub fn is_legal_next(&self, play: &Play) -> bool {
        self.state() == TrickState::InProgress && play.is_legal_given(Some(self.top_play()))
    }

    pub fn add_play(&mut self, play: Play) -> Result<&mut Self, TrickError> {
        if self.state() == TrickState::Terminated {
            return Err(TrickError::TrickAlreadyTerminated);
        }

        let top = self.top_play();
        if !play.is_legal_given(Some(top)) {
            return Err(TrickError::IllegalPlay {
                attempted: play,
                against: top.clone(),
            });
        }

        if play.is_pass() {
            self.consecutive_passes += 1;
        } else {
            self.consecutive_passes = 0;
        }
        event!(
            target: "soup_core::trick",
            Level::DEBUG,
            play = %play,
            consecutive_passes = self.consecutive_passes,
            "play accepted"
        );
        self.plays.push(play);

        if self.state() == TrickState::Terminated {
            event!(
                target: "soup_core::trick",
                Level::DEBUG,
                plays = self.plays.len(),
                points = self.points_so_far(),
                "trick terminated"
            );
        }
        Ok(self)
    }

    pub fn play_card(&mut self, card: Card) -> Result<&mut Self, TrickError> {
        self.add_play(Play::single(card))
    }

    pub fn pass(&mut self) -> Result<&mut Self, TrickError> {
        self.add_play(Play::pass())
    }

    pub fn points_so_far(&self) -> u32 {
        total_points(&self.plays)
    }

    /// Freezes the trick. Only valid right after the third consecutive pass;
    /// otherwise the builder comes back inside the error.
    pub fn finalize(self) -> Result<Trick, FinalizeError> {
        if self.consecutive_passes != PASSES_TO_END {
            return Err(FinalizeError { builder: self });
        }
        event!(
            target: "soup_core::trick",
            Level::DEBUG,
            plays = self.plays.len(),
            points = self.points_so_far(),
            "trick finalized"
        );
        Ok(Trick { plays: self.plays })
    }
}

fn total_points(plays: &[Play]) -> u32 {
    plays.iter().map(Play::points).sum()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    InvalidLead,
    IllegalPlay { attempted: Play, against: Play },
    TrickAlreadyTerminated,
    PrematureTermination { consecutive_passes: u8 },
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::InvalidLead => write!(f, "a trick cannot be led with a pass"),
            TrickError::IllegalPlay { attempted, against } => {
                write!(f, "{attempted} cannot follow {against}")
            }
            TrickError::TrickAlreadyTerminated => {
                write!(f, "trick already ended after {PASSES_TO_END} passes")
            }
            TrickError::PrematureTermination { consecutive_passes } => write!(
                f,
                "trick cannot end after {consecutive_passes} consecutive passes; {PASSES_TO_END} required"
            ),
        }
    }
}

impl std::error::Error for TrickError {}

/// A refused [`TrickBuilder::finalize`]; the trick stays open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeError {
    builder: TrickBuilder,
}

impl FinalizeError {
    pub fn error(&self) -> TrickError {
        TrickError::PrematureTermination {
            consecutive_passes: self.builder.consecutive_passes,
        }
    }

    pub fn into_builder(self) -> TrickBuilder {
        self.builder
    }
}

impl fmt::Display for FinalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error().fmt(f)
    }
}

impl std::error::Error for FinalizeError {}

impl From<FinalizeError> for TrickError {
    fn from(err: FinalizeError) -> Self {
        err.error()
    }
}

#[cfg(test)]
mod tests {
    use super::{Trick, TrickBuilder, TrickError, TrickState};
    use crate::model::card::{Card, parse_cards};
    use crate::play::Play;

    fn card(text: &str) -> Card {
        text.parse().unwrap()
    }

    fn play(text: &str) -> Play {
        Play::from_cards(&parse_cards(text).unwrap()).expect("cards form a play")
    }

    #[test]
    fn pass_cannot_lead() {
        assert_eq!(TrickBuilder::begin(Play::pass()), Err(TrickError::InvalidLead));
    }

    #[test]
    fn lead_then_three_passes_finalizes() {
        let mut builder = TrickBuilder::lead_card(card("3H"));
        builder.pass().unwrap().pass().unwrap().pass().unwrap();
        assert_eq!(builder.state(), TrickState::Terminated);
        let trick = builder.finalize().unwrap();
        assert_eq!(trick.len(), 4);
        assert_eq!(trick.points(), 0);
        assert_eq!(trick.lead(), &play("3H"));
        assert_eq!(trick.winning_play(), &play("3H"));
        assert_eq!(trick.winning_index(), 0);
    }

    #[test]
    fn passes_reset_after_a_play() {
        let mut builder = TrickBuilder::begin(play("5H 5C")).unwrap();
        builder.pass().unwrap().pass().unwrap();
        assert_eq!(builder.consecutive_passes(), 2);
        assert_eq!(builder.top_play(), &play("5H 5C"));

        builder.add_play(play("6H 6C")).unwrap();
        assert_eq!(builder.consecutive_passes(), 0);
        assert_eq!(builder.top_play(), &play("6H 6C"));

        builder.pass().unwrap();
        let err = builder.add_play(play("6S 6D")).unwrap_err();
        assert_eq!(
            err,
            TrickError::IllegalPlay {
                attempted: play("6S 6D"),
                against: play("6H 6C"),
            }
        );
        assert_eq!(builder.consecutive_passes(), 1);
    }

    #[test]
    fn illegal_play_carries_both_plays() {
        let mut builder = TrickBuilder::lead_card(card("5H"));
        let err = builder.play_card(card("3H")).unwrap_err();
        assert_eq!(
            err,
            TrickError::IllegalPlay {
                attempted: play("3H"),
                against: play("5H"),
            }
        );
        assert_eq!(builder.plays().len(), 1);
        assert_eq!(err.to_string(), "single(3H) cannot follow single(5H)");
    }

    #[test]
    fn fourth_pass_is_rejected() {
        let mut builder = TrickBuilder::lead_card(card("3H"));
        builder.pass().unwrap().pass().unwrap().pass().unwrap();
        assert_eq!(builder.pass().unwrap_err(), TrickError::TrickAlreadyTerminated);
        assert_eq!(
            builder.play_card(card("BJ")).unwrap_err(),
            TrickError::TrickAlreadyTerminated
        );
        assert!(!builder.is_legal_next(&Play::pass()));
    }

    #[test]
    fn premature_finalize_returns_the_builder() {
        let mut builder = TrickBuilder::lead_card(card("KH"));
        builder.pass().unwrap().pass().unwrap();
        let err = builder.finalize().unwrap_err();
        assert_eq!(
            err.error(),
            TrickError::PrematureTermination {
                consecutive_passes: 2
            }
        );
        let mut builder = err.into_builder();
        assert_eq!(builder.points_so_far(), 10);
        builder.pass().unwrap();
        assert_eq!(builder.finalize().unwrap().points(), 10);
    }

    #[test]
    fn is_legal_next_does_not_mutate() {
        let builder = TrickBuilder::lead_card(card("7D"));
        assert!(builder.is_legal_next(&play("8D")));
        assert!(!builder.is_legal_next(&play("6D")));
        assert!(builder.is_legal_next(&Play::pass()));
        assert_eq!(builder.plays().len(), 1);
        assert_eq!(builder.consecutive_passes(), 0);
    }

    #[test]
    fn replaying_a_sequence_validates_it() {
        let plays = vec![
            play("3H"),
            Play::pass(),
            play("4H"),
            Play::pass(),
            Play::pass(),
            Play::pass(),
        ];
        let trick = Trick::try_from(plays.clone()).unwrap();
        assert_eq!(trick.plays(), plays.as_slice());
        assert_eq!(trick.winning_play(), &play("4H"));
        assert_eq!(trick.winning_index(), 2);

        assert_eq!(Trick::try_from(Vec::new()), Err(TrickError::InvalidLead));
        assert_eq!(
            Trick::try_from(vec![play("3H"), Play::pass()]),
            Err(TrickError::PrematureTermination {
                consecutive_passes: 1
            })
        );
    }

    #[test]
    fn trick_serializes_as_play_list() {
        let mut builder = TrickBuilder::lead_card(card("10S"));
        builder.pass().unwrap().pass().unwrap().pass().unwrap();
        let trick = builder.finalize().unwrap();
        let json = serde_json::to_string(&trick).unwrap();
        let back: Trick = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trick);
        assert_eq!(back.points(), 10);
    }
}
