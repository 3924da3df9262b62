use crate::model::trick::{Trick, TrickError};
use crate::play::Play;
use serde::{Deserialize, Serialize};
use std::fmt;

/// JSON record of a finished trick, for logs and hand histories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrickSnapshot {
    pub plays: Vec<Play>,
    pub points: u32,
    pub winning_index: usize,
}

impl TrickSnapshot {
    pub fn capture(trick: &Trick) -> Self {
        TrickSnapshot {
            plays: trick.plays().to_vec(),
            points: trick.points(),
            winning_index: trick.winning_index(),
        }
    }

    /// Rebuilds the trick by replaying every play, then checks the recorded
    /// totals against the rebuilt trick.
    pub fn restore(self) -> Result<Trick, SnapshotError> {
        let trick = Trick::try_from(self.plays).map_err(SnapshotError::Replay)?;
        if trick.points() != self.points {
            return Err(SnapshotError::PointsMismatch {
                recorded: self.points,
                actual: trick.points(),
            });
        }
        if trick.winning_index() != self.winning_index {
            return Err(SnapshotError::WinnerMismatch {
                recorded: self.winning_index,
                actual: trick.winning_index(),
            });
        }
        Ok(trick)
    }

    pub fn to_json(trick: &Trick) -> serde_json::Result<String> {
        let snapshot = Self::capture(trick);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    Replay(TrickError),
    PointsMismatch { recorded: u32, actual: u32 },
    WinnerMismatch { recorded: usize, actual: usize },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Replay(err) => write!(f, "recorded plays do not replay: {err}"),
            SnapshotError::PointsMismatch { recorded, actual } => {
                write!(f, "snapshot records {recorded} points but the plays hold {actual}")
            }
            SnapshotError::WinnerMismatch { recorded, actual } => write!(
                f,
                "snapshot records play {recorded} as the winner but replay gives {actual}"
            ),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Replay(err) => Some(err),
            _ => None,
        }
    }
}
