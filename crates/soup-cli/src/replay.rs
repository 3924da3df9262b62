use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use soup_core::game::serialization::TrickSnapshot;
use soup_core::model::card::{CardError, parse_cards};
use soup_core::model::trick::{TrickBuilder, TrickError};
use soup_core::play::Play;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{PASS_KEYWORD, ReplayConfig, ResolvedOutputs, TrickScript};

/// Replays every scripted trick and streams one JSONL row per trick.
pub struct ReplayRunner {
    config: ReplayConfig,
    outputs: ResolvedOutputs,
}

/// Summary details returned after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    pub tricks_replayed: usize,
    pub finalized: usize,
    pub open: usize,
    pub rejected: usize,
    pub jsonl_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrickStatus {
    /// Closed by three passes.
    Finalized,
    /// Every play was legal but the script stopped before three passes.
    Open,
    /// A play broke the rules or did not parse.
    Rejected,
}

/// One JSONL row.
#[derive(Debug, Clone, Serialize)]
pub struct TrickRow {
    pub run_id: String,
    pub name: String,
    pub status: TrickStatus,
    pub points: u32,
    pub plays: Vec<Play>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<TrickSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReplayRunner {
    pub fn new(config: ReplayConfig, outputs: ResolvedOutputs) -> Self {
        Self { config, outputs }
    }

    /// Execute the replay, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<ReplaySummary, ReplayError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);

        let mut summary = ReplaySummary {
            tricks_replayed: 0,
            finalized: 0,
            open: 0,
            rejected: 0,
            jsonl_path: self.outputs.jsonl.clone(),
        };

        for script in &self.config.tricks {
            let row = replay_trick(&self.config.run_id, script);
            match row.status {
                TrickStatus::Finalized => summary.finalized += 1,
                TrickStatus::Open => summary.open += 1,
                TrickStatus::Rejected => summary.rejected += 1,
            }
            summary.tricks_replayed += 1;
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
        }

        writer.flush()?;
        Ok(summary)
    }
}

/// Replays a single script. Rule violations end up in the row, not in an
/// `Err`, so one bad script does not stop the run.
pub fn replay_trick(run_id: &str, script: &TrickScript) -> TrickRow {
    let mut row = TrickRow {
        run_id: run_id.to_string(),
        name: script.name.clone(),
        status: TrickStatus::Rejected,
        points: 0,
        plays: Vec::new(),
        snapshot: None,
        error: None,
    };

    let builder = match build_trick(script) {
        Ok(builder) => builder,
        Err(failure) => {
            event!(
                target: "soup_cli::replay",
                Level::WARN,
                trick = %script.name,
                error = %failure.error,
                "trick rejected"
            );
            if let Some(builder) = failure.partial {
                row.points = builder.points_so_far();
                row.plays = builder.plays().to_vec();
            }
            row.error = Some(failure.error.to_string());
            return row;
        }
    };

    row.points = builder.points_so_far();
    row.plays = builder.plays().to_vec();
    match builder.finalize() {
        Ok(trick) => {
            event!(
                target: "soup_cli::replay",
                Level::INFO,
                trick = %script.name,
                plays = trick.len(),
                points = trick.points(),
                winner = %trick.winning_play(),
                "trick finalized"
            );
            row.status = TrickStatus::Finalized;
            row.snapshot = Some(TrickSnapshot::capture(&trick));
        }
        Err(err) => {
            event!(
                target: "soup_cli::replay",
                Level::INFO,
                trick = %script.name,
                consecutive_passes = err.into_builder().consecutive_passes(),
                "trick left open"
            );
            row.status = TrickStatus::Open;
        }
    }
    row
}

struct ScriptFailure {
    error: ReplayError,
    partial: Option<TrickBuilder>,
}

fn build_trick(script: &TrickScript) -> Result<TrickBuilder, ScriptFailure> {
    let lead = parse_play(&script.lead).map_err(|error| ScriptFailure {
        error,
        partial: None,
    })?;
    let mut builder = TrickBuilder::begin(lead).map_err(|err| ScriptFailure {
        error: err.into(),
        partial: None,
    })?;

    for text in &script.plays {
        let step = parse_play(text).and_then(|play| {
            builder.add_play(play)?;
            Ok(())
        });
        if let Err(error) = step {
            return Err(ScriptFailure {
                error,
                partial: Some(builder),
            });
        }
    }
    Ok(builder)
}

/// Reads a script entry: `pass`, or a card list taken as its first
/// recognised shape.
pub fn parse_play(text: &str) -> Result<Play, ReplayError> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case(PASS_KEYWORD) {
        return Ok(Play::pass());
    }
    let cards = parse_cards(trimmed)?;
    if cards.is_empty() {
        return Err(ReplayError::NoShape {
            text: trimmed.to_string(),
        });
    }
    Play::from_cards(&cards).ok_or_else(|| ReplayError::NoShape {
        text: trimmed.to_string(),
    })
}

fn ensure_parent(path: Option<&Path>) -> Result<(), ReplayError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("{0}")]
    Card(#[from] CardError),
    #[error("'{text}' does not form any play")]
    NoShape { text: String },
    #[error("{0}")]
    Trick(#[from] TrickError),
}
