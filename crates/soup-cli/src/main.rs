use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use serde_json::json;
use soup_core::model::deck::Deck;
use soup_core::{classify, parse_cards};

use soup_cli::config::{ReplayConfig, ResolvedOutputs};
use soup_cli::logging::init_logging;
use soup_cli::replay::ReplayRunner;

/// Rules harness for the two-deck climbing game.
#[derive(Debug, Parser)]
#[command(
    name = "hotsoup",
    author,
    version,
    about = "Classify plays, deal hands and replay scripted tricks"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every shape a set of cards forms, in recognition order.
    Classify {
        /// Cards such as `5H 5C` or `LJ`; separate arguments are joined.
        #[arg(required = true, value_name = "CARDS")]
        cards: Vec<String>,

        /// Print the plays as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Replay the tricks scripted in a YAML file and write JSONL rows.
    Replay {
        /// Path to the YAML configuration file.
        #[arg(short, long, value_name = "FILE", default_value = "replay.yaml")]
        config: PathBuf,

        /// Override the run identifier (substitutes {run_id} templates).
        #[arg(long, value_name = "RUN_ID")]
        run_id: Option<String>,

        /// Exit after validating the configuration (no tricks are replayed).
        #[arg(long)]
        validate_only: bool,
    },
    /// Shuffle both decks and deal four hands.
    Deal {
        /// RNG seed for the shuffle; a random seed is drawn when omitted.
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,

        /// Print the deal as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Classify { cards, json } => run_classify(&cards.join(" "), json),
        Command::Replay {
            config,
            run_id,
            validate_only,
        } => run_replay(config, run_id, validate_only),
        Command::Deal { seed, json } => run_deal(seed, json),
    }
}

fn run_classify(text: &str, as_json: bool) -> anyhow::Result<()> {
    let cards = parse_cards(text).with_context(|| format!("parsing cards '{text}'"))?;
    let plays = classify(&cards);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&plays)?);
        return Ok(());
    }
    if plays.is_empty() {
        bail!("'{text}' does not form any play");
    }
    for play in &plays {
        println!("{play}");
    }
    Ok(())
}

fn run_replay(
    path: PathBuf,
    run_id: Option<String>,
    validate_only: bool,
) -> anyhow::Result<()> {
    let mut config = ReplayConfig::from_path(&path)?;

    if let Some(run_id) = run_id {
        config.run_id = run_id;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let trick_count = config.tricks.len();

    println!(
        "Loaded configuration '{run_id}' with {trick_count} trick{}",
        if trick_count == 1 { "" } else { "s" }
    );

    let logging_guard = init_logging(&config.logging, &outputs)?;

    if validate_only {
        println!("Validation-only mode: replay skipped.");
        return Ok(());
    }

    let summary = ReplayRunner::new(config, outputs).run()?;
    println!(
        "Replay complete for '{run_id}': {} tricks ({} finalized, {} open, {} rejected) -> {}",
        summary.tricks_replayed,
        summary.finalized,
        summary.open,
        summary.rejected,
        summary.jsonl_path.display()
    );
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }
    Ok(())
}

fn run_deal(seed: Option<u64>, as_json: bool) -> anyhow::Result<()> {
    let seed = seed.unwrap_or_else(rand::random);
    let deal = Deck::shuffled_with_seed(seed).deal();

    if as_json {
        let hands: Vec<Vec<String>> = deal
            .hands
            .iter()
            .map(|hand| hand.iter().map(ToString::to_string).collect())
            .collect();
        let undealt: Vec<String> = deal.undealt.iter().map(ToString::to_string).collect();
        let value = json!({ "seed": seed, "hands": hands, "undealt": undealt });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Seed {seed}");
    for (seat, hand) in deal.hands.iter().enumerate() {
        let cards: Vec<String> = hand.iter().map(ToString::to_string).collect();
        println!("Seat {seat}: {}", cards.join(" "));
    }
    let undealt: Vec<String> = deal.undealt.iter().map(ToString::to_string).collect();
    println!("Undealt: {}", undealt.join(" "));
    Ok(())
}
