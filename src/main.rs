//! Triad League CLI
//!
//! Replays, verifies and hashes match transcripts from JSON files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::DateTime;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use triad_league::{
    core::hash::{parse_hex, to_hex},
    game::board::PlayerIndex,
    match_id, ruleset_id, simulate_match, simulate_match_with_history, verify_replay, CardCatalog, MatchResult,
    RulesetConfig, Transcript, VERSION,
};

#[derive(Parser)]
#[command(name = "triad-league")]
#[command(version, about = "Replay and verify Triad League match transcripts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a transcript and print the result
    Simulate {
        /// Transcript JSON file
        transcript: PathBuf,

        /// Card data JSON file (array of cards)
        #[arg(long, env = "TRIAD_CARDS")]
        cards: PathBuf,

        /// Ruleset JSON file; plain rules when omitted
        #[arg(long, env = "TRIAD_RULESET")]
        ruleset: Option<PathBuf>,

        /// Print the board after every turn
        #[arg(long, default_value = "false")]
        history: bool,

        /// Print the full result as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Replay a transcript and check a claimed match id
    Verify {
        /// Transcript JSON file
        transcript: PathBuf,

        /// Card data JSON file (array of cards)
        #[arg(long, env = "TRIAD_CARDS")]
        cards: PathBuf,

        /// Ruleset JSON file; plain rules when omitted
        #[arg(long, env = "TRIAD_RULESET")]
        ruleset: Option<PathBuf>,

        /// Claimed match id (0x-prefixed hex)
        #[arg(long)]
        claimed: String,
    },

    /// Print the match id of a transcript
    Hash {
        /// Transcript JSON file
        transcript: PathBuf,
    },

    /// Print the id of a ruleset config
    RulesetId {
        /// Ruleset JSON file; plain rules when omitted
        ruleset: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to set tracing subscriber")?;

    let cli = Cli::parse();
    info!("Triad League v{}", VERSION);

    match cli.command {
        Commands::Simulate {
            transcript,
            cards,
            ruleset,
            history,
            json,
        } => {
            let transcript = load_transcript(&transcript)?;
            let cards = load_cards(&cards)?;
            let ruleset = load_ruleset(ruleset.as_deref())?;
            log_header(&transcript);

            if history {
                let full = simulate_match_with_history(&transcript, &cards, &ruleset)
                    .context("simulation failed")?;
                for (i, snapshot) in full.board_history.iter().enumerate() {
                    println!("after {} turn(s): {}", i, to_hex(&snapshot.state_hash()));
                    print_cells(snapshot.cells.iter().map(|c| c.map(|c| c.owner)));
                }
                print_result(&full.result, json)?;
            } else {
                let result = simulate_match(&transcript, &cards, &ruleset).context("simulation failed")?;
                print_result(&result, json)?;
            }
        }

        Commands::Verify {
            transcript,
            cards,
            ruleset,
            claimed,
        } => {
            let transcript = load_transcript(&transcript)?;
            let cards = load_cards(&cards)?;
            let ruleset = load_ruleset(ruleset.as_deref())?;
            let claimed: [u8; 32] = parse_hex(&claimed).context("claimed match id must be 32 bytes of hex")?;

            let v = verify_replay(&transcript, &cards, &claimed, &ruleset).context("replay failed")?;
            println!("computed: {}", to_hex(&v.computed_match_id));
            println!("claimed:  {}", to_hex(&v.expected_match_id));
            println!("winner:   {:?} ({} - {})", v.winner, v.tiles.a, v.tiles.b);
            if !v.ok {
                bail!("match id mismatch");
            }
            println!("OK");
        }

        Commands::Hash { transcript } => {
            let transcript = load_transcript(&transcript)?;
            println!("{}", to_hex(&match_id(&transcript)));
        }

        Commands::RulesetId { ruleset } => {
            let ruleset = load_ruleset(ruleset.as_deref())?;
            println!("{}", to_hex(&ruleset_id(&ruleset)));
        }
    }

    Ok(())
}

fn load_transcript(path: &Path) -> Result<Transcript> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Transcript::from_json(&json).with_context(|| format!("parsing transcript {}", path.display()))
}

fn load_cards(path: &Path) -> Result<CardCatalog> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let catalog = CardCatalog::from_json(&json).with_context(|| format!("parsing cards {}", path.display()))?;
    info!("Loaded {} cards", catalog.len());
    Ok(catalog)
}

fn load_ruleset(path: Option<&Path>) -> Result<RulesetConfig> {
    let Some(path) = path else {
        return Ok(RulesetConfig::default());
    };
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    RulesetConfig::from_json(&json).with_context(|| format!("parsing ruleset {}", path.display()))
}

fn log_header(transcript: &Transcript) {
    let h = &transcript.header;
    info!("Season {} / ruleset {}", h.season_id, to_hex(&h.ruleset_id));
    info!("{:?} vs {:?}", h.player_a, h.player_b);
    match DateTime::from_timestamp(h.deadline as i64, 0) {
        Some(deadline) => info!("Deadline: {}", deadline.to_rfc3339()),
        None => info!("Deadline: {} (out of range)", h.deadline),
    }
}

fn print_cells(cells: impl Iterator<Item = Option<PlayerIndex>>) {
    let marks: Vec<&str> = cells
        .map(|owner| match owner {
            Some(PlayerIndex::A) => "A",
            Some(PlayerIndex::B) => "B",
            None => ".",
        })
        .collect();
    for row in marks.chunks(3) {
        println!("  {}", row.join(" "));
    }
}

fn print_result(result: &MatchResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("=== Match Result ===");
    println!("match id: {}", to_hex(&result.match_id));
    for turn in &result.turns {
        println!(
            "turn {}: {:?} card {} -> cell {} ({} flip(s){})",
            turn.turn,
            turn.player,
            turn.card_index,
            turn.cell,
            turn.flip_count,
            if turn.has_chain() { ", chain" } else { "" }
        );
    }
    print_cells(
        (0..triad_league::BOARD_CELLS as u8).map(|cell| result.board.get(cell).map(|p| p.owner)),
    );
    println!(
        "winner: {:?} ({} - {}, decided by {:?})",
        result.winner, result.tiles.a, result.tiles.b, result.tie_break
    );
    Ok(())
}
