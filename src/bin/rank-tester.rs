//! Rank Tester CLI Tool
//!
//! Offline command-line tool for exercising the ranking formula without
//! running the service.
//!
//! Usage:
//!   cargo run --bin rank-tester -- --help
//!   cargo run --bin rank-tester rank --wins 31 --games 47 --goals 23 --assists 18
//!   cargo run --bin rank-tester rank --wins 31 --games 47 --goals 23 --assists 18 --json
//!   cargo run --bin rank-tester batch --file players.json
//!   cargo run --bin rank-tester thresholds

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pitch_rank::config::ScoringConfig;
use pitch_rank::ranking::RankingEngine;
use pitch_rank::types::{PlayerStats, RankTier};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rank-tester")]
#[command(about = "Offline ranking calculator for pitch-rank player statistics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Optional scoring config file (TOML, [scoring] section of the service config)
    #[arg(long, value_name = "FILE")]
    scoring: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank a single stats tuple
    Rank {
        /// Games won
        #[arg(short, long)]
        wins: u64,
        /// Games played
        #[arg(short, long)]
        games: u64,
        /// Goals scored
        #[arg(long)]
        goals: u64,
        /// Assists made
        #[arg(short, long)]
        assists: u64,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Rank every player in a JSON file ({"name": {"wins": .., ...}, ...})
    Batch {
        /// Path to the players file
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Print the tier thresholds and labels
    Thresholds,
}

#[derive(Deserialize)]
struct ScoringFile {
    #[serde(default)]
    scoring: ScoringConfig,
}

fn load_engine(path: Option<&PathBuf>) -> Result<RankingEngine> {
    let config = match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read scoring config: {}", path.display()))?;
            let parsed: ScoringFile = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse scoring config: {}", path.display()))?;
            parsed.scoring
        }
        None => ScoringConfig::default(),
    };

    RankingEngine::new(config)
}

fn print_ranking(label: &str, engine: &RankingEngine, stats: &PlayerStats) {
    let result = engine.calculate(stats);
    println!(
        "{:<20} {:>5.1}  {}  {:<12} ({}W/{}G, {} goals, {} assists)",
        label,
        result.score,
        result.rank,
        result.rank.description(),
        stats.wins,
        stats.games_played,
        stats.goals,
        stats.assists,
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let engine = load_engine(cli.scoring.as_ref())?;

    match cli.command {
        Commands::Rank {
            wins,
            games,
            goals,
            assists,
            json,
        } => {
            let stats = PlayerStats::new(wins, games, goals, assists);
            let result = engine.calculate(&stats);

            if json {
                let breakdown = engine.breakdown(&stats);
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "stats": stats,
                        "score": result.score,
                        "rank": result.rank,
                        "color": result.rank.color(),
                        "description": result.rank.description(),
                        "breakdown": breakdown,
                    }))?
                );
            } else {
                print_ranking("player", &engine, &stats);
                if let Some(breakdown) = engine.breakdown(&stats) {
                    println!(
                        "  components: win rate {:.1}, goals {:.1}, assists {:.1}, volume {:.1}",
                        breakdown.win_rate,
                        breakdown.goals_norm,
                        breakdown.assists_norm,
                        breakdown.volume_norm
                    );
                }
            }
        }
        Commands::Batch { file } => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read players file: {}", file.display()))?;
            let players: std::collections::BTreeMap<String, PlayerStats> =
                serde_json::from_str(&contents)
                    .with_context(|| format!("Failed to parse players file: {}", file.display()))?;

            let mut ranked: Vec<_> = players
                .into_iter()
                .map(|(name, stats)| {
                    let score = engine.calculate(&stats).score;
                    (name, stats, score)
                })
                .collect();
            ranked.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

            for (name, stats, _) in &ranked {
                print_ranking(name, &engine, stats);
            }
        }
        Commands::Thresholds => {
            for tier in [RankTier::S, RankTier::A, RankTier::B, RankTier::C] {
                let floor = match tier {
                    RankTier::S => format!(">= {}", RankTier::S_THRESHOLD),
                    RankTier::A => format!(">= {}", RankTier::A_THRESHOLD),
                    RankTier::B => format!(">= {}", RankTier::B_THRESHOLD),
                    RankTier::C => format!("< {}", RankTier::B_THRESHOLD),
                };
                println!(
                    "{}  {:<8} {:<12} {}",
                    tier,
                    floor,
                    tier.description(),
                    tier.color()
                );
            }
        }
    }

    Ok(())
}
