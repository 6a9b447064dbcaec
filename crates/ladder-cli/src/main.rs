//! ladder - evaluate rank, reputation and clan rules from the command line.
//!
//! Reads the ladder configuration from `ladder.toml` (or `--config`), falling
//! back to the standard ladder when the file is absent.

mod report;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use ladder_core::{can_change_role, can_remove, ClanRole, LadderConfig, Rank, ReputationEvent};
use report::Report;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ladder")]
#[command(about = "Rank, reputation and clan rule calculator")]
struct Cli {
    /// Path to the ladder configuration file
    #[arg(long, global = true, default_value = "ladder.toml")]
    config: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up the rank and division for a point total
    Rank {
        #[arg(allow_hyphen_values = true)]
        points: i64,
    },
    /// Points awarded to the winner of a match
    Award {
        /// Winner's rank (e.g. Novice)
        winner: Rank,
        /// Loser's rank
        loser: Rank,
    },
    /// Trust tier for a reputation score
    Reputation {
        #[arg(allow_hyphen_values = true)]
        score: i64,
    },
    /// Apply a behaviour event to a reputation score
    Event {
        kind: EventKind,
        /// Current reputation score
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        score: i64,
        /// Offense number for false results (1 = first)
        #[arg(long, default_value = "1")]
        offense: u32,
    },
    /// Whether one clan role may remove another
    CanRemove { actor: ClanRole, target: ClanRole },
    /// Whether one clan role may move a member between roles
    CanChangeRole {
        actor: ClanRole,
        current: ClanRole,
        new: ClanRole,
    },
    /// List every division band in the tier table
    Table,
}

#[derive(Clone, Copy, ValueEnum)]
enum EventKind {
    Abandon,
    FalseResult,
    FairMatch,
}

impl EventKind {
    fn event(self, offense_count: u32) -> ReputationEvent {
        match self {
            EventKind::Abandon => ReputationEvent::MatchAbandoned,
            EventKind::FalseResult => ReputationEvent::FalseResult { offense_count },
            EventKind::FairMatch => ReputationEvent::FairMatch,
        }
    }
}

fn run(command: Commands, config: &LadderConfig) -> Report {
    match command {
        Commands::Rank { points } => Report::Rank {
            points,
            placement: config.tiers.rank_for_points(points),
        },
        Commands::Award { winner, loser } => Report::Award {
            winner,
            loser,
            points: config.awards.points_for_match(winner, loser),
        },
        Commands::Reputation { score } => Report::Reputation {
            score,
            rank: config.reputation.reputation_rank(score),
        },
        Commands::Event {
            kind,
            score,
            offense,
        } => Report::Event {
            previous: score,
            update: config.reputation.apply(score, kind.event(offense)),
        },
        Commands::CanRemove { actor, target } => Report::CanRemove {
            actor,
            target,
            allowed: can_remove(actor, target),
        },
        Commands::CanChangeRole {
            actor,
            current,
            new,
        } => Report::CanChangeRole {
            actor,
            current,
            new,
            allowed: can_change_role(actor, current, new),
        },
        Commands::Table => Report::table(config),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let config = LadderConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    let report = run(cli.command, &config);
    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
