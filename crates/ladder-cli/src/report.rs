//! Command results, printable as text or JSON.

use std::fmt;

use ladder_core::{
    ClanRole, LadderConfig, Placement, Rank, ReputationRank, ReputationUpdate,
};
use serde::Serialize;

/// The outcome of one `ladder` subcommand.
#[derive(Debug, Serialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum Report {
    Rank {
        points: i64,
        placement: Placement,
    },
    Award {
        winner: Rank,
        loser: Rank,
        points: u32,
    },
    Reputation {
        score: i64,
        rank: ReputationRank,
    },
    Event {
        previous: i64,
        #[serde(flatten)]
        update: ReputationUpdate,
    },
    CanRemove {
        actor: ClanRole,
        target: ClanRole,
        allowed: bool,
    },
    CanChangeRole {
        actor: ClanRole,
        current: ClanRole,
        new: ClanRole,
        allowed: bool,
    },
    Table {
        bands: Vec<BandRow>,
    },
}

/// One row of the `table` listing.
#[derive(Debug, Serialize)]
pub struct BandRow {
    pub placement: Placement,
    pub min_points: u64,
    pub max_points: Option<u64>,
}

impl Report {
    pub fn table(config: &LadderConfig) -> Self {
        let bands = config
            .tiers
            .bands()
            .map(|(placement, band)| BandRow {
                placement,
                min_points: band.min_points,
                max_points: band.max_points,
            })
            .collect();
        Report::Table { bands }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn verdict(allowed: bool) -> &'static str {
    if allowed {
        "allowed"
    } else {
        "denied"
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Rank { points, placement } => write!(f, "{} points: {}", points, placement),
            Report::Award {
                winner,
                loser,
                points,
            } => write!(f, "{} beating {}: +{} points", winner, loser, points),
            Report::Reputation { score, rank } => write!(f, "reputation {}: {}", score, rank),
            Report::Event { previous, update } => write!(
                f,
                "reputation {} {:+} = {}: {}",
                previous, update.delta, update.score, update.rank
            ),
            Report::CanRemove {
                actor,
                target,
                allowed,
            } => write!(f, "{} removing {}: {}", actor, target, verdict(*allowed)),
            Report::CanChangeRole {
                actor,
                current,
                new,
                allowed,
            } => write!(
                f,
                "{} moving {} to {}: {}",
                actor,
                current,
                new,
                verdict(*allowed)
            ),
            Report::Table { bands } => {
                for (i, row) in bands.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    match row.max_points {
                        Some(max) => write!(
                            f,
                            "{:<16} {:>6} - {}",
                            row.placement.to_string(),
                            row.min_points,
                            max - 1
                        )?,
                        None => write!(
                            f,
                            "{:<16} {:>6} +",
                            row.placement.to_string(),
                            row.min_points
                        )?,
                    }
                }
                Ok(())
            }
        }
    }
}
