//! Player standing and the read-compute-write composition callers perform.
//!
//! [`Ladder`] does not persist anything. It takes the values a caller has
//! just loaded, runs them through the engines, and leaves the updated
//! values in place for the caller to write back. Two concurrent updates to
//! the same player must be serialised by whoever owns the store.

use serde::{Deserialize, Serialize};

use crate::award::apply_points;
use crate::config::LadderConfig;
use crate::rank::Placement;
use crate::reputation::{ReputationEvent, ReputationRank, ReputationUpdate};

/// The persisted ladder state of one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStanding {
    pub rank_points: u64,
    pub reputation: i64,
    pub matches_played: u32,
    pub matches_won: u32,
    pub matches_lost: u32,
    /// Confirmed false result reports so far.
    pub false_result_offenses: u32,
}

impl PlayerStanding {
    /// A freshly registered player: everything at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of played matches won, 0.0 before the first match.
    pub fn win_rate(&self) -> f64 {
        if self.matches_played == 0 {
            return 0.0;
        }
        self.matches_won as f64 / self.matches_played as f64
    }
}

/// What a resolved match changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSettlement {
    pub points_awarded: u32,
    pub winner_before: Placement,
    pub winner_after: Placement,
    pub loser_placement: Placement,
    pub winner_reputation: ReputationUpdate,
}

impl MatchSettlement {
    pub fn promoted(&self) -> bool {
        self.winner_after > self.winner_before
    }
}

/// The three engines bound to one configuration.
#[derive(Debug, Clone, Default)]
pub struct Ladder {
    config: LadderConfig,
}

impl Ladder {
    pub fn new(config: LadderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LadderConfig {
        &self.config
    }

    pub fn placement(&self, standing: &PlayerStanding) -> Placement {
        self.config
            .tiers
            .rank_for_points(i64::try_from(standing.rank_points).unwrap_or(i64::MAX))
    }

    pub fn reputation_rank(&self, standing: &PlayerStanding) -> ReputationRank {
        self.config.reputation.reputation_rank(standing.reputation)
    }

    /// Settles an undisputed 1v1 result.
    ///
    /// The winner's award is computed from both players' ranks before the
    /// match. Losing costs no points. The winner also earns the fair-match
    /// reputation reward.
    pub fn resolve_match(
        &self,
        winner: &mut PlayerStanding,
        loser: &mut PlayerStanding,
    ) -> MatchSettlement {
        let winner_before = self.placement(winner);
        let loser_placement = self.placement(loser);
        let points_awarded = self
            .config
            .awards
            .points_for_match(winner_before.rank, loser_placement.rank);

        winner.rank_points = apply_points(winner.rank_points, points_awarded as i64);
        winner.matches_played = winner.matches_played.saturating_add(1);
        winner.matches_won = winner.matches_won.saturating_add(1);
        loser.matches_played = loser.matches_played.saturating_add(1);
        loser.matches_lost = loser.matches_lost.saturating_add(1);

        let winner_reputation = self.apply_event(winner, ReputationEvent::FairMatch);
        let winner_after = self.placement(winner);
        if winner_after != winner_before {
            tracing::info!(from = %winner_before, to = %winner_after, "winner changed division");
        }

        MatchSettlement {
            points_awarded,
            winner_before,
            winner_after,
            loser_placement,
            winner_reputation,
        }
    }

    pub fn record_abandon(&self, standing: &mut PlayerStanding) -> ReputationUpdate {
        self.apply_event(standing, ReputationEvent::MatchAbandoned)
    }

    /// Counts a new false result report and applies its escalating penalty.
    pub fn record_false_result(&self, standing: &mut PlayerStanding) -> ReputationUpdate {
        standing.false_result_offenses = standing.false_result_offenses.saturating_add(1);
        let event = ReputationEvent::FalseResult {
            offense_count: standing.false_result_offenses,
        };
        self.apply_event(standing, event)
    }

    fn apply_event(
        &self,
        standing: &mut PlayerStanding,
        event: ReputationEvent,
    ) -> ReputationUpdate {
        let update = self.config.reputation.apply(standing.reputation, event);
        standing.reputation = update.score;
        update
    }
}
