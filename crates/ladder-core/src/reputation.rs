//! Reputation: a fair-play score and the trust tier derived from it.
//!
//! The score starts at zero, can go negative, and moves only through
//! [`ReputationEvent`]s. The tier is recomputed from the score every time;
//! it is never stored independently.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tag::string_tag;

/// Trust tier, least trusted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReputationRank {
    Unreliable,
    Unfair,
    GoodPlayer,
    Trustworthy,
}

impl ReputationRank {
    pub const ALL: [ReputationRank; 4] = [
        ReputationRank::Unreliable,
        ReputationRank::Unfair,
        ReputationRank::GoodPlayer,
        ReputationRank::Trustworthy,
    ];

    /// Trust ordinal (Unreliable = 0, Trustworthy = 3).
    #[inline]
    pub const fn ordinal(self) -> u8 {
        match self {
            ReputationRank::Unreliable => 0,
            ReputationRank::Unfair => 1,
            ReputationRank::GoodPlayer => 2,
            ReputationRank::Trustworthy => 3,
        }
    }
}

string_tag!(ReputationRank, "reputation rank", {
    ReputationRank::Unreliable => "Unreliable",
    ReputationRank::Unfair => "Unfair",
    ReputationRank::GoodPlayer => "Good Player",
    ReputationRank::Trustworthy => "Trustworthy",
});

impl Ord for ReputationRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl PartialOrd for ReputationRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Behavioural events that move a player's reputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ReputationEvent {
    /// The player walked away from a match in progress.
    MatchAbandoned,
    /// The player reported a result that turned out to be false.
    /// `offense_count` includes this offense (1 = first time).
    FalseResult { offense_count: u32 },
    /// A self-reported win that nobody disputed.
    FairMatch,
}

/// Errors raised by an inconsistent reputation policy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("reputation thresholds must ascend: unfair {unfair} < good player {good_player} < trustworthy {trustworthy}")]
    ThresholdOrder {
        unfair: i64,
        good_player: i64,
        trustworthy: i64,
    },

    #[error("false result penalty ladder is empty")]
    EmptyPenaltyLadder,
}

/// Lower bounds (inclusive) of each tier above Unreliable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReputationThresholds {
    pub unfair_from: i64,
    pub good_player_from: i64,
    pub trustworthy_from: i64,
}

impl Default for ReputationThresholds {
    fn default() -> Self {
        Self {
            unfair_from: -10,
            good_player_from: 0,
            trustworthy_from: 50,
        }
    }
}

impl ReputationThresholds {
    pub fn rank(&self, score: i64) -> ReputationRank {
        if score < self.unfair_from {
            ReputationRank::Unreliable
        } else if score < self.good_player_from {
            ReputationRank::Unfair
        } else if score < self.trustworthy_from {
            ReputationRank::GoodPlayer
        } else {
            ReputationRank::Trustworthy
        }
    }
}

/// Score after an event, with the tier re-derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationUpdate {
    pub delta: i64,
    pub score: i64,
    pub rank: ReputationRank,
}

/// Event deltas and tier thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReputationPolicy {
    pub thresholds: ReputationThresholds,
    pub abandon_penalty: i64,
    /// Penalty by offense number; offenses past the end reuse the last entry.
    pub false_result_penalties: Vec<i64>,
    pub fair_match_reward: i64,
}

impl Default for ReputationPolicy {
    fn default() -> Self {
        Self {
            thresholds: ReputationThresholds::default(),
            abandon_penalty: -2,
            false_result_penalties: vec![-5, -10, -15],
            fair_match_reward: 10,
        }
    }
}

impl ReputationPolicy {
    pub fn validate(&self) -> Result<(), PolicyError> {
        let t = &self.thresholds;
        if !(t.unfair_from < t.good_player_from && t.good_player_from < t.trustworthy_from) {
            return Err(PolicyError::ThresholdOrder {
                unfair: t.unfair_from,
                good_player: t.good_player_from,
                trustworthy: t.trustworthy_from,
            });
        }
        if self.false_result_penalties.is_empty() {
            return Err(PolicyError::EmptyPenaltyLadder);
        }
        Ok(())
    }

    /// Trust tier for a score.
    pub fn reputation_rank(&self, score: i64) -> ReputationRank {
        self.thresholds.rank(score)
    }

    /// Penalty for the `offense_count`-th false result. Zero counts as the
    /// first offense; anything past the ladder stays at the last step.
    pub fn false_result_penalty(&self, offense_count: u32) -> i64 {
        let last = self.false_result_penalties.len().saturating_sub(1);
        let index = (offense_count.max(1) as usize - 1).min(last);
        self.false_result_penalties.get(index).copied().unwrap_or(0)
    }

    /// Score change caused by an event.
    pub fn delta(&self, event: ReputationEvent) -> i64 {
        match event {
            ReputationEvent::MatchAbandoned => self.abandon_penalty,
            ReputationEvent::FalseResult { offense_count } => {
                self.false_result_penalty(offense_count)
            }
            ReputationEvent::FairMatch => self.fair_match_reward,
        }
    }

    /// Applies an event to a previously stored score.
    pub fn apply(&self, score: i64, event: ReputationEvent) -> ReputationUpdate {
        let delta = self.delta(event);
        let new_score = score.saturating_add(delta);
        let rank = self.reputation_rank(new_score);
        let previous = self.reputation_rank(score);
        if rank != previous {
            tracing::debug!(from = %previous, to = %rank, score = new_score, "reputation tier changed");
        }
        ReputationUpdate {
            delta,
            score: new_score,
            rank,
        }
    }
}
