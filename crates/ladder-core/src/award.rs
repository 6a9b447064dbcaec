//! Rank points awarded to the winner of a 1v1 match.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rank::Rank;

/// Errors raised by an inconsistent award policy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AwardPolicyError {
    #[error("award floor {floor} exceeds base award {base}")]
    FloorAboveBase { floor: u32, base: u32 },
}

/// How many points a win is worth, given the rank gap.
///
/// Beating a stronger rank pays `base + upset_bonus`. Beating a weaker rank
/// pays `base - gap_penalty * gap`, never less than `floor`. Equal ranks pay
/// `base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchAwardPolicy {
    pub base: u32,
    pub upset_bonus: u32,
    pub gap_penalty: u32,
    pub floor: u32,
}

impl Default for MatchAwardPolicy {
    fn default() -> Self {
        Self {
            base: 20,
            upset_bonus: 15,
            gap_penalty: 3,
            floor: 5,
        }
    }
}

impl MatchAwardPolicy {
    pub fn validate(&self) -> Result<(), AwardPolicyError> {
        if self.floor > self.base {
            return Err(AwardPolicyError::FloorAboveBase {
                floor: self.floor,
                base: self.base,
            });
        }
        Ok(())
    }

    /// Points credited to the winner.
    pub fn points_for_match(&self, winner: Rank, loser: Rank) -> u32 {
        let diff = winner.gap(loser);
        match diff {
            d if d < 0 => self.base.saturating_add(self.upset_bonus),
            0 => self.base,
            d => {
                let penalty = self.gap_penalty.saturating_mul(d as u32);
                self.base.saturating_sub(penalty).max(self.floor)
            }
        }
    }
}

/// Adds a signed delta to a stored point total without going below zero.
pub fn apply_points(current: u64, delta: i64) -> u64 {
    current.saturating_add_signed(delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn same_rank_pays_base() {
        let policy = MatchAwardPolicy::default();
        assert_eq!(policy.points_for_match(Rank::Adept, Rank::Adept), 20);
        assert_eq!(policy.points_for_match(Rank::Eternal, Rank::Eternal), 20);
    }

    #[test]
    fn upset_pays_flat_bonus() {
        let policy = MatchAwardPolicy::default();
        assert_eq!(policy.points_for_match(Rank::Novice, Rank::Adept), 35);
        assert_eq!(policy.points_for_match(Rank::Novice, Rank::Eternal), 35);
    }

    #[test]
    fn expected_win_scales_down_to_floor() {
        let policy = MatchAwardPolicy::default();
        assert_eq!(policy.points_for_match(Rank::Adept, Rank::Novice), 17);
        assert_eq!(policy.points_for_match(Rank::Trailblazer, Rank::Novice), 14);
        assert_eq!(policy.points_for_match(Rank::Luminary, Rank::Novice), 8);
        assert_eq!(policy.points_for_match(Rank::Paragon, Rank::Novice), 5);
        assert_eq!(policy.points_for_match(Rank::Eternal, Rank::Novice), 5);
    }

    #[test]
    fn floor_must_not_exceed_base() {
        let policy = MatchAwardPolicy {
            floor: 30,
            ..MatchAwardPolicy::default()
        };
        assert_eq!(
            policy.validate(),
            Err(AwardPolicyError::FloorAboveBase { floor: 30, base: 20 })
        );
        assert!(MatchAwardPolicy::default().validate().is_ok());
    }

    #[test]
    fn apply_points_saturates() {
        assert_eq!(apply_points(10, 25), 35);
        assert_eq!(apply_points(10, -25), 0);
        assert_eq!(apply_points(u64::MAX, 1), u64::MAX);
    }

    proptest! {
        #[test]
        fn award_never_below_floor(w in 0u8..7, l in 0u8..7) {
            let policy = MatchAwardPolicy::default();
            let winner = Rank::from_ordinal(w).unwrap();
            let loser = Rank::from_ordinal(l).unwrap();
            prop_assert!(policy.points_for_match(winner, loser) >= policy.floor);
        }
    }
}
