//! The rank tier table: point intervals for every ladder position.
//!
//! The table partitions `[0, ∞)` into half-open division bands. It is
//! static configuration: changing a boundary reclassifies every stored
//! point total, so tables are validated once when built and never mutated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rank::{Division, Placement, Rank};

/// Points spanned by each rank in the standard table.
pub const POINTS_PER_RANK: u64 = 250;

/// Points spanned by each division in the standard table.
pub const POINTS_PER_DIVISION: u64 = POINTS_PER_RANK / 5;

/// Errors raised when a tier table does not partition the point line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TierTableError {
    /// The table lists no tiers at all.
    #[error("tier table has no tiers")]
    Empty,

    /// A tier lists no division bands.
    #[error("tier {0} has no divisions")]
    EmptyTier(Rank),

    /// The first band does not start at 0; carries its actual start.
    #[error("tier table must start at 0 points, first band starts at {0}")]
    NonZeroStart(u64),

    /// A tier does not rank strictly above the one before it.
    #[error("tiers out of order: {previous} listed before {next}")]
    TierOrder { previous: Rank, next: Rank },

    /// Divisions inside one tier are repeated or not listed V first to I last.
    #[error("{rank} divisions out of order: {previous} listed before {next}")]
    DivisionOrder {
        /// The tier holding the offending bands.
        rank: Rank,
        /// Division of the earlier band.
        previous: Division,
        /// Division of the band that should have come later.
        next: Division,
    },

    /// A bounded band whose maximum does not exceed its minimum.
    #[error("{placement}: band [{min}, {max}) is empty or inverted")]
    EmptyBand {
        placement: Placement,
        /// Inclusive lower bound of the band.
        min: u64,
        /// Exclusive upper bound of the band.
        max: u64,
    },

    /// A band does not start where the previous one ended.
    #[error("{placement} starts at {found}, expected {expected} (gap or overlap)")]
    Discontinuous {
        placement: Placement,
        /// Upper bound of the previous band.
        expected: u64,
        /// Lower bound actually listed.
        found: u64,
    },

    /// An open-ended band is followed by further bands.
    #[error("{0} is unbounded but is not the last band")]
    UnboundedNotLast(Placement),

    /// The highest band has an upper bound, leaving points unplaced.
    #[error("last band {0} must be unbounded")]
    BoundedLast(Placement),
}

/// Half-open point interval `[min_points, max_points)` for one division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionBand {
    /// Division this band places players into.
    pub division: Division,
    /// Inclusive lower bound.
    pub min_points: u64,
    /// Exclusive upper bound; `None` means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_points: Option<u64>,
}

impl DivisionBand {
    /// Returns true if `points` falls inside this band.
    #[inline]
    pub fn contains(&self, points: u64) -> bool {
        points >= self.min_points && self.max_points.map_or(true, |max| points < max)
    }
}

/// All division bands of one rank, in ascending point order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankTier {
    pub rank: Rank,
    pub divisions: Vec<DivisionBand>,
}

/// A validated, ordered list of rank tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RankTier>", into = "Vec<RankTier>")]
pub struct RankTierTable {
    tiers: Vec<RankTier>,
}

impl RankTierTable {
    /// Builds a table, checking that its bands partition `[0, ∞)`.
    pub fn new(tiers: Vec<RankTier>) -> Result<Self, TierTableError> {
        Self::validate(&tiers)?;
        Ok(Self { tiers })
    }

    /// The standard ladder: 250 points per rank, 50 per division, with
    /// Eternal I open-ended.
    pub fn standard() -> Self {
        let mut tiers = Vec::with_capacity(Rank::ALL.len());
        for rank in Rank::ALL {
            let base = rank.ordinal() as u64 * POINTS_PER_RANK;
            let divisions = Division::ALL
                .iter()
                .map(|&division| {
                    let min_points = base + division.ordinal() as u64 * POINTS_PER_DIVISION;
                    let last = rank == Rank::Eternal && division == Division::I;
                    DivisionBand {
                        division,
                        min_points,
                        max_points: (!last).then_some(min_points + POINTS_PER_DIVISION),
                    }
                })
                .collect();
            tiers.push(RankTier { rank, divisions });
        }
        Self { tiers }
    }

    /// The tiers in ascending order.
    pub fn tiers(&self) -> &[RankTier] {
        &self.tiers
    }

    /// Iterates over every band with its placement, lowest first.
    pub fn bands(&self) -> impl Iterator<Item = (Placement, &DivisionBand)> {
        self.tiers.iter().flat_map(|tier| {
            tier.divisions
                .iter()
                .map(move |band| (Placement::new(tier.rank, band.division), band))
        })
    }

    /// Lower bounds of every band except the first (which is always 0).
    pub fn boundaries(&self) -> Vec<u64> {
        self.bands().skip(1).map(|(_, band)| band.min_points).collect()
    }

    /// The highest position in the table.
    pub fn top(&self) -> Placement {
        self.bands()
            .last()
            .map(|(placement, _)| placement)
            .unwrap_or(Placement::new(Rank::Eternal, Division::I))
    }

    /// Looks up the ladder position for a point total.
    ///
    /// Negative totals are clamped to zero. A total no band contains falls
    /// back to the table's highest position.
    pub fn rank_for_points(&self, points: i64) -> Placement {
        let points = if points < 0 {
            tracing::debug!(points, "negative rank points clamped to 0");
            0
        } else {
            points as u64
        };

        for tier in &self.tiers {
            for band in &tier.divisions {
                if band.contains(points) {
                    return Placement::new(tier.rank, band.division);
                }
            }
        }

        let top = self.top();
        tracing::warn!(points, fallback = %top, "no tier band contains points");
        top
    }

    fn validate(tiers: &[RankTier]) -> Result<(), TierTableError> {
        if tiers.is_empty() {
            return Err(TierTableError::Empty);
        }

        let mut previous_rank: Option<Rank> = None;
        let mut expected_min = 0u64;
        let mut open_band: Option<Placement> = None;
        let mut last = None;

        for tier in tiers {
            if tier.divisions.is_empty() {
                return Err(TierTableError::EmptyTier(tier.rank));
            }
            if let Some(previous) = previous_rank {
                if tier.rank <= previous {
                    return Err(TierTableError::TierOrder {
                        previous,
                        next: tier.rank,
                    });
                }
            }
            previous_rank = Some(tier.rank);

            let mut previous_division: Option<Division> = None;
            for band in &tier.divisions {
                if let Some(previous) = previous_division {
                    if band.division <= previous {
                        return Err(TierTableError::DivisionOrder {
                            rank: tier.rank,
                            previous,
                            next: band.division,
                        });
                    }
                }
                previous_division = Some(band.division);

                let placement = Placement::new(tier.rank, band.division);
                if let Some(open) = open_band {
                    return Err(TierTableError::UnboundedNotLast(open));
                }
                if band.min_points != expected_min {
                    if last.is_none() {
                        return Err(TierTableError::NonZeroStart(band.min_points));
                    }
                    return Err(TierTableError::Discontinuous {
                        placement,
                        expected: expected_min,
                        found: band.min_points,
                    });
                }
                match band.max_points {
                    Some(max) if max <= band.min_points => {
                        return Err(TierTableError::EmptyBand {
                            placement,
                            min: band.min_points,
                            max,
                        });
                    }
                    Some(max) => expected_min = max,
                    None => open_band = Some(placement),
                }
                last = Some(placement);
            }
        }

        match (open_band, last) {
            (None, Some(last)) => Err(TierTableError::BoundedLast(last)),
            _ => Ok(()),
        }
    }
}

impl Default for RankTierTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<RankTier>> for RankTierTable {
    type Error = TierTableError;

    fn try_from(tiers: Vec<RankTier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<RankTierTable> for Vec<RankTier> {
    fn from(table: RankTierTable) -> Self {
        table.tiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn band(division: Division, min: u64, max: Option<u64>) -> DivisionBand {
        DivisionBand {
            division,
            min_points: min,
            max_points: max,
        }
    }

    #[test]
    fn standard_table_is_valid() {
        let table = RankTierTable::standard();
        assert!(RankTierTable::new(table.tiers().to_vec()).is_ok());
        assert_eq!(table.tiers().len(), 7);
        assert_eq!(table.bands().count(), 35);
        assert_eq!(table.top(), Placement::new(Rank::Eternal, Division::I));
    }

    #[test]
    fn known_positions() {
        let table = RankTierTable::standard();
        let cases = [
            (0, Rank::Novice, Division::V),
            (49, Rank::Novice, Division::V),
            (50, Rank::Novice, Division::IV),
            (249, Rank::Novice, Division::I),
            (250, Rank::Adept, Division::V),
            (1499, Rank::Paragon, Division::I),
            (1500, Rank::Eternal, Division::V),
            (1700, Rank::Eternal, Division::I),
            (100_000, Rank::Eternal, Division::I),
        ];
        for (points, rank, division) in cases {
            assert_eq!(
                table.rank_for_points(points),
                Placement::new(rank, division),
                "points = {}",
                points
            );
        }
    }

    #[test]
    fn negative_points_clamp_to_zero() {
        let table = RankTierTable::standard();
        assert_eq!(table.rank_for_points(-1), table.rank_for_points(0));
        assert_eq!(
            table.rank_for_points(i64::MIN),
            Placement::new(Rank::Novice, Division::V)
        );
    }

    #[test]
    fn rejects_gap() {
        let tiers = vec![RankTier {
            rank: Rank::Novice,
            divisions: vec![
                band(Division::V, 0, Some(50)),
                band(Division::IV, 60, None),
            ],
        }];
        assert_eq!(
            RankTierTable::new(tiers),
            Err(TierTableError::Discontinuous {
                placement: Placement::new(Rank::Novice, Division::IV),
                expected: 50,
                found: 60,
            })
        );
    }

    #[test]
    fn rejects_overlap() {
        let tiers = vec![RankTier {
            rank: Rank::Novice,
            divisions: vec![
                band(Division::V, 0, Some(50)),
                band(Division::IV, 40, None),
            ],
        }];
        assert!(matches!(
            RankTierTable::new(tiers),
            Err(TierTableError::Discontinuous { expected: 50, found: 40, .. })
        ));
    }

    #[test]
    fn rejects_bad_start_and_bounds() {
        let late_start = vec![RankTier {
            rank: Rank::Novice,
            divisions: vec![band(Division::V, 10, None)],
        }];
        assert_eq!(
            RankTierTable::new(late_start),
            Err(TierTableError::NonZeroStart(10))
        );

        let open_middle = vec![RankTier {
            rank: Rank::Novice,
            divisions: vec![band(Division::V, 0, None), band(Division::IV, 0, None)],
        }];
        assert_eq!(
            RankTierTable::new(open_middle),
            Err(TierTableError::UnboundedNotLast(Placement::new(
                Rank::Novice,
                Division::V
            )))
        );

        let closed_end = vec![RankTier {
            rank: Rank::Novice,
            divisions: vec![band(Division::V, 0, Some(100))],
        }];
        assert_eq!(
            RankTierTable::new(closed_end),
            Err(TierTableError::BoundedLast(Placement::new(
                Rank::Novice,
                Division::V
            )))
        );

        let inverted = vec![RankTier {
            rank: Rank::Novice,
            divisions: vec![band(Division::V, 0, Some(0))],
        }];
        assert!(matches!(
            RankTierTable::new(inverted),
            Err(TierTableError::EmptyBand { .. })
        ));
    }

    #[test]
    fn rejects_unordered_tiers() {
        let tiers = vec![
            RankTier {
                rank: Rank::Adept,
                divisions: vec![band(Division::V, 0, Some(10))],
            },
            RankTier {
                rank: Rank::Novice,
                divisions: vec![band(Division::V, 10, None)],
            },
        ];
        assert_eq!(
            RankTierTable::new(tiers),
            Err(TierTableError::TierOrder {
                previous: Rank::Adept,
                next: Rank::Novice,
            })
        );
        assert_eq!(RankTierTable::new(Vec::new()), Err(TierTableError::Empty));
    }

    #[test]
    fn rejects_unordered_divisions() {
        let repeated = vec![RankTier {
            rank: Rank::Novice,
            divisions: vec![
                band(Division::V, 0, Some(50)),
                band(Division::V, 50, Some(100)),
                band(Division::I, 100, None),
            ],
        }];
        assert_eq!(
            RankTierTable::new(repeated),
            Err(TierTableError::DivisionOrder {
                rank: Rank::Novice,
                previous: Division::V,
                next: Division::V,
            })
        );

        let reversed = vec![RankTier {
            rank: Rank::Adept,
            divisions: vec![band(Division::I, 0, Some(50)), band(Division::V, 50, None)],
        }];
        let err = RankTierTable::new(reversed).unwrap_err();
        assert_eq!(
            err,
            TierTableError::DivisionOrder {
                rank: Rank::Adept,
                previous: Division::I,
                next: Division::V,
            }
        );
        assert_eq!(err.to_string(), "Adept divisions out of order: I listed before V");
    }

    #[test]
    fn custom_two_tier_table() {
        let table = RankTierTable::new(vec![
            RankTier {
                rank: Rank::Novice,
                divisions: vec![band(Division::V, 0, Some(100))],
            },
            RankTier {
                rank: Rank::Eternal,
                divisions: vec![band(Division::I, 100, None)],
            },
        ])
        .unwrap();
        assert_eq!(table.rank_for_points(99).rank, Rank::Novice);
        assert_eq!(table.rank_for_points(100).rank, Rank::Eternal);
        assert_eq!(table.boundaries(), vec![100]);
    }

    proptest! {
        #[test]
        fn every_boundary_changes_position(index in 0usize..34) {
            let table = RankTierTable::standard();
            let b = table.boundaries()[index] as i64;
            prop_assert_ne!(table.rank_for_points(b - 1), table.rank_for_points(b));
        }

        #[test]
        fn exactly_one_band_contains_points(points in 0u64..10_000) {
            let table = RankTierTable::standard();
            let hits = table.bands().filter(|(_, band)| band.contains(points)).count();
            prop_assert_eq!(hits, 1);
        }

        #[test]
        fn position_is_monotonic(a in 0i64..5_000, b in 0i64..5_000) {
            let table = RankTierTable::standard();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(table.rank_for_points(lo) <= table.rank_for_points(hi));
        }
    }
}
