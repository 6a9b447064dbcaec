//! Ladder positions: ranks and the divisions inside them.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tag::string_tag;

/// The seven coarse tiers of the ladder, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    Novice,
    Adept,
    Trailblazer,
    Vanguard,
    Luminary,
    Paragon,
    Eternal,
}

impl Rank {
    /// All ranks in ascending strength.
    pub const ALL: [Rank; 7] = [
        Rank::Novice,
        Rank::Adept,
        Rank::Trailblazer,
        Rank::Vanguard,
        Rank::Luminary,
        Rank::Paragon,
        Rank::Eternal,
    ];

    /// Strength ordinal (Novice = 0, Eternal = 6).
    #[inline]
    pub const fn ordinal(self) -> u8 {
        match self {
            Rank::Novice => 0,
            Rank::Adept => 1,
            Rank::Trailblazer => 2,
            Rank::Vanguard => 3,
            Rank::Luminary => 4,
            Rank::Paragon => 5,
            Rank::Eternal => 6,
        }
    }

    /// Creates a rank from its ordinal.
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Rank::Novice),
            1 => Some(Rank::Adept),
            2 => Some(Rank::Trailblazer),
            3 => Some(Rank::Vanguard),
            4 => Some(Rank::Luminary),
            5 => Some(Rank::Paragon),
            6 => Some(Rank::Eternal),
            _ => None,
        }
    }

    /// Signed ordinal distance from `other` to `self`.
    #[inline]
    pub const fn gap(self, other: Rank) -> i32 {
        self.ordinal() as i32 - other.ordinal() as i32
    }
}

string_tag!(Rank, "rank", {
    Rank::Novice => "Novice",
    Rank::Adept => "Adept",
    Rank::Trailblazer => "Trailblazer",
    Rank::Vanguard => "Vanguard",
    Rank::Luminary => "Luminary",
    Rank::Paragon => "Paragon",
    Rank::Eternal => "Eternal",
});

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sub-tier within a rank. `V` is the entry division, `I` the last one
/// before promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Division {
    V,
    IV,
    III,
    II,
    I,
}

impl Division {
    /// All divisions from entry to promotion.
    pub const ALL: [Division; 5] = [
        Division::V,
        Division::IV,
        Division::III,
        Division::II,
        Division::I,
    ];

    /// Progress ordinal (V = 0, I = 4).
    #[inline]
    pub const fn ordinal(self) -> u8 {
        match self {
            Division::V => 0,
            Division::IV => 1,
            Division::III => 2,
            Division::II => 3,
            Division::I => 4,
        }
    }
}

string_tag!(Division, "division", {
    Division::V => "V",
    Division::IV => "IV",
    Division::III => "III",
    Division::II => "II",
    Division::I => "I",
});

impl Ord for Division {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl PartialOrd for Division {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A full ladder position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Placement {
    pub rank: Rank,
    pub division: Division,
}

impl Placement {
    pub const fn new(rank: Rank, division: Division) -> Self {
        Self { rank, division }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.rank, self.division)
    }
}
