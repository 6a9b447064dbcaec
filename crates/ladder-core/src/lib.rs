//! Ranking, reputation and clan rules for a 1v1 ladder.
//!
//! Everything here is pure and synchronous. Callers load stored values,
//! pass them in, and persist what comes back:
//! - [`RankTierTable`] maps rank points to a [`Placement`] and
//!   [`MatchAwardPolicy`] prices a win by rank gap
//! - [`ReputationPolicy`] turns behaviour events into score deltas and a
//!   [`ReputationRank`]
//! - [`can_remove`] and [`can_change_role`] decide clan moderation, with
//!   [`Clan`] applying them to a roster
//! - [`MatchRecord`] tracks result reporting for a single match
//! - [`Ladder`] binds a [`LadderConfig`] and composes the above

mod award;
mod clan;
mod config;
mod matches;
mod rank;
mod reputation;
mod standing;
mod table;
mod tag;

pub use award::{apply_points, AwardPolicyError, MatchAwardPolicy};
pub use clan::{
    can_announce, can_change_role, can_edit_settings, can_remove, Clan, ClanAnnouncement,
    ClanError, ClanInvite, ClanMember, ClanMessage, ClanRole, ClanStats, ClanTag, InviteStatus,
};
pub use config::{ConfigError, LadderConfig};
pub use matches::{MatchError, MatchRecord, MatchStatus};
pub use rank::{Division, Placement, Rank};
pub use reputation::{
    PolicyError, ReputationEvent, ReputationPolicy, ReputationRank, ReputationThresholds,
    ReputationUpdate,
};
pub use standing::{Ladder, MatchSettlement, PlayerStanding};
pub use table::{DivisionBand, RankTier, RankTierTable, TierTableError};
pub use tag::ParseTagError;
