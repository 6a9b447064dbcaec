//! Clan roles and the authority rules between them.

use std::cmp::Ordering;

use crate::tag::string_tag;

/// A member's role. Leader holds the most authority, Member the least.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClanRole {
    Leader,
    CoLeader,
    Elder,
    Member,
}

impl ClanRole {
    /// All roles, most authority first.
    pub const ALL: [ClanRole; 4] = [
        ClanRole::Leader,
        ClanRole::CoLeader,
        ClanRole::Elder,
        ClanRole::Member,
    ];

    /// Authority ordinal. Lower means more authority (Leader = 0).
    #[inline]
    pub const fn authority(self) -> u8 {
        match self {
            ClanRole::Leader => 0,
            ClanRole::CoLeader => 1,
            ClanRole::Elder => 2,
            ClanRole::Member => 3,
        }
    }

    /// Returns true if `self` has strictly more authority than `other`.
    #[inline]
    pub const fn outranks(self, other: ClanRole) -> bool {
        self.authority() < other.authority()
    }

    /// Roles this role may hand out: everything strictly below it.
    pub fn assignable(self) -> impl Iterator<Item = ClanRole> {
        Self::ALL.into_iter().filter(move |role| self.outranks(*role))
    }
}

string_tag!(ClanRole, "clan role", {
    ClanRole::Leader => "leader",
    ClanRole::CoLeader => "co-leader",
    ClanRole::Elder => "elder",
    ClanRole::Member => "member",
});

/// Roles compare by authority: `Leader > Member`.
impl Ord for ClanRole {
    fn cmp(&self, other: &Self) -> Ordering {
        other.authority().cmp(&self.authority())
    }
}

impl PartialOrd for ClanRole {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Whether `actor` may remove a member holding `target`.
///
/// Only strictly higher authority may remove; nobody removes a peer or a
/// superior, and this path never allows self-removal.
pub fn can_remove(actor: ClanRole, target: ClanRole) -> bool {
    actor.outranks(target)
}

/// Whether `actor` may move a member from `current` to `new`.
///
/// The actor must outrank both the member's current role and the proposed
/// one, so nobody can grant a role equal to or above their own.
pub fn can_change_role(actor: ClanRole, current: ClanRole, new: ClanRole) -> bool {
    actor.outranks(current) && actor.outranks(new)
}

/// Whether `role` may post clan announcements: elders and above.
pub fn can_announce(role: ClanRole) -> bool {
    role >= ClanRole::Elder
}

/// Whether `role` may edit the clan's name and description: co-leaders and
/// the leader.
pub fn can_edit_settings(role: ClanRole) -> bool {
    role >= ClanRole::CoLeader
}
