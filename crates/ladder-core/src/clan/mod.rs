//! Clans: roles, permissions, rosters, invites and posts.

mod invite;
mod post;
mod role;
mod roster;

pub use invite::{ClanInvite, InviteStatus};
pub use post::{ClanAnnouncement, ClanMessage};
pub use role::{can_announce, can_change_role, can_edit_settings, can_remove, ClanRole};
pub use roster::{Clan, ClanError, ClanMember, ClanStats, ClanTag};
