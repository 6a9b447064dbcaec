//! Clan records and roster management.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::post::{ClanAnnouncement, ClanMessage};
use super::role::{can_announce, can_change_role, can_edit_settings, can_remove, ClanRole};

/// Errors returned by roster operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClanError {
    /// The rejected tag text.
    #[error("invalid clan tag '{0}': expected 2-4 uppercase letters or digits")]
    InvalidTag(String),

    /// The user id is not on the roster.
    #[error("user {0} is not a member of this clan")]
    NotAMember(String),

    /// The user id is already on the roster.
    #[error("user {0} is already a member of this clan")]
    AlreadyMember(String),

    /// The actor does not outrank the member they tried to act on.
    #[error("{actor} ({actor_role}) may not {action} {target} ({target_role})")]
    PermissionDenied {
        /// Member attempting the action.
        actor: String,
        /// Actor's role at the time of the attempt.
        actor_role: ClanRole,
        /// Short verb phrase, e.g. "remove".
        action: &'static str,
        /// Member the action was aimed at.
        target: String,
        /// Target's role at the time of the attempt.
        target_role: ClanRole,
    },

    /// The actor's role is below the least role allowed to do this.
    #[error("{actor} ({actor_role}) must be at least {required} to {action}")]
    RoleRequired {
        /// Member attempting the action.
        actor: String,
        /// Actor's role at the time of the attempt.
        actor_role: ClanRole,
        /// Short verb phrase, e.g. "post announcements".
        action: &'static str,
        /// Least role allowed to perform the action.
        required: ClanRole,
    },

    /// Text that must say something was empty or only whitespace.
    #[error("{0} cannot be blank")]
    Blank(&'static str),

    /// The leader tried to leave a clan that still has other members.
    #[error("the leader cannot leave while other members remain")]
    LeaderMustStay,

    /// Carries the invite's current status.
    #[error("invite is already {0}")]
    InviteClosed(super::InviteStatus),

    /// A stored roster lists the same user more than once.
    #[error("user {0} appears more than once in the roster")]
    DuplicateMember(String),

    /// A stored, non-empty roster does not have exactly one leader.
    #[error("roster must have exactly one leader, found {0}")]
    LeaderCount(usize),
}

/// A clan's short tag: 2 to 4 ASCII uppercase letters or digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClanTag(String);

impl ClanTag {
    pub fn new(tag: &str) -> Result<Self, ClanError> {
        let valid = (2..=4).contains(&tag.len())
            && tag
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
        if valid {
            Ok(Self(tag.to_string()))
        } else {
            Err(ClanError::InvalidTag(tag.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ClanTag {
    type Err = ClanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ClanTag {
    type Error = ClanError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<ClanTag> for String {
    fn from(tag: ClanTag) -> Self {
        tag.0
    }
}

impl fmt::Display for ClanTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0)
    }
}

/// One entry in a clan's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClanMember {
    pub user_id: String,
    pub role: ClanRole,
    pub joined_at: DateTime<Utc>,
    /// Wins this member has recorded for the clan.
    pub contributed_wins: u32,
}

/// Running match tallies for a clan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClanStats {
    /// Wins recorded by any member since the clan was founded.
    pub total_wins: u32,
    /// Matches recorded, won or lost.
    pub total_matches: u32,
    /// Wins since the last [`Clan::reset_weekly`].
    pub weekly_wins: u32,
    /// Wins since the last [`Clan::reset_monthly`].
    pub monthly_wins: u32,
}

impl ClanStats {
    /// Fraction of matches won, 0.0 when none were played.
    pub fn win_rate(&self) -> f64 {
        if self.total_matches == 0 {
            return 0.0;
        }
        self.total_wins as f64 / self.total_matches as f64
    }
}

/// A clan and its roster.
///
/// Every user appears at most once in `members`, and a non-empty roster has
/// exactly one leader. Deserialisation checks both. Keeping each user's own
/// clan reference in step with this roster is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ClanRecord", into = "ClanRecord")]
pub struct Clan {
    pub name: String,
    pub tag: ClanTag,
    pub description: String,
    pub founder_id: String,
    pub created_at: DateTime<Utc>,
    members: Vec<ClanMember>,
    pub stats: ClanStats,
}

/// Stored form of a [`Clan`], checked before it becomes one.
#[derive(Serialize, Deserialize)]
struct ClanRecord {
    name: String,
    tag: ClanTag,
    description: String,
    founder_id: String,
    created_at: DateTime<Utc>,
    members: Vec<ClanMember>,
    #[serde(default)]
    stats: ClanStats,
}

impl TryFrom<ClanRecord> for Clan {
    type Error = ClanError;

    fn try_from(record: ClanRecord) -> Result<Self, Self::Error> {
        for (i, member) in record.members.iter().enumerate() {
            if record.members[..i].iter().any(|m| m.user_id == member.user_id) {
                return Err(ClanError::DuplicateMember(member.user_id.clone()));
            }
        }
        let leaders = record
            .members
            .iter()
            .filter(|m| m.role == ClanRole::Leader)
            .count();
        if !record.members.is_empty() && leaders != 1 {
            return Err(ClanError::LeaderCount(leaders));
        }
        Ok(Self {
            name: record.name,
            tag: record.tag,
            description: record.description,
            founder_id: record.founder_id,
            created_at: record.created_at,
            members: record.members,
            stats: record.stats,
        })
    }
}

impl From<Clan> for ClanRecord {
    fn from(clan: Clan) -> Self {
        Self {
            name: clan.name,
            tag: clan.tag,
            description: clan.description,
            founder_id: clan.founder_id,
            created_at: clan.created_at,
            members: clan.members,
            stats: clan.stats,
        }
    }
}

impl Clan {
    /// Founds a clan with `founder_id` as its sole leader.
    pub fn found(
        name: impl Into<String>,
        tag: ClanTag,
        description: impl Into<String>,
        founder_id: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let founder_id = founder_id.into();
        tracing::debug!(%tag, founder = %founder_id, "clan founded");
        Self {
            name: name.into(),
            tag,
            description: description.into(),
            members: vec![ClanMember {
                user_id: founder_id.clone(),
                role: ClanRole::Leader,
                joined_at: now,
                contributed_wins: 0,
            }],
            founder_id,
            created_at: now,
            stats: ClanStats::default(),
        }
    }

    pub fn members(&self) -> &[ClanMember] {
        &self.members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn member(&self, user_id: &str) -> Option<&ClanMember> {
        self.members.iter().find(|m| m.user_id == user_id)
    }

    fn member_mut(&mut self, user_id: &str) -> Result<&mut ClanMember, ClanError> {
        self.members
            .iter_mut()
            .find(|m| m.user_id == user_id)
            .ok_or_else(|| ClanError::NotAMember(user_id.to_string()))
    }

    fn role_of(&self, user_id: &str) -> Result<ClanRole, ClanError> {
        self.member(user_id)
            .map(|m| m.role)
            .ok_or_else(|| ClanError::NotAMember(user_id.to_string()))
    }

    /// Adds a user as a plain member.
    pub fn join(&mut self, user_id: &str, now: DateTime<Utc>) -> Result<(), ClanError> {
        if self.member(user_id).is_some() {
            return Err(ClanError::AlreadyMember(user_id.to_string()));
        }
        self.members.push(ClanMember {
            user_id: user_id.to_string(),
            role: ClanRole::Member,
            joined_at: now,
            contributed_wins: 0,
        });
        tracing::debug!(tag = %self.tag, user = user_id, "member joined");
        Ok(())
    }

    /// Removes a user at their own request.
    ///
    /// A leader may only leave as the last member; otherwise leadership has
    /// to be handed over first.
    pub fn leave(&mut self, user_id: &str) -> Result<ClanMember, ClanError> {
        let role = self.role_of(user_id)?;
        if role == ClanRole::Leader && self.members.len() > 1 {
            return Err(ClanError::LeaderMustStay);
        }
        self.take(user_id)
    }

    /// Removes `target_id` on behalf of `actor_id`.
    pub fn remove_member(
        &mut self,
        actor_id: &str,
        target_id: &str,
    ) -> Result<ClanMember, ClanError> {
        let actor_role = self.role_of(actor_id)?;
        let target_role = self.role_of(target_id)?;
        if !can_remove(actor_role, target_role) {
            tracing::debug!(actor = actor_id, target = target_id, "removal denied");
            return Err(ClanError::PermissionDenied {
                actor: actor_id.to_string(),
                actor_role,
                action: "remove",
                target: target_id.to_string(),
                target_role,
            });
        }
        self.take(target_id)
    }

    /// Moves `target_id` to `new_role` on behalf of `actor_id`.
    pub fn change_role(
        &mut self,
        actor_id: &str,
        target_id: &str,
        new_role: ClanRole,
    ) -> Result<(), ClanError> {
        let actor_role = self.role_of(actor_id)?;
        let target = self.member_mut(target_id)?;
        if !can_change_role(actor_role, target.role, new_role) {
            let target_role = target.role;
            tracing::debug!(
                actor = actor_id,
                target = target_id,
                %new_role,
                "role change denied"
            );
            return Err(ClanError::PermissionDenied {
                actor: actor_id.to_string(),
                actor_role,
                action: "change the role of",
                target: target_id.to_string(),
                target_role,
            });
        }
        target.role = new_role;
        Ok(())
    }

    /// Hands leadership to another member; the outgoing leader becomes a
    /// co-leader. This is the only way the leader role changes hands.
    pub fn transfer_leadership(
        &mut self,
        leader_id: &str,
        successor_id: &str,
    ) -> Result<(), ClanError> {
        let leader_role = self.role_of(leader_id)?;
        let successor_role = self.role_of(successor_id)?;
        if leader_role != ClanRole::Leader || leader_id == successor_id {
            return Err(ClanError::PermissionDenied {
                actor: leader_id.to_string(),
                actor_role: leader_role,
                action: "hand leadership to",
                target: successor_id.to_string(),
                target_role: successor_role,
            });
        }
        self.member_mut(leader_id)?.role = ClanRole::CoLeader;
        self.member_mut(successor_id)?.role = ClanRole::Leader;
        tracing::info!(tag = %self.tag, from = leader_id, to = successor_id, "leadership transferred");
        Ok(())
    }

    /// Records a finished match played by `user_id` for the clan.
    pub fn record_match(&mut self, user_id: &str, won: bool) -> Result<(), ClanError> {
        let member = self.member_mut(user_id)?;
        let wins = u32::from(won);
        member.contributed_wins = member.contributed_wins.saturating_add(wins);
        let stats = &mut self.stats;
        stats.total_matches = stats.total_matches.saturating_add(1);
        stats.total_wins = stats.total_wins.saturating_add(wins);
        stats.weekly_wins = stats.weekly_wins.saturating_add(wins);
        stats.monthly_wins = stats.monthly_wins.saturating_add(wins);
        Ok(())
    }

    /// Publishes an announcement from an elder or above.
    pub fn post_announcement(
        &self,
        author_id: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<ClanAnnouncement, ClanError> {
        let role = self.role_of(author_id)?;
        if !can_announce(role) {
            return Err(self.role_required(author_id, role, "post announcements", ClanRole::Elder));
        }
        ClanAnnouncement::new(self.tag.clone(), author_id, content, now)
    }

    /// Posts to the clan chat. Any member may write.
    pub fn post_message(
        &self,
        author_id: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<ClanMessage, ClanError> {
        self.role_of(author_id)?;
        ClanMessage::new(self.tag.clone(), author_id, content, now)
    }

    /// Renames the clan or rewrites its description. Co-leaders and the
    /// leader only; `None` leaves a field as it is.
    pub fn update_settings(
        &mut self,
        actor_id: &str,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<(), ClanError> {
        let role = self.role_of(actor_id)?;
        if !can_edit_settings(role) {
            return Err(self.role_required(actor_id, role, "edit clan settings", ClanRole::CoLeader));
        }
        let name = match name.map(str::trim) {
            Some("") => return Err(ClanError::Blank("clan name")),
            other => other,
        };
        if let Some(name) = name {
            self.name = name.to_string();
        }
        if let Some(description) = description {
            self.description = description.trim().to_string();
        }
        tracing::info!(tag = %self.tag, actor = actor_id, "clan settings updated");
        Ok(())
    }

    pub fn reset_weekly(&mut self) {
        self.stats.weekly_wins = 0;
    }

    pub fn reset_monthly(&mut self) {
        self.stats.monthly_wins = 0;
    }

    fn role_required(
        &self,
        actor_id: &str,
        actor_role: ClanRole,
        action: &'static str,
        required: ClanRole,
    ) -> ClanError {
        tracing::debug!(tag = %self.tag, actor = actor_id, %actor_role, action, "clan action denied");
        ClanError::RoleRequired {
            actor: actor_id.to_string(),
            actor_role,
            action,
            required,
        }
    }

    fn take(&mut self, user_id: &str) -> Result<ClanMember, ClanError> {
        let index = self
            .members
            .iter()
            .position(|m| m.user_id == user_id)
            .ok_or_else(|| ClanError::NotAMember(user_id.to_string()))?;
        Ok(self.members.remove(index))
    }
}
