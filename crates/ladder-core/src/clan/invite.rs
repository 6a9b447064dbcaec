//! Invitations to join a clan.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::roster::{ClanError, ClanTag};

/// Lifecycle of an invite. Only pending invites can be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    Pending,
    Accepted,
    Declined,
}

impl fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InviteStatus::Pending => write!(f, "pending"),
            InviteStatus::Accepted => write!(f, "accepted"),
            InviteStatus::Declined => write!(f, "declined"),
        }
    }
}

/// An invitation from a clan member to another user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClanInvite {
    pub clan_tag: ClanTag,
    pub user_id: String,
    pub inviter_id: String,
    pub sent_at: DateTime<Utc>,
    pub status: InviteStatus,
}

impl ClanInvite {
    pub fn new(
        clan_tag: ClanTag,
        user_id: impl Into<String>,
        inviter_id: impl Into<String>,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            clan_tag,
            user_id: user_id.into(),
            inviter_id: inviter_id.into(),
            sent_at,
            status: InviteStatus::Pending,
        }
    }

    /// Marks the invite accepted. The caller then adds the user to the clan.
    pub fn accept(&mut self) -> Result<(), ClanError> {
        self.answer(InviteStatus::Accepted)
    }

    pub fn decline(&mut self) -> Result<(), ClanError> {
        self.answer(InviteStatus::Declined)
    }

    fn answer(&mut self, status: InviteStatus) -> Result<(), ClanError> {
        if self.status != InviteStatus::Pending {
            return Err(ClanError::InviteClosed(self.status));
        }
        self.status = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invite() -> ClanInvite {
        ClanInvite::new(ClanTag::new("OWL").unwrap(), "eve", "ana", Utc::now())
    }

    #[test]
    fn accept_once() {
        let mut invite = invite();
        assert_eq!(invite.status, InviteStatus::Pending);
        invite.accept().unwrap();
        assert_eq!(invite.status, InviteStatus::Accepted);
        assert_eq!(
            invite.decline(),
            Err(ClanError::InviteClosed(InviteStatus::Accepted))
        );
    }

    #[test]
    fn decline_closes_invite() {
        let mut invite = invite();
        invite.decline().unwrap();
        let err = invite.accept().unwrap_err();
        assert_eq!(err.to_string(), "invite is already declined");
    }
}
