//! 1v1 match records and their result-reporting lifecycle.
//!
//! ```text
//! Pending ──submit_result──▶ Completed ──dispute──▶ Disputed
//!    │  └────────────dispute────────────────────────▲
//!    └──cancel──▶ Cancelled
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a match is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Pending,
    Completed,
    Disputed,
    Cancelled,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Completed => "completed",
            MatchStatus::Disputed => "disputed",
            MatchStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", name)
    }
}

/// Errors returned by match lifecycle operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    /// Both player ids were the same; carries that id.
    #[error("a player cannot be matched against themselves ({0})")]
    SelfMatch(String),

    /// The match is not in a status that allows the action.
    #[error("cannot {action} a {status} match")]
    InvalidTransition {
        /// Short verb phrase, e.g. "cancel".
        action: &'static str,
        /// Status the match was in.
        status: MatchStatus,
    },

    /// The reported winner is neither player.
    #[error("{0} did not play in this match")]
    NotAParticipant(String),
}

/// A single 1v1 match between two players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub player1_id: String,
    pub player2_id: String,
    pub status: MatchStatus,
    pub winner_id: Option<String>,
    pub proof_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MatchRecord {
    /// Opens a pending match.
    pub fn new(
        player1_id: impl Into<String>,
        player2_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, MatchError> {
        let player1_id = player1_id.into();
        let player2_id = player2_id.into();
        if player1_id == player2_id {
            return Err(MatchError::SelfMatch(player1_id));
        }
        Ok(Self {
            player1_id,
            player2_id,
            status: MatchStatus::Pending,
            winner_id: None,
            proof_url: None,
            created_at,
        })
    }

    pub fn is_participant(&self, user_id: &str) -> bool {
        self.player1_id == user_id || self.player2_id == user_id
    }

    /// Reports the winner of a pending match.
    pub fn submit_result(
        &mut self,
        winner_id: &str,
        proof_url: Option<String>,
    ) -> Result<(), MatchError> {
        self.require(MatchStatus::Pending, "submit a result for")?;
        if !self.is_participant(winner_id) {
            return Err(MatchError::NotAParticipant(winner_id.to_string()));
        }
        self.winner_id = Some(winner_id.to_string());
        self.proof_url = proof_url;
        self.transition(MatchStatus::Completed);
        Ok(())
    }

    /// Flags a match as contested. The reported winner is kept for review.
    pub fn dispute(&mut self) -> Result<(), MatchError> {
        match self.status {
            MatchStatus::Pending | MatchStatus::Completed => {
                self.transition(MatchStatus::Disputed);
                Ok(())
            }
            status => Err(MatchError::InvalidTransition {
                action: "dispute",
                status,
            }),
        }
    }

    pub fn cancel(&mut self) -> Result<(), MatchError> {
        self.require(MatchStatus::Pending, "cancel")?;
        self.transition(MatchStatus::Cancelled);
        Ok(())
    }

    /// The other participant, once a winner has been reported.
    pub fn loser_id(&self) -> Option<&str> {
        let winner = self.winner_id.as_deref()?;
        if winner == self.player1_id {
            Some(self.player2_id.as_str())
        } else {
            Some(self.player1_id.as_str())
        }
    }

    fn require(&self, status: MatchStatus, action: &'static str) -> Result<(), MatchError> {
        if self.status != status {
            return Err(MatchError::InvalidTransition {
                action,
                status: self.status,
            });
        }
        Ok(())
    }

    fn transition(&mut self, to: MatchStatus) {
        tracing::debug!(
            player1 = %self.player1_id,
            player2 = %self.player2_id,
            from = %self.status,
            %to,
            "match status changed"
        );
        self.status = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> MatchRecord {
        MatchRecord::new("ana", "ben", Utc::now()).unwrap()
    }

    #[test]
    fn new_match_is_pending() {
        let m = pending();
        assert_eq!(m.status, MatchStatus::Pending);
        assert_eq!(m.winner_id, None);
        assert_eq!(m.loser_id(), None);
    }

    #[test]
    fn rejects_self_match() {
        assert_eq!(
            MatchRecord::new("ana", "ana", Utc::now()),
            Err(MatchError::SelfMatch("ana".into()))
        );
    }

    #[test]
    fn submit_result_completes() {
        let mut m = pending();
        m.submit_result("ben", Some("https://img.example/proof.png".into()))
            .unwrap();
        assert_eq!(m.status, MatchStatus::Completed);
        assert_eq!(m.winner_id.as_deref(), Some("ben"));
        assert_eq!(m.loser_id(), Some("ana"));
    }

    #[test]
    fn submit_twice_fails() {
        let mut m = pending();
        m.submit_result("ana", None).unwrap();
        let err = m.submit_result("ben", None).unwrap_err();
        assert_eq!(err.to_string(), "cannot submit a result for a completed match");
        assert_eq!(m.winner_id.as_deref(), Some("ana"));
    }

    #[test]
    fn winner_must_have_played() {
        let mut m = pending();
        assert_eq!(
            m.submit_result("cy", None),
            Err(MatchError::NotAParticipant("cy".into()))
        );
        assert_eq!(m.status, MatchStatus::Pending);
    }

    #[test]
    fn dispute_and_cancel() {
        let mut m = pending();
        m.submit_result("ana", None).unwrap();
        m.dispute().unwrap();
        assert_eq!(m.status, MatchStatus::Disputed);
        assert!(m.dispute().is_err());
        assert!(m.cancel().is_err());

        let mut m = pending();
        m.cancel().unwrap();
        assert_eq!(m.status, MatchStatus::Cancelled);
        assert_eq!(
            m.dispute(),
            Err(MatchError::InvalidTransition {
                action: "dispute",
                status: MatchStatus::Cancelled,
            })
        );
    }
}
