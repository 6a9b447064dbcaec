//! Announcements and chat messages posted inside a clan.
//!
//! Both are plain records: [`Clan::post_announcement`](super::Clan::post_announcement)
//! and [`Clan::post_message`](super::Clan::post_message) check who may post,
//! the constructors here only check the text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::roster::{ClanError, ClanTag};

/// A notice pinned to the clan page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClanAnnouncement {
    pub clan_tag: ClanTag,
    pub author_id: String,
    /// Trimmed announcement text, never empty.
    pub content: String,
    pub posted_at: DateTime<Utc>,
}

impl ClanAnnouncement {
    pub fn new(
        clan_tag: ClanTag,
        author_id: impl Into<String>,
        content: &str,
        posted_at: DateTime<Utc>,
    ) -> Result<Self, ClanError> {
        Ok(Self {
            clan_tag,
            author_id: author_id.into(),
            content: non_blank(content, "announcement")?,
            posted_at,
        })
    }
}

/// One line of clan chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClanMessage {
    pub clan_tag: ClanTag,
    pub author_id: String,
    /// Trimmed message text, never empty.
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl ClanMessage {
    pub fn new(
        clan_tag: ClanTag,
        author_id: impl Into<String>,
        content: &str,
        sent_at: DateTime<Utc>,
    ) -> Result<Self, ClanError> {
        Ok(Self {
            clan_tag,
            author_id: author_id.into(),
            content: non_blank(content, "message")?,
            sent_at,
        })
    }
}

fn non_blank(content: &str, what: &'static str) -> Result<String, ClanError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ClanError::Blank(what));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag() -> ClanTag {
        ClanTag::new("OWL").unwrap()
    }

    #[test]
    fn content_is_trimmed() {
        let note = ClanAnnouncement::new(tag(), "ana", "  war starts friday \n", Utc::now()).unwrap();
        assert_eq!(note.content, "war starts friday");
        assert_eq!(note.author_id, "ana");

        let line = ClanMessage::new(tag(), "dee", "gg\t", Utc::now()).unwrap();
        assert_eq!(line.content, "gg");
    }

    #[test]
    fn blank_content_is_rejected() {
        assert_eq!(
            ClanAnnouncement::new(tag(), "ana", "   ", Utc::now()),
            Err(ClanError::Blank("announcement"))
        );
        let err = ClanMessage::new(tag(), "dee", "", Utc::now()).unwrap_err();
        assert_eq!(err, ClanError::Blank("message"));
        assert_eq!(err.to_string(), "message cannot be blank");
    }
}
