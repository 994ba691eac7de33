//! Meeting comments as delivered by the comment source
//!
//! The shape mirrors the GitHub REST representation of an issue comment so
//! API payloads and local exports deserialize directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One comment on the minutes tracking issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingComment {
    /// Numeric comment ID (unique, increases with posting order)
    pub id: u64,

    /// Raw markdown body
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,

    /// When the comment was posted
    pub created_at: DateTime<Utc>,

    /// When the comment was last edited, if ever
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Permalink to the comment
    #[serde(default)]
    pub html_url: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl MeetingComment {
    /// Create a comment that has never been edited
    #[must_use]
    pub fn new(id: u64, body: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            body: body.into(),
            created_at,
            updated_at: None,
            html_url: String::new(),
        }
    }

    /// Set the permalink
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.html_url = url.into();
        self
    }

    /// Mark the comment as edited at the given time
    #[must_use]
    pub const fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// The timestamp that orders this comment: last edit if any, else creation
    #[must_use]
    pub fn effective_at(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }

    /// Processing order key: effective timestamp, then ID
    #[must_use]
    pub fn sort_key(&self) -> (DateTime<Utc>, u64) {
        (self.effective_at(), self.id)
    }

    /// Pointer identifying this comment as the latest processed one
    #[must_use]
    pub fn pointer(&self) -> CommentPointer {
        CommentPointer {
            id: self.id,
            at: self.effective_at(),
            url: self.html_url.clone(),
        }
    }
}

/// Sort comments into processing order (effective timestamp, then ID)
pub fn sort_chronologically(comments: &mut [MeetingComment]) {
    comments.sort_by_key(MeetingComment::sort_key);
}

/// Identity of the most recently processed comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPointer {
    /// Comment ID
    pub id: u64,
    /// Effective timestamp of the comment when it was processed
    pub at: DateTime<Utc>,
    /// Permalink
    pub url: String,
}
