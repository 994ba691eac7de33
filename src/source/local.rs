//! Comment source backed by a JSON export of the thread
//!
//! The file is a JSON array in the GitHub REST comment shape, e.g. the
//! concatenated output of `gh api repos/golang/go/issues/33502/comments`.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use super::{CommentSource, FetchOutcome, SourceError, nearest_preceding};
use crate::models::MeetingComment;

/// In-memory comment thread
#[derive(Debug, Clone, Default)]
pub struct LocalCommentSource {
    comments: Vec<MeetingComment>,
}

impl LocalCommentSource {
    /// Source over the given comments
    #[must_use]
    pub const fn new(comments: Vec<MeetingComment>) -> Self {
        Self { comments }
    }

    /// Load an exported thread from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, SourceError> {
        let content = fs::read_to_string(path)?;
        let comments: Vec<MeetingComment> = serde_json::from_str(&content)?;
        log::debug!("loaded {} comment(s) from {}", comments.len(), path.display());
        Ok(Self::new(comments))
    }
}

impl CommentSource for LocalCommentSource {
    fn fetch_since(
        &self,
        since: Option<DateTime<Utc>>,
        _etag: Option<&str>,
    ) -> Result<FetchOutcome, SourceError> {
        let comments = self
            .comments
            .iter()
            .filter(|c| since.is_none_or(|t| c.effective_at() >= t))
            .cloned()
            .collect();
        Ok(FetchOutcome::Comments {
            comments,
            etag: None,
        })
    }

    fn fetch_latest(&self) -> Result<Option<MeetingComment>, SourceError> {
        Ok(self.comments.iter().max_by_key(|c| c.id).cloned())
    }

    fn fetch_preceding(
        &self,
        comment: &MeetingComment,
    ) -> Result<Option<MeetingComment>, SourceError> {
        Ok(nearest_preceding(self.comments.clone(), comment))
    }
}
