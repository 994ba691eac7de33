//! Comment sources
//!
//! The pipeline only needs three questions answered about the minutes
//! thread: what changed since T, what is the newest comment, and which
//! comment came just before a given one. [`CommentSource`] is that port;
//! implementations:
//! - `local`: a JSON export of the thread (offline runs, tests)
//! - `github`: the GitHub REST API (feature `github`)

mod error;
#[cfg(feature = "github")]
pub mod github;
pub mod local;

use chrono::{DateTime, Utc};

pub use error::SourceError;
#[cfg(feature = "github")]
pub use github::GithubClient;
pub use local::LocalCommentSource;

use crate::models::MeetingComment;

/// Result of a "comments since" query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The server confirmed nothing changed (ETag matched)
    NotModified,
    /// Comments updated at or after the requested time
    Comments {
        /// Comments in server order
        comments: Vec<MeetingComment>,
        /// ETag to replay next time, if the server sent one
        etag: Option<String>,
    },
}

impl FetchOutcome {
    /// Comments carried by the outcome (empty for `NotModified`)
    #[must_use]
    pub fn into_comments(self) -> Vec<MeetingComment> {
        match self {
            Self::NotModified => Vec::new(),
            Self::Comments { comments, .. } => comments,
        }
    }
}

/// Read access to the minutes thread
pub trait CommentSource {
    /// Comments created or edited at or after `since` (all when `None`)
    ///
    /// `etag` is the value returned by a previous identical query; a source
    /// may answer [`FetchOutcome::NotModified`] when it still matches.
    fn fetch_since(
        &self,
        since: Option<DateTime<Utc>>,
        etag: Option<&str>,
    ) -> Result<FetchOutcome, SourceError>;

    /// The most recently posted comment
    fn fetch_latest(&self) -> Result<Option<MeetingComment>, SourceError>;

    /// The comment posted immediately before `comment`
    fn fetch_preceding(
        &self,
        comment: &MeetingComment,
    ) -> Result<Option<MeetingComment>, SourceError>;
}

/// Pick the nearest comment posted before `comment` (IDs grow with posting order)
#[must_use]
pub fn nearest_preceding(
    candidates: Vec<MeetingComment>,
    comment: &MeetingComment,
) -> Option<MeetingComment> {
    candidates.into_iter().filter(|c| c.id < comment.id).max_by_key(|c| c.id)
}
