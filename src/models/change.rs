//! Proposal status change records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Status;

/// One detected status transition for one proposal in one meeting comment
///
/// The parser fills everything except `previous_status`; the reconciler
/// decides whether the record is a real transition and sets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalChange {
    /// GitHub issue number of the proposal
    pub issue_number: u64,

    /// Proposal title as written in this comment
    pub title: String,

    /// Status before this change (`None` when first observed)
    #[serde(default)]
    pub previous_status: Option<Status>,

    /// Status stated by this comment
    pub current_status: Status,

    /// Meeting date (midnight UTC)
    pub changed_at: DateTime<Utc>,

    /// Permalink of the comment the change came from
    #[serde(default)]
    pub comment_url: String,

    /// Other issues referenced in the proposal's notes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_issues: Vec<u64>,
}

impl ProposalChange {
    /// Create a change with no previous status, provenance or related issues
    #[must_use]
    pub fn new(
        issue_number: u64,
        title: impl Into<String>,
        current_status: Status,
        changed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            issue_number,
            title: title.into(),
            previous_status: None,
            current_status,
            changed_at,
            comment_url: String::new(),
            related_issues: Vec::new(),
        }
    }

    /// Set the previous status
    #[must_use]
    pub const fn with_previous(mut self, previous: Status) -> Self {
        self.previous_status = Some(previous);
        self
    }

    /// Whether the record actually changes the status
    #[must_use]
    pub fn is_transition(&self) -> bool {
        self.previous_status != Some(self.current_status)
    }
}

impl std::fmt::Display for ProposalChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let previous = self.previous_status.map_or("new", Status::as_str);
        write!(
            f,
            "{} #{} {}: {} -> {}",
            self.changed_at.format("%Y-%m-%d"),
            self.issue_number,
            self.title,
            previous,
            self.current_status
        )
    }
}
