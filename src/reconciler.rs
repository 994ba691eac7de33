//! Baseline reconciliation
//!
//! Minutes restate statuses every week, so a parsed record is not by itself
//! a change. The reconciler replays records against a running
//! `issue -> status` map seeded from the comment just before the batch and
//! keeps only real transitions.
//!
//! Reconciliation is a pure function of (baseline map, parsed comments).

use std::collections::BTreeMap;

use crate::models::{CommentPointer, MeetingComment, ProposalChange, Status};

/// Last known status per issue number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusMap(BTreeMap<u64, Status>);

impl StatusMap {
    /// Empty map (no baseline)
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Seed from a parse result; later records for the same issue win
    #[must_use]
    pub fn from_changes(changes: &[ProposalChange]) -> Self {
        Self(changes.iter().map(|c| (c.issue_number, c.current_status)).collect())
    }

    /// Status currently recorded for an issue
    #[must_use]
    pub fn get(&self, issue_number: u64) -> Option<Status> {
        self.0.get(&issue_number).copied()
    }

    /// Record a status, returning the previous one
    pub fn insert(&mut self, issue_number: u64, status: Status) -> Option<Status> {
        self.0.insert(issue_number, status)
    }

    /// Number of tracked issues
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no issue is tracked
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A comment together with its parse result
#[derive(Debug, Clone)]
pub struct ParsedComment {
    /// The source comment
    pub comment: MeetingComment,
    /// Records parsed from it (previous status unset)
    pub changes: Vec<ProposalChange>,
}

impl ParsedComment {
    /// Pair a comment with its records
    #[must_use]
    pub const fn new(comment: MeetingComment, changes: Vec<ProposalChange>) -> Self {
        Self { comment, changes }
    }
}

/// Outcome of reconciling a batch
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    /// Real transitions, in processing order
    pub changes: Vec<ProposalChange>,
    /// Running map after the whole batch
    pub statuses: StatusMap,
    /// Latest comment of the batch (new persisted pointer)
    pub latest: Option<CommentPointer>,
    /// Records dropped because they restated the known status
    pub suppressed: usize,
}

/// Reconcile a batch, sorting it into processing order first
#[must_use]
pub fn reconcile(baseline: StatusMap, mut comments: Vec<ParsedComment>) -> Reconciliation {
    comments.sort_by_key(|p| p.comment.sort_key());
    reconcile_in_order(baseline, comments)
}

/// Reconcile a batch exactly in the given order
///
/// The running map is order dependent: feeding comments out of
/// chronological order silently produces wrong previous statuses.
#[must_use]
pub fn reconcile_in_order(
    baseline: StatusMap,
    comments: impl IntoIterator<Item = ParsedComment>,
) -> Reconciliation {
    let mut statuses = baseline;
    let mut changes = Vec::new();
    let mut suppressed = 0;
    let mut latest: Option<&MeetingComment> = None;
    let comments: Vec<ParsedComment> = comments.into_iter().collect();

    for parsed in &comments {
        if latest.is_none_or(|l| parsed.comment.sort_key() > l.sort_key()) {
            latest = Some(&parsed.comment);
        }

        for record in &parsed.changes {
            let previous = statuses.get(record.issue_number);
            if previous == Some(record.current_status) {
                suppressed += 1;
                continue;
            }
            let mut change = record.clone();
            change.previous_status = previous;
            statuses.insert(change.issue_number, change.current_status);
            changes.push(change);
        }
    }

    log::debug!(
        "reconciled {} comment(s): {} change(s), {} restatement(s) suppressed",
        comments.len(),
        changes.len(),
        suppressed
    );

    Reconciliation {
        changes,
        statuses,
        latest: latest.map(MeetingComment::pointer),
        suppressed,
    }
}
