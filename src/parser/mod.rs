//! Meeting minutes parser
//!
//! Turns one minutes comment into the list of proposals whose status it
//! states. The parse is an explicit two-phase state machine:
//!
//! 1. `SeekingDate`: find the first valid meeting date header anywhere in
//!    the comment. No date means the comment is not minutes.
//! 2. `ScanningBody`: fold over every line with a small [`ParserState`]
//!    holding the current section status and the open proposal.
//!
//! Parsing is total over string input. Content problems are logged and
//! skipped, never returned as errors.

pub mod line;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

pub use line::{LineKind, ProposalEntry, classify};

use crate::models::{MeetingComment, ProposalChange, Status};

/// Maximum characters of comment text echoed in warnings
const PREVIEW_CHARS: usize = 80;

/// Parser for review meeting minutes
#[derive(Debug, Clone, Copy, Default)]
pub struct MinutesParser;

impl MinutesParser {
    /// Create a parser
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse a comment body into status records
    ///
    /// `timestamp` is only used for diagnostics: every record is dated with
    /// the meeting date from the header, not the comment time. Records carry
    /// no previous status; see [`crate::reconciler`].
    #[must_use]
    pub fn parse(&self, body: &str, timestamp: DateTime<Utc>) -> Vec<ProposalChange> {
        let Some(date) = find_meeting_date(body) else {
            log::warn!(
                "no meeting date header in comment at {}, skipping: {:?}",
                timestamp.to_rfc3339(),
                preview(body)
            );
            return Vec::new();
        };

        let changed_at = date.and_time(NaiveTime::MIN).and_utc();
        let changes = body
            .lines()
            .fold(ParserState::new(changed_at), ParserState::step)
            .finish();

        log::debug!("meeting {date}: {} status record(s)", changes.len());
        changes
    }

    /// Parse a fetched comment, stamping each record with its permalink
    #[must_use]
    pub fn parse_comment(&self, comment: &MeetingComment) -> Vec<ProposalChange> {
        let mut changes = self.parse(&comment.body, comment.effective_at());
        for change in &mut changes {
            change.comment_url.clone_from(&comment.html_url);
        }
        changes
    }

    /// Classify every line of a body (1-indexed), for diagnostics
    #[must_use]
    pub fn explain<'a>(&self, body: &'a str) -> Vec<(usize, LineKind<'a>)> {
        body.lines().enumerate().map(|(i, l)| (i + 1, classify(l))).collect()
    }
}

/// First header line carrying a valid calendar date
fn find_meeting_date(body: &str) -> Option<NaiveDate> {
    body.lines().filter_map(line::extract_meeting_date).find_map(|raw| {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .inspect_err(|e| log::warn!("invalid meeting date {raw:?} ({e}), still searching"))
            .ok()
    })
}

/// Shorten comment text for log output
pub(crate) fn preview(text: &str) -> String {
    let flat = text.trim().replace(['\r', '\n'], " ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let mut short: String = flat.chars().take(PREVIEW_CHARS).collect();
    short.push('…');
    short
}

/// Proposal whose notes are being read
#[derive(Debug)]
struct OpenProposal {
    entry: ProposalEntry,
    status: Option<Status>,
    related: Vec<u64>,
}

/// Body-scan state for one comment
#[derive(Debug)]
struct ParserState {
    changed_at: DateTime<Utc>,
    section: Option<Status>,
    open: Option<OpenProposal>,
    emitted: Vec<ProposalChange>,
}

impl ParserState {
    const fn new(changed_at: DateTime<Utc>) -> Self {
        Self {
            changed_at,
            section: None,
            open: None,
            emitted: Vec::new(),
        }
    }

    fn step(mut self, text: &str) -> Self {
        if let Some(status) = line::detect_section_header(text) {
            self.close();
            self.section = Some(status);
            return self;
        }

        if let Some(entry) = line::parse_proposal_line(text) {
            self.close();
            self.open = Some(OpenProposal {
                entry,
                status: self.section,
                related: Vec::new(),
            });
            return self;
        }

        let section = self.section;
        if let Some(open) = self.open.as_mut() {
            if section.is_none()
                && let Some(status) = line::detect_status_in_line(text)
            {
                open.status = Some(status);
            }
            // only indented notes belong to the entry
            if text.starts_with([' ', '\t']) {
                for issue in line::referenced_issues(text) {
                    if issue != 0
                        && issue != open.entry.issue_number
                        && !open.related.contains(&issue)
                    {
                        open.related.push(issue);
                    }
                }
            }
        }
        self
    }

    /// Emit the open proposal if it has a status; drop it otherwise
    fn close(&mut self) {
        let Some(open) = self.open.take() else {
            return;
        };
        let Some(status) = open.status else {
            log::trace!("#{} listed without a status", open.entry.issue_number);
            return;
        };
        let mut change =
            ProposalChange::new(open.entry.issue_number, open.entry.title, status, self.changed_at);
        change.related_issues = open.related;
        self.emitted.push(change);
    }

    fn finish(mut self) -> Vec<ProposalChange> {
        self.close();
        self.emitted
    }
}
