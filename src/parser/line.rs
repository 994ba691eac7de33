//! Line classification for meeting minutes
//!
//! Every function here looks at a single line in isolation. Matching is plain
//! prefix/suffix/delimiter scanning; the only regex is the best-effort issue
//! reference extractor.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Status;
use crate::vocabulary;

/// A proposal entry line: issue number plus bold title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalEntry {
    /// GitHub issue number
    pub issue_number: u64,
    /// Title text between the bold delimiters
    pub title: String,
}

/// What a single line of minutes means to the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Meeting header carrying the date (`**2024-01-10** / @rsc`)
    MeetingDate(&'a str),
    /// Bold section heading that sets a default status
    SectionHeader(Status),
    /// Proposal entry (`- #123 **title**`)
    Proposal(ProposalEntry),
    /// Indented line stating a status
    StatusIndicator(Status),
    /// Anything else
    Prose,
}

impl std::fmt::Display for LineKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MeetingDate(date) => write!(f, "date {date}"),
            Self::SectionHeader(status) => write!(f, "section {status}"),
            Self::Proposal(entry) => write!(f, "proposal #{}", entry.issue_number),
            Self::StatusIndicator(status) => write!(f, "status {status}"),
            Self::Prose => write!(f, "prose"),
        }
    }
}

/// Classify a line, checking the shapes in parser precedence order
#[must_use]
pub fn classify(line: &str) -> LineKind<'_> {
    if let Some(date) = extract_meeting_date(line) {
        return LineKind::MeetingDate(date);
    }
    if let Some(status) = detect_section_header(line) {
        return LineKind::SectionHeader(status);
    }
    if let Some(entry) = parse_proposal_line(line) {
        return LineKind::Proposal(entry);
    }
    if let Some(status) = detect_status_in_line(line) {
        return LineKind::StatusIndicator(status);
    }
    LineKind::Prose
}

/// Extract the `YYYY-MM-DD` meeting date from a header line
///
/// Recognizes `**YYYY-MM-DD...` and `YYYY-MM-DD /`. Only the shape is
/// checked; calendar validity is the caller's concern.
#[must_use]
pub fn extract_meeting_date(line: &str) -> Option<&str> {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix("**") {
        return date_prefix(rest);
    }
    let date = date_prefix(line)?;
    line[date.len()..].trim_start().starts_with('/').then_some(date)
}

fn date_prefix(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    if bytes.len() < 10 {
        return None;
    }
    let shaped = bytes[..10].iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    // all ten bytes are ASCII here, so slicing is on a char boundary
    shaped.then(|| &s[..10])
}

/// Detect a bold section heading (`**Accepted**`)
#[must_use]
pub fn detect_section_header(line: &str) -> Option<Status> {
    let lower = line.trim().to_lowercase();
    if !lower.starts_with("**") {
        return None;
    }
    vocabulary::section_status(&lower)
}

/// Parse a proposal entry line
///
/// Shapes, tried in order:
/// 1. `- [#NNNNN](url) **title**`
/// 2. `- #NNNNN **title**`
/// 3. `- **title** [#NNNNN](url)`
#[must_use]
pub fn parse_proposal_line(line: &str) -> Option<ProposalEntry> {
    let rest = line.trim_end().strip_prefix("- ")?;
    linked_number_first(rest)
        .or_else(|| bare_number_first(rest))
        .or_else(|| title_first(rest))
}

fn linked_number_first(rest: &str) -> Option<ProposalEntry> {
    let rest = rest.strip_prefix("[#")?;
    let (number, after) = rest.split_once(']')?;
    let issue_number = parse_issue_number(number)?;
    let (_url, after) = after.strip_prefix('(')?.split_once(')')?;
    let title = bold_title(after.trim_start())?;
    Some(ProposalEntry {
        issue_number,
        title,
    })
}

fn bare_number_first(rest: &str) -> Option<ProposalEntry> {
    let rest = rest.strip_prefix('#')?;
    let (number, after) = rest.split_once(char::is_whitespace)?;
    let issue_number = parse_issue_number(number)?;
    let title = bold_title(after.trim_start())?;
    Some(ProposalEntry {
        issue_number,
        title,
    })
}

fn title_first(rest: &str) -> Option<ProposalEntry> {
    let rest = rest.strip_prefix("**")?;
    let (head, link) = rest.split_at(rest.rfind("[#")?);
    let title = head.trim_end().strip_suffix("**")?.trim();
    let (number, _) = link.strip_prefix("[#")?.split_once(']')?;
    let issue_number = parse_issue_number(number)?;
    (!title.is_empty()).then(|| ProposalEntry {
        issue_number,
        title: title.to_string(),
    })
}

fn bold_title(s: &str) -> Option<String> {
    let inner = s.strip_prefix("**")?;
    let end = inner.find("**")?;
    let title = inner[..end].trim();
    (!title.is_empty()).then(|| title.to_string())
}

fn parse_issue_number(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok().filter(|n| *n > 0)
}

/// Detect an inline status indicator on an indented action line
#[must_use]
pub fn detect_status_in_line(line: &str) -> Option<Status> {
    if !line.starts_with([' ', '\t']) {
        return None;
    }
    vocabulary::inline_status(&line.to_lowercase())
}

static ISSUE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\d+)\b").expect("issue reference regex is valid"));

/// Issue numbers referenced as `#NNN` in a line, in order of appearance
#[must_use]
pub fn referenced_issues(line: &str) -> Vec<u64> {
    ISSUE_REF
        .captures_iter(line)
        .filter_map(|c| c.get(1)?.as_str().parse().ok())
        .collect()
}
