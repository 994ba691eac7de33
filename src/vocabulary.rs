//! Status vocabulary for meeting minutes
//!
//! Minutes use two authoring conventions, sometimes in the same year:
//! - a bold section heading (`**Accepted**`) that sets the status of every
//!   proposal listed below it
//! - an indented action line under each proposal (`- **no final comments; accepted**`)
//!
//! Each convention has its own pattern table. Both tables are ordered and the
//! first match wins.

use crate::models::Status;

/// A bold section heading keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionPattern {
    /// Lowercase keyword between the `**` delimiters
    pub keyword: &'static str,
    /// Status implied for proposals listed under the heading
    pub status: Status,
}

/// An inline status indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlinePattern {
    /// Lowercase fragments that must all be present
    pub keywords: &'static [&'static str],
    /// Status signalled by the line
    pub status: Status,
    /// The (single) keyword must end the line
    pub at_end: bool,
}

impl InlinePattern {
    const fn contains(keywords: &'static [&'static str], status: Status) -> Self {
        Self {
            keywords,
            status,
            at_end: false,
        }
    }

    const fn at_end(keywords: &'static [&'static str], status: Status) -> Self {
        Self {
            keywords,
            status,
            at_end: true,
        }
    }

    /// Check a lowercased line against this pattern
    #[must_use]
    pub fn matches(&self, lower: &str) -> bool {
        if !self.keywords.iter().all(|k| lower.contains(k)) {
            return false;
        }
        if self.at_end {
            let tail = lower.trim_end();
            return self.keywords.iter().all(|k| tail.ends_with(k));
        }
        true
    }
}

/// Section heading keywords, checked in order
pub const SECTION_HEADERS: &[SectionPattern] = &[
    SectionPattern {
        keyword: "likely accept",
        status: Status::LikelyAccept,
    },
    SectionPattern {
        keyword: "likely decline",
        status: Status::LikelyDecline,
    },
    SectionPattern {
        keyword: "accepted",
        status: Status::Accepted,
    },
    SectionPattern {
        keyword: "declined",
        status: Status::Declined,
    },
    SectionPattern {
        keyword: "active",
        status: Status::Active,
    },
    SectionPattern {
        keyword: "hold",
        status: Status::Hold,
    },
    SectionPattern {
        keyword: "discussions",
        status: Status::Discussions,
    },
    SectionPattern {
        keyword: "discussion",
        status: Status::Discussions,
    },
];

/// Inline indicators, most specific first
pub const INLINE_INDICATORS: &[InlinePattern] = &[
    InlinePattern::contains(&["**likely accept"], Status::LikelyAccept),
    InlinePattern::contains(&["**likely decline"], Status::LikelyDecline),
    InlinePattern::contains(&["retracted", "declined**"], Status::Declined),
    InlinePattern::contains(&["**declined**"], Status::Declined),
    InlinePattern::contains(&["; declined**"], Status::Declined),
    InlinePattern::contains(&["**closed**"], Status::Declined),
    InlinePattern::contains(&["**accepted**"], Status::Accepted),
    InlinePattern::contains(&["; accepted"], Status::Accepted),
    InlinePattern::contains(&["accepted 🎉"], Status::Accepted),
    InlinePattern::contains(&["put on hold"], Status::Hold),
    InlinePattern::at_end(&["on hold"], Status::Hold),
    InlinePattern::contains(&["discussion ongoing"], Status::Discussions),
    InlinePattern::contains(&["added to minutes"], Status::Active),
];

/// Match a trimmed, lowercased line against the section heading table
///
/// The keyword must be closed by `**` or followed by a parenthesized
/// qualifier inside the bold (`**discussions (not yet active)**`).
#[must_use]
pub fn section_status(lower: &str) -> Option<Status> {
    let inner = lower.strip_prefix("**")?;
    SECTION_HEADERS
        .iter()
        .find(|p| {
            inner
                .strip_prefix(p.keyword)
                .is_some_and(|rest| rest.starts_with("**") || rest.starts_with(" ("))
        })
        .map(|p| p.status)
}

/// Match a lowercased line against the inline indicator table
#[must_use]
pub fn inline_status(lower: &str) -> Option<Status> {
    INLINE_INDICATORS.iter().find(|p| p.matches(lower)).map(|p| p.status)
}
