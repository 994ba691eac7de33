//! Proposal lifecycle status
//!
//! The closed set of states a proposal can be in according to the review
//! meeting minutes. Nothing outside this set is ever produced: text that does
//! not match a known pattern yields `None`, never an invented status.

use serde::{Deserialize, Serialize};

/// Proposal review status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Under discussion, not yet on the active list
    Discussions,
    /// Last call before acceptance
    LikelyAccept,
    /// Last call before declining
    LikelyDecline,
    /// Accepted
    Accepted,
    /// Declined (including retracted and closed)
    Declined,
    /// Put on hold
    Hold,
    /// On the active review list
    Active,
}

impl Status {
    /// All statuses, in lifecycle order
    pub const ALL: [Self; 7] = [
        Self::Discussions,
        Self::Active,
        Self::LikelyAccept,
        Self::LikelyDecline,
        Self::Accepted,
        Self::Declined,
        Self::Hold,
    ];

    /// Stable machine name (matches the serialized form)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Discussions => "discussions",
            Self::LikelyAccept => "likely_accept",
            Self::LikelyDecline => "likely_decline",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Hold => "hold",
            Self::Active => "active",
        }
    }

    /// Human-readable label, as used in section headers
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Discussions => "Discussions",
            Self::LikelyAccept => "Likely Accept",
            Self::LikelyDecline => "Likely Decline",
            Self::Accepted => "Accepted",
            Self::Declined => "Declined",
            Self::Hold => "Hold",
            Self::Active => "Active",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "discussions" | "discussion" => Ok(Self::Discussions),
            "likely_accept" => Ok(Self::LikelyAccept),
            "likely_decline" => Ok(Self::LikelyDecline),
            "accepted" | "accept" => Ok(Self::Accepted),
            "declined" | "decline" => Ok(Self::Declined),
            "hold" | "on_hold" => Ok(Self::Hold),
            "active" => Ok(Self::Active),
            _ => Err(format!(
                "Invalid status: {s}. Use: discussions, active, likely_accept, likely_decline, \
                 accepted, declined, hold"
            )),
        }
    }
}
