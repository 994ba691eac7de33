//! Data models for minutes-digest
//!
//! Core abstractions:
//! - Status: where a proposal is in the review process
//! - `ProposalChange`: "proposal N moved from X to Y at meeting D"
//! - `MeetingComment`: one comment on the minutes tracking issue

mod change;
mod comment;
mod status;

pub use change::ProposalChange;
pub use comment::{CommentPointer, MeetingComment, sort_chronologically};
pub use status::Status;
