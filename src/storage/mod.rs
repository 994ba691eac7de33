//! File-backed storage
//!
//! - `state`: the processing pointer carried between runs
//! - `proposals`: one content file per proposal, consumed by the site

/// Per-proposal content files
pub mod proposals;
/// Persisted processing pointer
pub mod state;

pub use proposals::{HistoryEntry, ProposalRecord, ProposalStore};
pub use state::{ProcessingState, StateStore};
