//! Persisted processing pointer
//!
//! The only memory carried between runs: which comment was processed last.
//! A missing file is the fresh/bootstrap state, not an error.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::feed;
use crate::models::{CommentPointer, MeetingComment};

/// Where the last run stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingState {
    /// Effective timestamp of the last processed comment
    pub last_processed_at: DateTime<Utc>,

    /// ID of the last processed comment
    pub last_comment_id: String,

    /// ETag of the first page of the next `since` query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl ProcessingState {
    /// State pointing at a processed comment
    #[must_use]
    pub fn from_pointer(pointer: &CommentPointer) -> Self {
        Self {
            last_processed_at: pointer.at,
            last_comment_id: pointer.id.to_string(),
            etag: None,
        }
    }

    /// Attach the ETag to replay on the next fetch
    #[must_use]
    pub fn with_etag(mut self, etag: Option<String>) -> Self {
        self.etag = etag;
        self
    }

    /// Numeric comment ID (0 if the stored ID is not numeric)
    #[must_use]
    pub fn comment_id(&self) -> u64 {
        self.last_comment_id.parse().unwrap_or(0)
    }

    /// Whether a comment sorts after this pointer and so needs processing
    ///
    /// Edited comments are admitted when their edit time passes the pointer,
    /// even if they were created long before it.
    #[must_use]
    pub fn admits(&self, comment: &MeetingComment) -> bool {
        comment.sort_key() > (self.last_processed_at, self.comment_id())
    }
}

/// File-backed [`ProcessingState`] storage
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Store backed by the given JSON file
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the state file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state; `None` means fresh bootstrap
    pub fn load(&self) -> anyhow::Result<Option<ProcessingState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("reading state file {}", self.path.display()))?;
        let state = serde_json::from_str(&content)
            .with_context(|| format!("parsing state file {}", self.path.display()))?;
        Ok(Some(state))
    }

    /// Persist the state atomically
    pub fn save(&self, state: &ProcessingState) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(state)?;
        feed::write_atomic(&self.path, &content)
            .with_context(|| format!("writing state file {}", self.path.display()))
    }

    /// Delete the state, returning to fresh bootstrap
    pub fn reset(&self) -> anyhow::Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        Ok(true)
    }
}
