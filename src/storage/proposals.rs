//! Per-proposal content files
//!
//! One JSON file per issue under the content directory
//! (`content/proposals/61405.json`), holding the latest title and status and
//! the full history of observed transitions. The site renderer reads these.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::feed;
use crate::models::{ProposalChange, Status};

/// One transition in a proposal's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Meeting date
    pub changed_at: DateTime<Utc>,
    /// Status before
    #[serde(default)]
    pub previous_status: Option<Status>,
    /// Status after
    pub current_status: Status,
    /// Comment the change came from
    #[serde(default)]
    pub comment_url: String,
}

impl From<&ProposalChange> for HistoryEntry {
    fn from(change: &ProposalChange) -> Self {
        Self {
            changed_at: change.changed_at,
            previous_status: change.previous_status,
            current_status: change.current_status,
            comment_url: change.comment_url.clone(),
        }
    }
}

/// Content file for one proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRecord {
    /// GitHub issue number
    pub issue_number: u64,
    /// Most recently seen title
    pub title: String,
    /// Current status
    pub status: Status,
    /// Meeting date of the latest transition
    pub updated_at: DateTime<Utc>,
    /// Transitions, oldest first
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl ProposalRecord {
    /// Start a record from its first observed change
    #[must_use]
    pub fn new(change: &ProposalChange) -> Self {
        Self {
            issue_number: change.issue_number,
            title: change.title.clone(),
            status: change.current_status,
            updated_at: change.changed_at,
            history: vec![HistoryEntry::from(change)],
        }
    }

    /// Merge a change; returns false if it was already recorded
    pub fn merge(&mut self, change: &ProposalChange) -> bool {
        let entry = HistoryEntry::from(change);
        let seen = self.history.iter().any(|h| {
            h.changed_at == entry.changed_at && h.current_status == entry.current_status
        });
        if seen {
            return false;
        }
        self.history.push(entry);
        self.history.sort_by_key(|h| h.changed_at);
        if change.changed_at >= self.updated_at {
            self.title.clone_from(&change.title);
            self.status = change.current_status;
            self.updated_at = change.changed_at;
        }
        true
    }
}

/// Directory of per-proposal content files
#[derive(Debug, Clone)]
pub struct ProposalStore {
    dir: PathBuf,
}

impl ProposalStore {
    /// Store rooted at the content directory
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of an issue's content file
    #[must_use]
    pub fn record_path(&self, issue_number: u64) -> PathBuf {
        self.dir.join(format!("{issue_number}.json"))
    }

    /// Load an issue's record, if one exists
    pub fn get(&self, issue_number: u64) -> anyhow::Result<Option<ProposalRecord>> {
        let path = self.record_path(issue_number);
        if !path.exists() {
            return Ok(None);
        }
        load_record(&path).map(Some)
    }

    /// Apply changes, writing every touched record; returns the updated issues
    pub fn apply(&self, changes: &[ProposalChange]) -> anyhow::Result<Vec<u64>> {
        let mut touched: BTreeMap<u64, ProposalRecord> = BTreeMap::new();

        for change in changes {
            let record = match touched.remove(&change.issue_number) {
                Some(record) => Some(record),
                None => self.get(change.issue_number)?,
            };
            let record = match record {
                Some(mut record) => {
                    if !record.merge(change) {
                        log::debug!("#{} already has {change}", change.issue_number);
                    }
                    record
                },
                None => ProposalRecord::new(change),
            };
            touched.insert(change.issue_number, record);
        }

        for (issue, record) in &touched {
            let content = serde_json::to_string_pretty(record)?;
            let path = self.record_path(*issue);
            feed::write_atomic(&path, &content)
                .with_context(|| format!("writing {}", path.display()))?;
        }

        Ok(touched.into_keys().collect())
    }

    /// All records in the directory, by issue number
    pub fn list(&self) -> anyhow::Result<Vec<ProposalRecord>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut records = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "json") {
                records.push(load_record(&path)?);
            }
        }
        records.sort_by_key(|r| r.issue_number);
        Ok(records)
    }
}

fn load_record(path: &Path) -> anyhow::Result<ProposalRecord> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}
