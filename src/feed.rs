//! Change feed: ordering, weekly grouping and the digest file

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ProposalChange;

/// ISO-8601 week label (`2024-W03`) for a timestamp
#[must_use]
pub fn iso_week(at: DateTime<Utc>) -> String {
    let week = at.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

/// Sort by change date, then issue number (stable)
pub fn sort_changes(changes: &mut [ProposalChange]) {
    changes.sort_by_key(|c| (c.changed_at, c.issue_number));
}

/// Group changes by ISO week, preserving order within a week
#[must_use]
pub fn group_by_week(changes: &[ProposalChange]) -> BTreeMap<String, Vec<ProposalChange>> {
    let mut weeks: BTreeMap<String, Vec<ProposalChange>> = BTreeMap::new();
    for change in changes {
        weeks.entry(iso_week(change.changed_at)).or_default().push(change.clone());
    }
    weeks
}

/// Keep only the latest record per issue per ISO week
///
/// Latest means greatest `changed_at`; on a tie the record that comes later
/// in the input wins. Survivors keep their relative input order.
#[must_use]
pub fn dedup_latest_per_week(changes: Vec<ProposalChange>) -> Vec<ProposalChange> {
    let mut winner: HashMap<(String, u64), usize> = HashMap::new();
    for (i, change) in changes.iter().enumerate() {
        let key = (iso_week(change.changed_at), change.issue_number);
        let replace = winner.get(&key).is_none_or(|&j| changes[j].changed_at <= change.changed_at);
        if replace {
            winner.insert(key, i);
        }
    }

    let mut keep = vec![false; changes.len()];
    for i in winner.into_values() {
        keep[i] = true;
    }

    let before = changes.len();
    let kept: Vec<ProposalChange> = changes
        .into_iter()
        .zip(keep)
        .filter_map(|(c, k)| k.then_some(c))
        .collect();
    if kept.len() < before {
        log::debug!("dropped {} superseded change(s) within the same week", before - kept.len());
    }
    kept
}

/// Digest of the changes observed in one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyDigest {
    /// ISO week of the latest change
    pub week: String,
    /// Changes sorted by `changedAt` ascending
    pub changes: Vec<ProposalChange>,
}

impl WeeklyDigest {
    /// Build a digest, or `None` when there is nothing to report
    #[must_use]
    pub fn from_changes(mut changes: Vec<ProposalChange>) -> Option<Self> {
        sort_changes(&mut changes);
        let latest = changes.last()?.changed_at;
        Some(Self {
            week: iso_week(latest),
            changes,
        })
    }

    /// Write the digest as pretty JSON via a temp file and rename
    pub fn write_atomic(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        write_atomic(path, &content)
    }

    /// Read a digest file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Replace `path` with `content` so readers never see a partial file
pub(crate) fn write_atomic(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
