//! Shared test fixtures and helpers
//!
//! Builders for minutes bodies and comments, plus a temp workspace laid out
//! the way a deployment is.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use minutes_digest::config::Config;
use minutes_digest::models::{MeetingComment, ProposalChange, Status};
use tempfile::TempDir;

/// Midnight UTC on the given day
pub fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Noon UTC on the given day
pub fn noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// A parsed record dated at the meeting day
pub fn change(issue: u64, status: Status, at: DateTime<Utc>) -> ProposalChange {
    ProposalChange::new(issue, format!("proposal {issue}"), status, at)
}

/// Builder for a minutes comment body
pub struct MinutesBuilder {
    lines: Vec<String>,
}

impl MinutesBuilder {
    /// Start a body with the `**date** / @rsc` header
    pub fn new(date: &str) -> Self {
        Self {
            lines: vec![format!("**{date}** / @rsc, @griesemer"), String::new()],
        }
    }

    /// Add a bold section heading
    pub fn section(mut self, heading: &str) -> Self {
        self.lines.push(String::new());
        self.lines.push(format!("**{heading}**"));
        self.lines.push(String::new());
        self
    }

    /// Add a proposal entry without any note
    pub fn listed(mut self, issue: u64, title: &str) -> Self {
        self.lines.push(format!("- #{issue} **{title}**"));
        self
    }

    /// Add a proposal entry followed by an action note
    pub fn proposal(mut self, issue: u64, title: &str, note: &str) -> Self {
        self.lines.push(format!("- #{issue} **{title}**"));
        self.lines.push(format!("  - {note}"));
        self
    }

    /// Finish the body
    pub fn build(self) -> String {
        let mut body = self.lines.join("\n");
        body.push('\n');
        body
    }
}

/// A comment on the minutes thread
pub fn comment(id: u64, body: &str, created_at: DateTime<Utc>) -> MeetingComment {
    MeetingComment::new(id, body, created_at)
        .with_url(format!("https://github.com/golang/go/issues/33502#issuecomment-{id}"))
}

/// Temp directory with config paths pointing inside it
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Config writing state, digest and content under the workspace
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.output.state_file = self.state_file();
        config.output.digest_file = self.digest_file();
        config.output.content_dir = self.content_dir();
        config
    }

    pub fn state_file(&self) -> PathBuf {
        self.path().join("data/state.json")
    }

    pub fn digest_file(&self) -> PathBuf {
        self.path().join("data/changes.json")
    }

    pub fn content_dir(&self) -> PathBuf {
        self.path().join("content/proposals")
    }
}
