//! Output formatting for human and JSON modes
//!
//! Results are plain serializable structs with a `render` method. The run
//! summary always includes the `has_changes=` / `changes_count=` lines so CI
//! jobs can grep them even in human mode.

use serde::Serialize;

use crate::models::ProposalChange;
use crate::storage::ProcessingState;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of a batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Whether any real status change was found
    pub has_changes: bool,
    /// Number of changes in the digest
    pub changes_count: usize,
    /// ISO week of the digest
    pub week: Option<String>,
    /// Every ISO week the batch's changes fall in, oldest first
    pub weeks: Vec<String>,
    /// Comments parsed in this batch
    pub comments_processed: usize,
    /// Whether the run started without saved state
    pub bootstrap: bool,
    /// ID of the newest processed comment
    pub latest_comment: Option<u64>,
    /// Where the digest was written
    pub digest_file: Option<String>,
}

impl RunSummary {
    /// Summary of a run that processed nothing
    #[must_use]
    pub const fn empty(bootstrap: bool) -> Self {
        Self {
            has_changes: false,
            changes_count: 0,
            week: None,
            weeks: Vec::new(),
            comments_processed: 0,
            bootstrap,
            latest_comment: None,
            digest_file: None,
        }
    }

    /// `key=value` lines for CI step outputs
    #[must_use]
    pub fn output_lines(&self) -> String {
        format!("has_changes={}\nchanges_count={}\n", self.has_changes, self.changes_count)
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => render_json(self),
        }
    }

    fn render_human(&self) {
        if self.bootstrap {
            println!("No saved state: bootstrapped from the latest comment.");
        }
        match (&self.week, &self.digest_file) {
            (Some(week), Some(file)) => {
                println!(
                    "{} change(s) in week {week} from {} comment(s), written to {file}",
                    self.changes_count, self.comments_processed
                );
            },
            _ => println!("No status changes ({} comment(s) processed).", self.comments_processed),
        }
        print!("{}", self.output_lines());
    }
}

/// Result of parsing a single minutes file
#[derive(Debug, Clone, Serialize)]
pub struct ParseReport {
    /// Records parsed (no previous status)
    pub changes: Vec<ProposalChange>,
    /// Per-line classification, when requested
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<LineInfo>,
}

/// Classification of one line
#[derive(Debug, Clone, Serialize)]
pub struct LineInfo {
    /// 1-indexed line number
    pub line: usize,
    /// Classification
    pub kind: String,
    /// Line text
    pub text: String,
}

impl ParseReport {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => render_json(self),
        }
    }

    fn render_human(&self) {
        for info in &self.lines {
            println!("{:>4} {:<20} {}", info.line, info.kind, info.text);
        }
        if !self.lines.is_empty() {
            println!();
        }
        if self.changes.is_empty() {
            println!("No status records found.");
            return;
        }
        for change in &self.changes {
            println!(
                "#{:<6} {:<15} {}",
                change.issue_number,
                change.current_status.label(),
                change.title
            );
        }
    }
}

/// Saved processing state
#[derive(Debug, Clone, Serialize)]
pub struct StateReport {
    /// State file location
    pub path: String,
    /// Saved pointer, `None` when fresh
    pub state: Option<ProcessingState>,
}

impl StateReport {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => match &self.state {
                Some(state) => {
                    println!("State: {}", self.path);
                    println!("  last processed at: {}", state.last_processed_at.to_rfc3339());
                    println!("  last comment id:   {}", state.last_comment_id);
                    if let Some(etag) = &state.etag {
                        println!("  etag:              {etag}");
                    }
                },
                None => println!("No saved state at {} (next run bootstraps).", self.path),
            },
            OutputMode::Json => render_json(self),
        }
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => render_json(self),
        }
    }
}

fn render_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}
