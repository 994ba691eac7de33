//! Batch runs over an in-memory comment thread

use std::cell::RefCell;
use std::fs;

use chrono::{DateTime, Utc};

use crate::common::{MinutesBuilder, TestWorkspace, comment, noon};
use minutes_digest::feed::WeeklyDigest;
use minutes_digest::models::{MeetingComment, Status};
use minutes_digest::pipeline::Pipeline;
use minutes_digest::source::{
    CommentSource, FetchOutcome, LocalCommentSource, SourceError, nearest_preceding,
};
use minutes_digest::storage::{ProposalStore, StateStore};

/// Thread that answers with an ETag and honors it like the GitHub API
struct EtagSource {
    comments: Vec<MeetingComment>,
    etag: &'static str,
    sent: RefCell<Vec<Option<String>>>,
}

impl EtagSource {
    fn new(comments: Vec<MeetingComment>, etag: &'static str) -> Self {
        Self {
            comments,
            etag,
            sent: RefCell::new(Vec::new()),
        }
    }
}

impl CommentSource for EtagSource {
    fn fetch_since(
        &self,
        since: Option<DateTime<Utc>>,
        etag: Option<&str>,
    ) -> Result<FetchOutcome, SourceError> {
        self.sent.borrow_mut().push(etag.map(String::from));
        if etag == Some(self.etag) {
            return Ok(FetchOutcome::NotModified);
        }
        let comments = self
            .comments
            .iter()
            .filter(|c| since.is_none_or(|t| c.effective_at() >= t))
            .cloned()
            .collect();
        Ok(FetchOutcome::Comments {
            comments,
            etag: Some(self.etag.to_string()),
        })
    }

    fn fetch_latest(&self) -> Result<Option<MeetingComment>, SourceError> {
        Ok(self.comments.iter().max_by_key(|c| c.id).cloned())
    }

    fn fetch_preceding(
        &self,
        comment: &MeetingComment,
    ) -> Result<Option<MeetingComment>, SourceError> {
        Ok(nearest_preceding(self.comments.clone(), comment))
    }
}

fn week1() -> MeetingComment {
    let body = MinutesBuilder::new("2024-01-03")
        .proposal(7, "x: add y", "**likely accept**")
        .proposal(8, "z: remove w", "put on hold")
        .build();
    comment(1001, &body, noon(2024, 1, 4))
}

fn week2() -> MeetingComment {
    let body = MinutesBuilder::new("2024-01-10")
        .proposal(7, "x: add y", "**accepted**")
        .proposal(8, "z: remove w", "put on hold")
        .build();
    comment(1002, &body, noon(2024, 1, 11))
}

fn week3() -> MeetingComment {
    let body = MinutesBuilder::new("2024-01-17")
        .proposal(8, "z: remove w", "**declined**")
        .build();
    comment(1003, &body, noon(2024, 1, 18))
}

#[test]
fn test_bootstrap_processes_only_latest_against_its_predecessor() {
    let ws = TestWorkspace::new();
    let config = ws.config();
    let source = LocalCommentSource::new(vec![week1(), week2()]);

    let summary = Pipeline::new(&source, &config).run().unwrap();
    assert!(summary.bootstrap);
    assert!(summary.has_changes);
    assert_eq!(summary.comments_processed, 1);
    assert_eq!(summary.changes_count, 1);
    assert_eq!(summary.week.as_deref(), Some("2024-W02"));

    let digest = WeeklyDigest::load(&ws.digest_file()).unwrap();
    assert_eq!(digest.changes[0].issue_number, 7);
    assert_eq!(digest.changes[0].previous_status, Some(Status::LikelyAccept));

    let state = StateStore::new(ws.state_file()).load().unwrap().unwrap();
    assert_eq!(state.last_comment_id, "1002");
}

#[test]
fn test_incremental_run_picks_up_new_comments() {
    let ws = TestWorkspace::new();
    let config = ws.config();
    Pipeline::new(&LocalCommentSource::new(vec![week1(), week2()]), &config)
        .run()
        .unwrap();

    let source = LocalCommentSource::new(vec![week1(), week2(), week3()]);
    let summary = Pipeline::new(&source, &config).run().unwrap();
    assert!(!summary.bootstrap);
    assert_eq!(summary.comments_processed, 1);
    assert_eq!(summary.latest_comment, Some(1003));

    let record = ProposalStore::new(ws.content_dir()).get(8).unwrap().unwrap();
    assert_eq!(record.status, Status::Declined);
    assert_eq!(record.history[0].previous_status, Some(Status::Hold));
}

#[test]
fn test_rerun_without_new_comments_changes_nothing() {
    let ws = TestWorkspace::new();
    let config = ws.config();
    let source = LocalCommentSource::new(vec![week1(), week2()]);
    Pipeline::new(&source, &config).run().unwrap();
    let state_before = fs::read_to_string(ws.state_file()).unwrap();

    let summary = Pipeline::new(&source, &config).run().unwrap();
    assert!(!summary.has_changes);
    assert_eq!(summary.comments_processed, 0);
    assert_eq!(fs::read_to_string(ws.state_file()).unwrap(), state_before);
}

#[test]
fn test_edited_comment_is_reprocessed() {
    let ws = TestWorkspace::new();
    let config = ws.config();
    Pipeline::new(&LocalCommentSource::new(vec![week1(), week2()]), &config)
        .run()
        .unwrap();

    let body = MinutesBuilder::new("2024-01-10")
        .proposal(7, "x: add y", "**accepted**")
        .proposal(8, "z: remove w", "**likely decline**")
        .build();
    let edited = comment(1002, &body, noon(2024, 1, 11)).with_updated_at(noon(2024, 1, 12));
    let source = LocalCommentSource::new(vec![week1(), edited]);

    let summary = Pipeline::new(&source, &config).run().unwrap();
    assert_eq!(summary.comments_processed, 1);
    assert_eq!(summary.changes_count, 2);

    let digest = WeeklyDigest::load(&ws.digest_file()).unwrap();
    let eight = digest.changes.iter().find(|c| c.issue_number == 8).unwrap();
    assert_eq!(eight.previous_status, Some(Status::Hold));
    assert_eq!(eight.current_status, Status::LikelyDecline);

    let state = StateStore::new(ws.state_file()).load().unwrap().unwrap();
    assert_eq!(state.last_processed_at, noon(2024, 1, 12));
}

#[test]
fn test_comment_without_minutes_advances_state() {
    let ws = TestWorkspace::new();
    let config = ws.config();
    let source = LocalCommentSource::new(vec![week1(), comment(1005, "Thanks all!", noon(2024, 1, 5))]);

    let summary = Pipeline::new(&source, &config).run().unwrap();
    assert!(!summary.has_changes);
    assert!(!ws.digest_file().exists());
    let state = StateStore::new(ws.state_file()).load().unwrap().unwrap();
    assert_eq!(state.comment_id(), 1005);
}

#[test]
fn test_empty_thread_bootstraps_to_nothing() {
    let ws = TestWorkspace::new();
    let config = ws.config();
    let summary = Pipeline::new(&LocalCommentSource::default(), &config).run().unwrap();
    assert!(summary.bootstrap);
    assert!(!summary.has_changes);
    assert!(!ws.state_file().exists());
}

#[test]
fn test_unchanged_thread_stores_etag_then_short_circuits() {
    let ws = TestWorkspace::new();
    let config = ws.config();
    let source = EtagSource::new(vec![week1(), week2()], "W/\"e1\"");
    let state = StateStore::new(ws.state_file());

    // Step 1: bootstrap never sends an ETag
    Pipeline::new(&source, &config).run().unwrap();
    assert_eq!(state.load().unwrap().unwrap().etag, None);

    // Step 2: nothing new, but the answer's ETag is kept for next time
    let summary = Pipeline::new(&source, &config).run().unwrap();
    assert!(!summary.has_changes);
    let saved = state.load().unwrap().unwrap();
    assert_eq!(saved.etag.as_deref(), Some("W/\"e1\""));
    assert_eq!(saved.last_comment_id, "1002");
    let state_before = fs::read_to_string(ws.state_file()).unwrap();

    // Step 3: the ETag is replayed and the source answers not modified
    let summary = Pipeline::new(&source, &config).run().unwrap();
    assert_eq!(summary.changes_count, 0);
    assert_eq!(summary.comments_processed, 0);
    assert!(!summary.bootstrap);
    assert_eq!(fs::read_to_string(ws.state_file()).unwrap(), state_before);
    assert_eq!(*source.sent.borrow(), vec![None, Some("W/\"e1\"".to_string())]);
}

#[test]
fn test_failed_digest_write_leaves_state_untouched() {
    let ws = TestWorkspace::new();
    let config = ws.config();
    fs::create_dir_all(ws.digest_file()).unwrap();

    let source = LocalCommentSource::new(vec![week1(), week2()]);
    let err = Pipeline::new(&source, &config).run().unwrap_err();
    assert!(format!("{err:#}").contains("writing digest"));
    assert!(!ws.state_file().exists());
    assert!(!ws.content_dir().exists());
}

#[test]
fn test_failed_run_keeps_previous_pointer() {
    let ws = TestWorkspace::new();
    let config = ws.config();
    Pipeline::new(&LocalCommentSource::new(vec![week1()]), &config)
        .run()
        .unwrap();
    let state_before = fs::read_to_string(ws.state_file()).unwrap();

    fs::remove_file(ws.digest_file()).unwrap();
    fs::create_dir_all(ws.digest_file()).unwrap();
    let source = LocalCommentSource::new(vec![week1(), week2()]);
    assert!(Pipeline::new(&source, &config).run().is_err());
    assert_eq!(fs::read_to_string(ws.state_file()).unwrap(), state_before);
}

#[test]
fn test_batch_spanning_weeks_reports_each_week() {
    let ws = TestWorkspace::new();
    let config = ws.config();
    Pipeline::new(&LocalCommentSource::new(vec![week1()]), &config)
        .run()
        .unwrap();

    let source = LocalCommentSource::new(vec![week1(), week2(), week3()]);
    let summary = Pipeline::new(&source, &config).run().unwrap();
    assert_eq!(summary.comments_processed, 2);
    assert_eq!(summary.changes_count, 2);
    assert_eq!(summary.weeks, vec!["2024-W02".to_string(), "2024-W03".to_string()]);
    assert_eq!(summary.week.as_deref(), Some("2024-W03"));
}
