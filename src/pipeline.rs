//! One batch run: fetch, parse, reconcile, write
//!
//! Ordering of side effects matters: the digest and content files are
//! written first and the state pointer last, so a failure anywhere leaves
//! the pointer untouched and the next run reprocesses the same comments.

use std::path::PathBuf;

use anyhow::Context;

use crate::config::Config;
use crate::feed::{self, WeeklyDigest};
use crate::models::{MeetingComment, sort_chronologically};
use crate::output::RunSummary;
use crate::parser::{MinutesParser, preview};
use crate::reconciler::{self, ParsedComment, StatusMap};
use crate::source::{CommentSource, FetchOutcome};
use crate::storage::{ProcessingState, ProposalStore, StateStore};

/// Batch orchestrator over a comment source
#[derive(Debug)]
pub struct Pipeline<'a, S: CommentSource + ?Sized> {
    source: &'a S,
    parser: MinutesParser,
    state: StateStore,
    digest_file: PathBuf,
    proposals: ProposalStore,
}

impl<'a, S: CommentSource + ?Sized> Pipeline<'a, S> {
    /// Pipeline writing to the locations in `config`
    #[must_use]
    pub fn new(source: &'a S, config: &Config) -> Self {
        Self {
            source,
            parser: MinutesParser::new(),
            state: StateStore::new(&config.output.state_file),
            digest_file: config.output.digest_file.clone(),
            proposals: ProposalStore::new(&config.output.content_dir),
        }
    }

    /// Run one batch
    pub fn run(&self) -> anyhow::Result<RunSummary> {
        let previous = self.state.load()?;
        let bootstrap = previous.is_none();

        let (mut comments, etag) = match &previous {
            None => {
                log::info!("no saved state, processing only the latest comment");
                let latest = self.source.fetch_latest().context("fetching latest comment")?;
                (latest.into_iter().collect::<Vec<_>>(), None)
            },
            Some(state) => {
                let outcome = self
                    .source
                    .fetch_since(Some(state.last_processed_at), state.etag.as_deref())
                    .context("fetching new comments")?;
                match outcome {
                    FetchOutcome::NotModified => return Ok(RunSummary::empty(false)),
                    FetchOutcome::Comments { comments, etag } => {
                        let fresh: Vec<MeetingComment> =
                            comments.into_iter().filter(|c| state.admits(c)).collect();
                        (fresh, etag)
                    },
                }
            },
        };

        if comments.is_empty() {
            log::info!("no new comments");
            if let Some(state) = previous.filter(|s| etag.is_some() && s.etag != etag) {
                self.state.save(&state.with_etag(etag))?;
            }
            return Ok(RunSummary::empty(bootstrap));
        }

        sort_chronologically(&mut comments);
        let baseline = self.baseline_for(&comments[0])?;

        let parsed: Vec<ParsedComment> = comments.into_iter().map(|c| self.parse(c)).collect();
        let comments_processed = parsed.len();
        let reconciliation = reconciler::reconcile(baseline, parsed);
        let changes = feed::dedup_latest_per_week(reconciliation.changes);
        let weeks: Vec<String> = feed::group_by_week(&changes)
            .into_iter()
            .map(|(week, in_week)| {
                log::debug!("{week}: {} change(s)", in_week.len());
                week
            })
            .collect();

        let digest = WeeklyDigest::from_changes(changes);
        if let Some(digest) = &digest {
            digest
                .write_atomic(&self.digest_file)
                .with_context(|| format!("writing digest {}", self.digest_file.display()))?;
            let touched = self.proposals.apply(&digest.changes)?;
            log::info!(
                "week {}: {} change(s), {} proposal file(s) updated",
                digest.week,
                digest.changes.len(),
                touched.len()
            );
        }

        if let Some(latest) = &reconciliation.latest {
            self.state.save(&ProcessingState::from_pointer(latest))?;
        }

        Ok(RunSummary {
            has_changes: digest.is_some(),
            changes_count: digest.as_ref().map_or(0, |d| d.changes.len()),
            week: digest.as_ref().map(|d| d.week.clone()),
            weeks,
            comments_processed,
            bootstrap,
            latest_comment: reconciliation.latest.map(|p| p.id),
            digest_file: digest.map(|_| self.digest_file.display().to_string()),
        })
    }

    /// Status map of the comment just before `first`
    fn baseline_for(&self, first: &MeetingComment) -> anyhow::Result<StatusMap> {
        let preceding = self
            .source
            .fetch_preceding(first)
            .with_context(|| format!("fetching baseline before comment {}", first.id))?;
        let Some(preceding) = preceding else {
            return Ok(StatusMap::new());
        };
        let baseline = StatusMap::from_changes(&self.parser.parse_comment(&preceding));
        log::debug!("baseline comment {}: {} proposal(s)", preceding.id, baseline.len());
        Ok(baseline)
    }

    /// Parse one comment; unusable comments yield no records but still count
    fn parse(&self, comment: MeetingComment) -> ParsedComment {
        if comment.body.trim().is_empty() {
            log::warn!("comment {} has an empty body, skipping", comment.id);
            return ParsedComment::new(comment, Vec::new());
        }
        let changes = self.parser.parse_comment(&comment);
        if changes.is_empty() {
            log::debug!("comment {} yielded no records: {:?}", comment.id, preview(&comment.body));
        }
        ParsedComment::new(comment, changes)
    }
}
