//! GitHub REST client for the minutes thread
//!
//! Lists issue comments page by page (`GET /repos/{owner}/{repo}/issues/{n}/comments`),
//! replaying the ETag of the first page so an unchanged thread costs a 304.
//! Rate-limit headers are logged; an exhausted limit becomes
//! [`SourceError::RateLimited`].

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, ETAG, HeaderMap, IF_NONE_MATCH, LINK, USER_AGENT};

use super::{CommentSource, FetchOutcome, SourceError, nearest_preceding};
use crate::config::SourceConfig;
use crate::models::MeetingComment;

const API_VERSION: &str = "2022-11-28";

/// One page of the comment listing
#[derive(Debug)]
struct Page {
    comments: Vec<MeetingComment>,
    etag: Option<String>,
    last_page: Option<u32>,
}

/// Blocking GitHub API client scoped to one issue
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    config: SourceConfig,
    token: Option<String>,
}

impl GithubClient {
    /// Build a client from the source config (token read from its env var)
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let token = config.token();
        if token.is_none() {
            log::debug!("{} not set, using unauthenticated API access", config.token_env);
        }
        Ok(Self {
            http,
            config: config.clone(),
            token,
        })
    }

    fn comments_url(&self, since: Option<DateTime<Utc>>, page: u32) -> String {
        let SourceConfig {
            api_base,
            owner,
            repo,
            issue,
            per_page,
            ..
        } = &self.config;
        let mut url = format!(
            "{}/repos/{owner}/{repo}/issues/{issue}/comments?per_page={per_page}&page={page}",
            api_base.trim_end_matches('/')
        );
        if let Some(since) = since {
            url.push_str("&since=");
            url.push_str(&since.to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        url
    }

    /// Fetch one page; `Ok(None)` means 304 Not Modified
    fn get_page(
        &self,
        since: Option<DateTime<Utc>>,
        page: u32,
        etag: Option<&str>,
    ) -> Result<Option<Page>, SourceError> {
        let url = self.comments_url(since, page);
        log::debug!("GET {url}");

        let mut request = self
            .http
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, concat!("minutes-digest/", env!("CARGO_PKG_VERSION")))
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(etag) = etag {
            request = request.header(IF_NONE_MATCH, etag);
        }

        let response = check_response(request.send()?)?;
        if response.status() == StatusCode::NOT_MODIFIED {
            log::info!("comments unchanged since last run (304)");
            return Ok(None);
        }

        let headers = response.headers();
        let etag = header_str(headers, ETAG.as_str()).map(String::from);
        let last_page = header_str(headers, LINK.as_str()).and_then(parse_last_page);
        let comments: Vec<MeetingComment> = response.json()?;
        Ok(Some(Page {
            comments,
            etag,
            last_page,
        }))
    }
}

impl CommentSource for GithubClient {
    fn fetch_since(
        &self,
        since: Option<DateTime<Utc>>,
        etag: Option<&str>,
    ) -> Result<FetchOutcome, SourceError> {
        let Some(first) = self.get_page(since, 1, etag)? else {
            return Ok(FetchOutcome::NotModified);
        };

        let per_page = self.config.per_page as usize;
        let etag = first.etag;
        let mut short = first.comments.len() < per_page;
        let mut comments = first.comments;
        let mut page = 1;
        while !short {
            page += 1;
            let Some(next) = self.get_page(since, page, None)? else {
                break;
            };
            short = next.comments.len() < per_page;
            comments.extend(next.comments);
        }

        log::info!("fetched {} comment(s) over {page} page(s)", comments.len());
        Ok(FetchOutcome::Comments { comments, etag })
    }

    fn fetch_latest(&self) -> Result<Option<MeetingComment>, SourceError> {
        let Some(first) = self.get_page(None, 1, None)? else {
            return Ok(None);
        };
        let comments = match first.last_page {
            Some(last) if last > 1 => {
                self.get_page(None, last, None)?.map(|p| p.comments).unwrap_or_default()
            },
            _ => first.comments,
        };
        Ok(comments.into_iter().max_by_key(|c| c.id))
    }

    fn fetch_preceding(
        &self,
        comment: &MeetingComment,
    ) -> Result<Option<MeetingComment>, SourceError> {
        let since = comment.created_at - chrono::Duration::days(self.config.baseline_lookback_days);
        let candidates = self.fetch_since(Some(since), None)?.into_comments();
        let found = nearest_preceding(candidates, comment);
        if found.is_none() {
            log::warn!(
                "no comment within {} day(s) before #{}; reconciling without a baseline",
                self.config.baseline_lookback_days,
                comment.id
            );
        }
        Ok(found)
    }
}

/// Map error statuses to [`SourceError`], logging rate-limit headers
fn check_response(response: Response) -> Result<Response, SourceError> {
    let headers = response.headers();
    let remaining = header_str(headers, "x-ratelimit-remaining").and_then(|v| v.parse::<u64>().ok());
    let reset_epoch = header_str(headers, "x-ratelimit-reset").and_then(|v| v.parse::<u64>().ok());
    if let Some(remaining) = remaining {
        log::debug!("rate limit remaining: {remaining}");
    }

    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN && remaining == Some(0))
    {
        return Err(SourceError::RateLimited { reset_epoch });
    }
    if status == StatusCode::NOT_MODIFIED || status.is_success() {
        return Ok(response);
    }
    Err(SourceError::Api {
        status: status.as_u16(),
        message: response.text().unwrap_or_default(),
    })
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Page number of the `rel="last"` entry of a `Link` header
fn parse_last_page(link: &str) -> Option<u32> {
    link.split(',').find_map(|part| {
        let (target, params) = part.split_once(';')?;
        if !params.split(';').any(|p| p.trim() == r#"rel="last""#) {
            return None;
        }
        let url = target.trim().strip_prefix('<')?.strip_suffix('>')?;
        let (_, query) = url.split_once('?')?;
        query
            .split('&')
            .find_map(|kv| kv.strip_prefix("page="))
            .and_then(|n| n.parse().ok())
    })
}
