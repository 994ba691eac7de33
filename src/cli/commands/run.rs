//! Run one batch over new minutes comments

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use minutes_digest::config::Config;
use minutes_digest::output::{OutputMode, RunSummary};
use minutes_digest::pipeline::Pipeline;
use minutes_digest::source::{CommentSource, LocalCommentSource};

/// Fetch, reconcile and write; prints the `has_changes` summary
pub fn run(config: &Config, comments_file: Option<&Path>, mode: OutputMode) -> anyhow::Result<()> {
    let source = open_source(config, comments_file)?;
    let summary = Pipeline::new(source.as_ref(), config).run()?;
    summary.render(mode);
    write_step_outputs(&summary)
}

fn open_source(
    config: &Config,
    comments_file: Option<&Path>,
) -> anyhow::Result<Box<dyn CommentSource>> {
    if let Some(path) = comments_file {
        let source = LocalCommentSource::from_file(path)
            .with_context(|| format!("loading comments from {}", path.display()))?;
        return Ok(Box::new(source));
    }
    github_source(config)
}

#[cfg(feature = "github")]
fn github_source(config: &Config) -> anyhow::Result<Box<dyn CommentSource>> {
    use minutes_digest::source::GithubClient;

    Ok(Box::new(GithubClient::new(&config.source)?))
}

#[cfg(not(feature = "github"))]
fn github_source(_config: &Config) -> anyhow::Result<Box<dyn CommentSource>> {
    anyhow::bail!("built without the `github` feature; pass --comments-file")
}

/// Append the summary to `$GITHUB_OUTPUT` when running as a CI step
fn write_step_outputs(summary: &RunSummary) -> anyhow::Result<()> {
    let Some(path) = std::env::var_os("GITHUB_OUTPUT") else {
        return Ok(());
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening step output file {}", path.to_string_lossy()))?;
    file.write_all(summary.output_lines().as_bytes())?;
    Ok(())
}
