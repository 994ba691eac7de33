//! Parse a single minutes file

use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use minutes_digest::output::{LineInfo, OutputMode, ParseReport};
use minutes_digest::parser::MinutesParser;

/// Parse a markdown file as one minutes comment
pub fn parse(
    file: &Path,
    timestamp: Option<DateTime<Utc>>,
    explain: bool,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let body = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let parser = MinutesParser::new();
    let changes = parser.parse(&body, timestamp.unwrap_or_else(Utc::now));

    let lines = if explain {
        parser
            .explain(&body)
            .into_iter()
            .zip(body.lines())
            .map(|((line, kind), text)| LineInfo {
                line,
                kind: kind.to_string(),
                text: text.to_string(),
            })
            .collect()
    } else {
        Vec::new()
    };

    ParseReport { changes, lines }.render(mode);
    Ok(())
}
