//! Output formatting for lookup results

use std::fmt::Write as _;

use console::style;
use serde::{Deserialize, Serialize};

use crate::error::CliResult;
use crate::lookup::{LookupReport, MatchedView};

/// Output format for lookup results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Render a report in the requested format
pub fn render_report(
    report: &LookupReport,
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
) -> CliResult<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report, use_color, quiet)),
        OutputFormat::Json => render_json(report).map(|mut json| {
            json.push('\n');
            json
        }),
    }
}

/// Render a report as pretty-printed JSON
pub fn render_json(report: &LookupReport) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render a report as text, one line per match
#[must_use]
pub fn render_text(report: &LookupReport, use_color: bool, quiet: bool) -> String {
    let mut out = String::new();

    if !quiet {
        let locator = format!("{} {:?}", report.strategy, report.selector);
        let summary = if report.is_empty() {
            format!("No views matched {locator}")
        } else {
            let noun = if report.matches.len() == 1 { "match" } else { "matches" };
            format!("{} {noun} for {locator}", report.matches.len())
        };
        let prefix = match (report.is_empty(), use_color) {
            (true, true) => style("∅").yellow().bold().to_string(),
            (true, false) => "NONE".to_string(),
            (false, true) => style("✓").green().bold().to_string(),
            (false, false) => "FOUND".to_string(),
        };
        let _ = writeln!(out, "{prefix} {summary}");
    }

    for (position, matched) in report.matches.iter().enumerate() {
        let _ = writeln!(out, "{}", render_match(position, matched, use_color));
    }
    out
}

fn render_match(position: usize, matched: &MatchedView, use_color: bool) -> String {
    let class = if use_color {
        style(&matched.class).cyan().to_string()
    } else {
        matched.class.clone()
    };
    let mut line = format!("[{position}] #{} {class}", matched.node);
    if let Some(id) = matched.id {
        let _ = write!(line, " id={id}");
    }
    if let Some(text) = &matched.text {
        let _ = write!(line, " text={text:?}");
    }
    if let Some(description) = &matched.content_description {
        let _ = write!(line, " content-desc={description:?}");
    }
    if !matched.displayed {
        let hidden = if use_color {
            style("(hidden)").dim().to_string()
        } else {
            "(hidden)".to_string()
        };
        let _ = write!(line, " {hidden}");
    }
    line
}
