//! Search results formatter.
//!
//! Renders a [`SearchOutcome`] in three shapes: a styled terminal table
//! with a summary header and highlighted free-text matches (Human), one
//! JSON document (Json), and headerless tab-separated rows (Plain).
//! Rendering is a pure function of the report, so repeated identical
//! searches produce identical output.

use console::style;
use itertools::Itertools;
use memchr::memmem;
use serde::Serialize;
use textwrap::wrap;

use crate::catalog::{Port, PortStatus};
use crate::cli::output::{Formattable, OutputFormat};
use crate::engine::{SearchOutcome, SearchReport};

/// Width of the wrapped description column in human output.
const DESCRIPTION_WIDTH: usize = 60;

/// View over one search outcome, carrying the optional share URL the
/// submit handler produces.
pub struct SearchView {
    outcome: SearchOutcome,
    share_url: Option<String>,
}

#[derive(Serialize)]
struct ResultRowJson<'a> {
    name: &'a str,
    version: &'a str,
    category: &'a str,
    description: &'a str,
    status: &'static str,
    unmaintained: bool,
    last_updated: i64,
}

#[derive(Serialize)]
struct SearchResponseJson<'a> {
    status: &'static str,
    query: &'a str,
    count: usize,
    shown: usize,
    duration_ms: u64,
    truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    share_url: Option<&'a str>,
    results: Vec<ResultRowJson<'a>>,
}

impl SearchView {
    pub fn new(outcome: SearchOutcome) -> Self {
        Self {
            outcome,
            share_url: None,
        }
    }

    #[must_use]
    pub fn with_share_url(mut self, share_url: Option<String>) -> Self {
        self.share_url = share_url;
        self
    }

    fn format_human(&self) -> String {
        let report = match &self.outcome {
            // No query: the results panel stays hidden.
            SearchOutcome::NoQuery => return String::new(),
            SearchOutcome::Results(report) => report,
        };

        if report.hits.is_empty() {
            return "No matches found.\n".to_string();
        }

        let mut out = String::new();
        out.push_str(&self.human_header(report));
        out.push('\n');

        for port in &report.hits {
            out.push_str(&human_row(port, &report.highlight_terms));
        }

        if let Some(url) = &self.share_url {
            out.push('\n');
            out.push_str(&format!("{} {url}\n", style("link:").dim()));
        }

        out
    }

    fn human_header(&self, report: &SearchReport) -> String {
        let mut header = format!(
            "Found {} results for '{}' in {}ms",
            report.total,
            report.query,
            report.elapsed.as_millis()
        );
        if report.truncated {
            header.push_str(&format!(", showing first {}", report.hits.len()));
        }
        format!("{}\n", style(header).bold())
    }

    fn to_json_response(&self) -> SearchResponseJson<'_> {
        match &self.outcome {
            SearchOutcome::NoQuery => SearchResponseJson {
                status: "no_query",
                query: "",
                count: 0,
                shown: 0,
                duration_ms: 0,
                truncated: false,
                share_url: None,
                results: Vec::new(),
            },
            SearchOutcome::Results(report) => SearchResponseJson {
                status: "ok",
                query: &report.query,
                count: report.total,
                shown: report.hits.len(),
                duration_ms: report.elapsed.as_millis() as u64,
                truncated: report.truncated,
                share_url: self.share_url.as_deref(),
                results: report
                    .hits
                    .iter()
                    .map(|port| ResultRowJson {
                        name: &port.name,
                        version: &port.version,
                        category: &port.category,
                        description: &port.description,
                        status: port.status().label(),
                        unmaintained: port.is_unmaintained,
                        last_updated: port.last_updated,
                    })
                    .collect(),
            },
        }
    }

    fn format_plain(&self) -> String {
        let SearchOutcome::Results(report) = &self.outcome else {
            return String::new();
        };
        report
            .hits
            .iter()
            .map(|port| {
                format!(
                    "{}\t{}\t{}\t{}\t{}",
                    port.name,
                    port.version,
                    port.category,
                    port.status().label(),
                    port.description.replace(['\t', '\n'], " "),
                )
            })
            .join("\n")
    }
}

impl Formattable for SearchView {
    fn format(&self, fmt: OutputFormat) -> String {
        match fmt {
            OutputFormat::Human => self.format_human(),
            OutputFormat::Json => {
                serde_json::to_string_pretty(&self.to_json_response()).unwrap_or_default()
            }
            OutputFormat::Plain => self.format_plain(),
        }
    }
}

fn human_row(port: &Port, terms: &[String]) -> String {
    let dot = match port.status() {
        PortStatus::Ok => style("●").green(),
        PortStatus::Broken => style("●").red(),
        PortStatus::Pending => style("●").yellow(),
    };

    // Pad before styling so ANSI escapes do not skew the columns.
    let padded_name = format!("{:<24}", port.name);
    let name = if port.status() == PortStatus::Broken {
        style(padded_name).red().bold()
    } else {
        style(padded_name).bold()
    };

    let mut row = format!(
        "{dot} {name} {:<12} {:<14} ",
        port.version,
        format!("/{}", port.category),
    );
    let indent = " ".repeat(2 + 24 + 1 + 12 + 1 + 14 + 1);

    let lines = wrap(&port.description, DESCRIPTION_WIDTH);
    if let Some(first) = lines.first() {
        row.push_str(&highlight(first, terms, human_mark));
    }
    if port.is_unmaintained {
        row.push(' ');
        row.push_str(&style("[unmaintained]").yellow().to_string());
    }
    row.push('\n');
    for line in lines.iter().skip(1) {
        row.push_str(&indent);
        row.push_str(&highlight(line, terms, human_mark));
        row.push('\n');
    }
    row
}

fn human_mark(segment: &str) -> String {
    style(segment).bold().underlined().to_string()
}

/// Wrap every case-insensitive occurrence of any term with `mark`.
/// Terms come from the parser already lowercased. Falls back to the
/// unmarked text when lowercasing shifts byte offsets (rare scripts),
/// rather than risk splitting a character.
pub fn highlight(text: &str, terms: &[String], mark: impl Fn(&str) -> String) -> String {
    if terms.is_empty() || text.is_empty() {
        return text.to_string();
    }
    let lowered = text.to_lowercase();
    if lowered.len() != text.len() {
        return text.to_string();
    }

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for term in terms {
        if term.is_empty() {
            continue;
        }
        for start in memmem::find_iter(lowered.as_bytes(), term.as_bytes()) {
            ranges.push((start, start + term.len()));
        }
    }
    if ranges.is_empty() {
        return text.to_string();
    }

    ranges.sort_unstable();
    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (start, end) in ranges {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (start, end) in merged {
        if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            continue;
        }
        out.push_str(&text[cursor..start]);
        out.push_str(&mark(&text[start..end]));
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}
