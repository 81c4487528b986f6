//! Activity-feed narration of an extraction outcome.
//!
//! The extraction engine is silent; this is the orchestrator-side policy
//! that turns a finished [`Extraction`] into human-readable feed entries,
//! including the "nothing found" verdict.

use uuid::Uuid;

use crate::extraction::Extraction;
use crate::types::{LogEntry, LogKind};

pub const NOTHING_FOUND: &str = "Could not extract any product information";

pub fn entry(kind: LogKind, text: impl Into<String>) -> LogEntry {
    LogEntry {
        id: Uuid::new_v4().to_string(),
        text: text.into(),
        kind,
    }
}

/// Host part of `url` for display, if it parses as an absolute URL.
pub fn domain_of(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
}

pub fn report(url: &str, extraction: &Extraction) -> Vec<LogEntry> {
    let site = domain_of(url).unwrap_or_else(|| "unknown site".to_string());
    let mut logs = vec![entry(
        LogKind::Info,
        format!("Using {} strategy for {}", extraction.strategy, site),
    )];

    for (field, value) in extraction.record.fields() {
        logs.push(match value {
            Some(v) => entry(LogKind::Success, format!("Found {}: {}", field, preview(v))),
            None => entry(LogKind::Warn, format!("No {} found", field)),
        });
    }

    if extraction.record.is_empty() {
        logs.push(entry(LogKind::Warn, NOTHING_FOUND));
    }
    logs
}

/// At most 80 characters, ellipsised on a char boundary.
fn preview(value: &str) -> String {
    const MAX: usize = 80;
    if value.chars().count() <= MAX {
        return value.to_string();
    }
    let mut out: String = value.chars().take(MAX - 1).collect();
    out.push('…');
    out
}
