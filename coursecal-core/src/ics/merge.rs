//! Merges several source documents into one virtual calendar.

use std::collections::HashSet;

use crate::ics::parse::{CalendarDocument, EventBlock, parse_document};

const CALNAME_PREFIX: &str = "X-WR-CALNAME:";

/// Merge source documents, in priority order, into one calendar named
/// `display_name`.
///
/// The first source wins on UID conflicts; events without a UID are
/// never treated as duplicates of each other. Header and footer come
/// from the first source with a non-empty header; only its
/// `X-WR-CALNAME:` line is rewritten, every other header line passes
/// through unchanged. Event order mirrors source concatenation order,
/// not start-time order.
pub fn merge_documents(sources: &[String], display_name: &str) -> String {
    let docs: Vec<CalendarDocument> = sources.iter().map(|s| parse_document(s)).collect();

    let (header, footer) = docs
        .iter()
        .find(|doc| doc.header.as_deref().is_some_and(|h| !h.is_empty()))
        .map(|doc| (doc.header.clone().unwrap_or_default(), doc.footer.clone()))
        .unwrap_or_default();
    let header = rename_calendar(&header, display_name);

    let mut seen: HashSet<&str> = HashSet::new();
    let mut events: Vec<&EventBlock> = Vec::new();
    for doc in &docs {
        for event in &doc.events {
            match event.uid() {
                Some(uid) => {
                    if seen.insert(uid) {
                        events.push(event);
                    }
                }
                // No UID: always kept.
                None => events.push(event),
            }
        }
    }

    let mut parts: Vec<&str> = Vec::with_capacity(events.len() + 2);
    if !header.is_empty() {
        parts.push(&header);
    }
    for event in &events {
        parts.push(event.text());
        if let Some(trailing) = event.trailing() {
            parts.push(trailing);
        }
    }
    if let Some(ref footer) = footer {
        parts.push(footer);
    }

    parts.join("\n")
}

/// Replace the calendar-title header line with the virtual name,
/// keeping the line's `\r` when the source uses CRLF endings.
fn rename_calendar(header: &str, display_name: &str) -> String {
    header
        .split('\n')
        .map(|line| {
            if line.trim().starts_with(CALNAME_PREFIX) {
                let eol = if line.ends_with('\r') { "\r" } else { "" };
                format!("{CALNAME_PREFIX}{display_name}{eol}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
