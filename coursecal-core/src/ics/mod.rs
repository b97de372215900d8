//! Calendar-document parsing and merging.
//!
//! Exports are treated as line-oriented text. Nothing inside an event
//! is interpreted beyond the `BEGIN:VEVENT`/`END:VEVENT` markers and
//! the `UID:` line, so a served feed stays byte-identical to what the
//! exporter produced.

mod merge;
mod parse;

pub use merge::merge_documents;
pub use parse::{CalendarDocument, EventBlock, parse_document};
