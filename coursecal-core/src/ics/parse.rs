//! Splits a calendar document into header, event blocks and footer.

const BEGIN_EVENT: &str = "BEGIN:VEVENT";
const END_EVENT: &str = "END:VEVENT";

/// One VEVENT block: the literal text from its begin marker through its
/// end marker, markers included, original line breaks preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct EventBlock {
    text: String,
    trailing: Option<String>,
}

impl EventBlock {
    /// The event's UID, read from its `UID:` line. Events without one
    /// are treated as always-unique by the merge engine.
    pub fn uid(&self) -> Option<&str> {
        self.text
            .lines()
            .find_map(|line| line.trim().strip_prefix("UID:").map(str::trim))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Stray lines between this event's end marker and the next begin
    /// marker, kept so reassembly reproduces the input.
    pub fn trailing(&self) -> Option<&str> {
        self.trailing.as_deref()
    }
}

/// A parsed document: header text before the first event, the ordered
/// events, and footer text after the last one.
///
/// Header and footer are `None` when no lines exist in that position,
/// which is distinct from a single empty line (`Some("")`) — the
/// difference matters for byte-identical reassembly.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDocument {
    pub header: Option<String>,
    pub events: Vec<EventBlock>,
    pub footer: Option<String>,
}

impl CalendarDocument {
    /// Join header, events and footer back into one document.
    ///
    /// For documents with balanced markers this reproduces the parsed
    /// input byte for byte: lines are split on `\n` and rejoined with
    /// `\n`, so CRLF input survives too (each `\r` stays on its line).
    pub fn reassemble(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(self.events.len() + 2);
        if let Some(ref header) = self.header {
            parts.push(header);
        }
        for event in &self.events {
            parts.push(event.text());
            if let Some(trailing) = event.trailing() {
                parts.push(trailing);
            }
        }
        if let Some(ref footer) = self.footer {
            parts.push(footer);
        }

        parts.join("\n")
    }
}

/// Split raw document text on trimmed `BEGIN:VEVENT`/`END:VEVENT`
/// marker lines.
///
/// An event that opens but never closes is dropped. Stray lines between
/// two events stay attached to the preceding event, so a balanced
/// document always reassembles to its input.
pub fn parse_document(text: &str) -> CalendarDocument {
    let mut before: Vec<&str> = Vec::new();
    let mut pending: Vec<&str> = Vec::new();
    let mut events: Vec<EventBlock> = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for line in text.split('\n') {
        match current {
            None => {
                if line.trim() == BEGIN_EVENT {
                    if !pending.is_empty() {
                        if let Some(last) = events.last_mut() {
                            last.trailing = Some(pending.join("\n"));
                        }
                        pending.clear();
                    }
                    current = Some(vec![line]);
                } else if events.is_empty() {
                    before.push(line);
                } else {
                    pending.push(line);
                }
            }
            Some(ref mut block) => {
                block.push(line);
                if line.trim() == END_EVENT {
                    events.push(EventBlock {
                        text: block.join("\n"),
                        trailing: None,
                    });
                    current = None;
                }
            }
        }
    }

    CalendarDocument {
        header: (!before.is_empty()).then(|| before.join("\n")),
        events,
        footer: (!pending.is_empty()).then(|| pending.join("\n")),
    }
}
