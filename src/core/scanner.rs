//! Tag scanner for `[msg:KEY]text[/msg]` marker spans.
//!
//! The scanner is a purpose-built linear search over one bracket-tag dialect,
//! not an HTML parser. A malformed marker (no closing `]` or no `[/msg]`)
//! ends the scan: spans found before it are kept, everything after it is
//! silently dropped.

use std::ops::Range;

use indexmap::IndexMap;

pub const OPEN_MARKER: &str = "[msg:";
pub const END_MARKER: &str = "[/msg]";

/// Ordered `key -> text` map.
pub type MessageMap = IndexMap<String, String>;

/// One well-formed marker span found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSpan {
    /// Byte range of the whole span, from `[msg:` through `[/msg]`.
    pub range: Range<usize>,
    pub key: String,
    /// Text between the tag and the end marker, trimmed.
    pub text: String,
}

/// Result of scanning one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Keys in first-appearance order. A repeated key keeps its first
    /// position but holds the text of its last occurrence.
    pub messages: MessageMap,
    /// Raw number of spans seen per key, before any collapsing.
    pub occurrences: IndexMap<String, usize>,
}

impl Extraction {
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn occurrences_of(&self, key: &str) -> usize {
        self.occurrences.get(key).copied().unwrap_or(0)
    }
}

/// Scan a document into an ordered `key -> text` extraction.
pub fn scan(document: &str) -> Extraction {
    let mut extraction = Extraction::default();
    for span in spans(document) {
        *extraction.occurrences.entry(span.key.clone()).or_insert(0) += 1;
        extraction.messages.insert(span.key, span.text);
    }
    extraction
}

/// Collect every well-formed span up to the first malformed marker.
pub fn spans(document: &str) -> Vec<TagSpan> {
    let mut found = Vec::new();
    let mut cursor = 0;

    while cursor < document.len() {
        let Some(start) = find_from(document, OPEN_MARKER, cursor) else {
            break;
        };
        let Some(tag_end) = find_from(document, "]", start) else {
            break;
        };
        let Some(end) = find_from(document, END_MARKER, tag_end) else {
            break;
        };

        let span_end = end + END_MARKER.len();
        found.push(TagSpan {
            range: start..span_end,
            key: document[start + OPEN_MARKER.len()..tag_end].to_string(),
            text: document[tag_end + 1..end].trim().to_string(),
        });
        cursor = span_end;
    }

    found
}

fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    haystack
        .get(from..)
        .and_then(|rest| rest.find(needle))
        .map(|pos| from + pos)
}
